/*!

Traits for graphs with embedded paths.

A path is a named, optionally circular, sequence of steps, where
each step is a handle. Steps are addressed using an
implementation-specific [`StepHandle`](PathHandleGraph::StepHandle).
Non-circular paths have two sentinel steps, one before the first
step ([`path_front_end`](PathHandleGraph::path_front_end)) and one
after the last ([`path_end`](PathHandleGraph::path_end)); these do
not correspond to a handle.

*/

use crate::handle::Handle;
use crate::handlegraph::HandleGraph;

mod metadata;

pub use self::metadata::{PathMetadata, PathSense, Subrange};

/// A unique identifier for a single path.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PathId(pub u64);

/// Immutable access to the paths embedded in a graph.
pub trait PathHandleGraph: HandleGraph {
    type StepHandle: Copy + Eq + std::hash::Hash + std::fmt::Debug;

    fn path_count(&self) -> usize;

    fn has_path(&self, name: &[u8]) -> bool;

    fn name_to_path_id(&self, name: &[u8]) -> Option<PathId>;

    fn path_name(&self, path: PathId) -> Option<&[u8]>;

    fn is_circular(&self, path: PathId) -> bool;

    /// The number of steps on the path.
    fn step_count(&self, path: PathId) -> usize;

    /// The handle at the given step, or `None` if the step is one of
    /// the sentinels.
    fn handle_of_step(&self, step: &Self::StepHandle) -> Option<Handle>;

    fn path_of_step(&self, step: &Self::StepHandle) -> PathId;

    /// The first step of the path, or `path_end` if the path is empty.
    fn path_begin(&self, path: PathId) -> Self::StepHandle;

    /// The sentinel past the last step.
    fn path_end(&self, path: PathId) -> Self::StepHandle;

    /// The last step of the path, or `path_front_end` if the path is
    /// empty.
    fn path_back(&self, path: PathId) -> Self::StepHandle;

    /// The sentinel before the first step.
    fn path_front_end(&self, path: PathId) -> Self::StepHandle;

    /// Returns `true` unless the step is the last step of a
    /// non-circular path.
    fn has_next_step(&self, step: &Self::StepHandle) -> bool;

    /// Returns `true` unless the step is the first step of a
    /// non-circular path.
    fn has_previous_step(&self, step: &Self::StepHandle) -> bool;

    /// The step after `step`. On a circular path the last step is
    /// followed by the first.
    fn next_step(&self, step: &Self::StepHandle) -> Self::StepHandle;

    /// The step before `step`. On a circular path the first step is
    /// preceded by the last.
    fn previous_step(&self, step: &Self::StepHandle) -> Self::StepHandle;

    fn for_each_path<F>(&self, f: F) -> bool
    where
        F: FnMut(PathId) -> bool;

    /// Call `f` on every step, on any path, that is on the node of
    /// `handle`, in either orientation.
    fn for_each_step_on_handle<F>(&self, handle: Handle, f: F) -> bool
    where
        F: FnMut(Self::StepHandle) -> bool;

    /// The metadata of a path. The default implementation parses the
    /// path name.
    fn path_metadata(&self, path: PathId) -> Option<PathMetadata> {
        self.path_name(path).map(PathMetadata::parse)
    }

    /// Call `f` on each step of the path, from the first to the
    /// last. Circular paths are visited once around.
    fn for_each_step_in_path<F>(&self, path: PathId, mut f: F) -> bool
    where
        F: FnMut(Self::StepHandle) -> bool,
    {
        let mut step = self.path_begin(path);
        for _ in 0..self.step_count(path) {
            if !f(step) {
                return false;
            }
            step = self.next_step(&step);
        }
        true
    }

    /// Collect the handles of all steps on a path.
    fn path_handles(&self, path: PathId) -> Vec<Handle> {
        let mut res = Vec::with_capacity(self.step_count(path));
        self.for_each_step_in_path(path, |step| {
            if let Some(h) = self.handle_of_step(&step) {
                res.push(h);
            }
            true
        });
        res
    }

    /// The sequence spelled by the path.
    fn path_sequence(&self, path: PathId) -> Vec<u8> {
        let mut seq = Vec::new();
        self.for_each_step_in_path(path, |step| {
            if let Some(h) = self.handle_of_step(&step) {
                seq.extend(self.sequence(h));
            }
            true
        });
        seq
    }

    fn path_ids(&self) -> Vec<PathId> {
        let mut res = Vec::with_capacity(self.path_count());
        self.for_each_path(|p| {
            res.push(p);
            true
        });
        res
    }

    fn steps_on_handle(&self, handle: Handle) -> Vec<Self::StepHandle> {
        let mut res = Vec::new();
        self.for_each_step_on_handle(handle, |step| {
            res.push(step);
            true
        });
        res
    }
}

/// Creating, destroying, and modifying the paths of a graph.
pub trait MutablePathHandleGraph: PathHandleGraph {
    /// Create a new, empty, path. Returns `None` if there already is
    /// a path with the given name.
    fn create_path(&mut self, name: &[u8], circular: bool) -> Option<PathId>;

    /// Create a new, empty, path named after `metadata`. Returns
    /// `None` if the name is taken.
    fn create_path_with_metadata(
        &mut self,
        metadata: &PathMetadata,
        circular: bool,
    ) -> Option<PathId> {
        let name = metadata.path_name().ok()?;
        self.create_path(&name, circular)
    }

    /// Destroy a path, returning `true` if it existed.
    fn destroy_path(&mut self, path: PathId) -> bool;

    fn append_step(&mut self, path: PathId, handle: Handle) -> Self::StepHandle;

    fn prepend_step(&mut self, path: PathId, handle: Handle)
        -> Self::StepHandle;

    /// Replace the steps from `begin` to `end`, both inclusive, with
    /// steps on the handles in `new_segment`. Returns the first and
    /// last of the new steps; if `new_segment` is empty, the steps
    /// around the removed range are returned instead.
    ///
    /// On circular paths the range may wrap past the last step.
    /// Step handles on the path are invalidated.
    fn rewrite_segment(
        &mut self,
        begin: &Self::StepHandle,
        end: &Self::StepHandle,
        new_segment: &[Handle],
    ) -> (Self::StepHandle, Self::StepHandle);

    fn set_circularity(&mut self, path: PathId, circular: bool);
}
