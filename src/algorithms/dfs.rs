use fnv::{FnvHashMap, FnvHashSet};

use crate::handle::{Direction, Handle};
use crate::handlegraph::HandleGraph;

/// Callbacks for [`dfs`]. Each handle is begun when the search
/// first reaches it, and ended once everything reachable from it has
/// been searched.
pub trait DfsVisitor {
    fn begin(&mut self, _handle: Handle) {}

    fn end(&mut self, _handle: Handle) {}

    /// Checked after each handle is begun; the search stops if this
    /// returns `true`.
    fn stop(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchState {
    Current,
    Done,
}

struct Frame {
    handle: Handle,
    targets: Vec<Handle>,
    next: usize,
}

/// Depth-first search over oriented handles, following edges to the
/// right of each handle.
///
/// The search is started from each handle in `sources`, in order,
/// or, if `sources` is empty, from every node in both orientations.
/// Handles in `sinks` are visited but not searched past. Returns
/// `false` if the visitor stopped the search.
pub fn dfs<G, V>(
    graph: &G,
    visitor: &mut V,
    sources: &[Handle],
    sinks: &FnvHashSet<Handle>,
) -> bool
where
    G: HandleGraph,
    V: DfsVisitor,
{
    let mut state: FnvHashMap<Handle, SearchState> = FnvHashMap::default();

    if sources.is_empty() {
        let handles = graph.handles();
        for handle in handles {
            if !search_from(graph, visitor, handle, sinks, &mut state)
                || !search_from(graph, visitor, handle.flip(), sinks, &mut state)
            {
                return false;
            }
        }
    } else {
        for &source in sources {
            if !search_from(graph, visitor, source, sinks, &mut state) {
                return false;
            }
        }
    }

    true
}

fn search_from<G, V>(
    graph: &G,
    visitor: &mut V,
    root: Handle,
    sinks: &FnvHashSet<Handle>,
    state: &mut FnvHashMap<Handle, SearchState>,
) -> bool
where
    G: HandleGraph,
    V: DfsVisitor,
{
    if state.contains_key(&root) {
        return true;
    }

    let open = |handle: Handle| {
        let targets = if sinks.contains(&handle) {
            Vec::new()
        } else {
            graph.neighbors(handle, Direction::Right)
        };
        Frame {
            handle,
            targets,
            next: 0,
        }
    };

    state.insert(root, SearchState::Current);
    let mut stack = vec![open(root)];
    visitor.begin(root);
    if visitor.stop() {
        return false;
    }

    while let Some(frame) = stack.last_mut() {
        if frame.next < frame.targets.len() {
            let target = frame.targets[frame.next];
            frame.next += 1;

            if !state.contains_key(&target) {
                state.insert(target, SearchState::Current);
                stack.push(open(target));
                visitor.begin(target);
                if visitor.stop() {
                    return false;
                }
            }
        } else {
            let handle = frame.handle;
            stack.pop();
            state.insert(handle, SearchState::Done);
            visitor.end(handle);
        }
    }

    true
}
