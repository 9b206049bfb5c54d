/*!

`HashGraph` node definition

*/

use fnv::FnvHashMap;

use crate::handle::Handle;
use crate::pathhandlegraph::PathId;

/// A node and its edges. `right_edges` holds the handles reached by
/// leaving the forward handle of the node on its right side, and
/// `left_edges` the handles reached by leaving the reverse handle
/// on its right side, i.e. by leaving the node on its left side.
#[derive(Debug, Clone)]
pub struct Node {
    pub sequence: Vec<u8>,
    pub left_edges: Vec<Handle>,
    pub right_edges: Vec<Handle>,
    /// The step indices on each path that visit this node.
    pub occurrences: FnvHashMap<PathId, Vec<usize>>,
}

impl Node {
    pub fn new(sequence: &[u8]) -> Node {
        Node {
            sequence: sequence.into(),
            left_edges: vec![],
            right_edges: vec![],
            occurrences: FnvHashMap::default(),
        }
    }

    /// The edge list to use when leaving `handle` on its right side.
    #[inline]
    pub(super) fn edges_from(&self, handle: Handle) -> &Vec<Handle> {
        if handle.is_reverse() {
            &self.left_edges
        } else {
            &self.right_edges
        }
    }

    #[inline]
    pub(super) fn edges_from_mut(&mut self, handle: Handle) -> &mut Vec<Handle> {
        if handle.is_reverse() {
            &mut self.left_edges
        } else {
            &mut self.right_edges
        }
    }

    pub fn occurrence_count(&self) -> usize {
        self.occurrences.values().map(|steps| steps.len()).sum()
    }
}
