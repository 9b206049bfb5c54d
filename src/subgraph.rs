/*!

A read-only view of a graph restricted to a set of nodes, with the
edges between them.

*/

use fnv::FnvHashSet;

use crate::handle::{Direction, Handle, NodeId};
use crate::handlegraph::HandleGraph;

/// A node-induced subgraph of another graph. Edges leading out of
/// the node set are hidden.
#[derive(Debug, Clone)]
pub struct SubHandleGraph<'a, G> {
    super_graph: &'a G,
    nodes: FnvHashSet<NodeId>,
    min_id: NodeId,
    max_id: NodeId,
}

impl<'a, G: HandleGraph> SubHandleGraph<'a, G> {
    pub fn new(super_graph: &'a G) -> Self {
        SubHandleGraph {
            super_graph,
            nodes: FnvHashSet::default(),
            min_id: NodeId(std::u64::MAX),
            max_id: NodeId(0),
        }
    }

    /// Create a subgraph containing the given nodes, which must exist
    /// in the super graph.
    pub fn with_nodes<I>(super_graph: &'a G, nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut sub = Self::new(super_graph);
        for id in nodes {
            sub.add_node(id);
        }
        sub
    }

    pub fn add_node(&mut self, node_id: NodeId) {
        if self.nodes.insert(node_id) {
            self.min_id = std::cmp::min(self.min_id, node_id);
            self.max_id = std::cmp::max(self.max_id, node_id);
        }
    }

    pub fn super_graph(&self) -> &'a G {
        self.super_graph
    }
}

impl<'a, G: HandleGraph> HandleGraph for SubHandleGraph<'a, G> {
    fn has_node<I: Into<NodeId>>(&self, node_id: I) -> bool {
        self.nodes.contains(&node_id.into())
    }

    fn length(&self, handle: Handle) -> usize {
        self.super_graph.length(handle)
    }

    fn sequence(&self, handle: Handle) -> Vec<u8> {
        self.super_graph.sequence(handle)
    }

    fn min_node_id(&self) -> NodeId {
        self.min_id
    }

    fn max_node_id(&self) -> NodeId {
        self.max_id
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn follow_edges<F>(&self, handle: Handle, dir: Direction, mut f: F) -> bool
    where
        F: FnMut(Handle) -> bool,
    {
        self.super_graph.follow_edges(handle, dir, |next| {
            if self.nodes.contains(&next.id()) {
                f(next)
            } else {
                true
            }
        })
    }

    fn for_each_handle<F>(&self, mut f: F) -> bool
    where
        F: FnMut(Handle) -> bool,
    {
        let mut ids: Vec<NodeId> = self.nodes.iter().copied().collect();
        ids.sort_unstable();
        ids.into_iter().all(|id| f(Handle::pack(id, false)))
    }
}
