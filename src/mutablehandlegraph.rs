use crate::handle::{Edge, Handle, NodeId};

/// Encapsulates adding handles and edges to a handlegraph.
pub trait AdditiveHandleGraph {
    /// Add a node with the provided sequence to the graph, letting
    /// the graph pick the node ID.
    fn append_handle(&mut self, sequence: &[u8]) -> Handle;

    /// Add a node with the provided sequence and ID to the graph.
    fn create_handle<T: Into<NodeId>>(
        &mut self,
        sequence: &[u8],
        node_id: T,
    ) -> Handle;

    /// Insert an edge into the graph. Inserting an edge that already
    /// exists, in either of its two forms, does nothing.
    /// Implementations may panic if both handles of the edge do not
    /// already exist.
    fn create_edge(&mut self, edge: Edge);
}

/// Encapsulates removing handles and edges to a handlegraph, and
/// clearing the entire graph.
pub trait SubtractiveHandleGraph {
    /// Remove a handle from the graph, along with all of its edges,
    /// returning `true` if the handle existed.
    ///
    /// Paths must not step on the handle when it is removed.
    fn remove_handle(&mut self, handle: Handle) -> bool;

    /// Remove an edge from the graph, returning `true` if the edge
    /// existed.
    fn remove_edge(&mut self, edge: Edge) -> bool;

    fn clear_graph(&mut self);
}

/// Encapsulates mutating specific handles in a graph, and splitting
/// handles.
pub trait MutableHandles: AdditiveHandleGraph {
    /// Divide the given handle at the provided `offsets`, in terms of
    /// the sequence in the handle's orientation. Creates
    /// `offsets.len()` new handles, and updates the edges
    /// accordingly. Returns all the pieces, ordered and oriented
    /// like `handle`.
    ///
    /// Implementations should replace each path step on the original
    /// handle with steps on all of the pieces.
    fn divide_handle(
        &mut self,
        handle: Handle,
        offsets: Vec<usize>,
    ) -> Vec<Handle>;

    /// Divide the given handle at the provided offset, creating one
    /// new handle. Default implementation uses `divide_handle()`, and
    /// there's probably no need to provide another implementation.
    fn split_handle(
        &mut self,
        handle: Handle,
        offset: usize,
    ) -> (Handle, Handle) {
        let handles = self.divide_handle(handle, vec![offset]);
        (handles[0], handles[handles.len() - 1])
    }

    /// Transform the node that `handle` corresponds to so that the
    /// orientation of `handle` becomes the node's forward
    /// orientation. I.e. if `handle` is reverse, the node will be
    /// reversed. Returns the new handle.
    fn apply_orientation(&mut self, handle: Handle) -> Handle;
}

/// A graph that allows transforming node IDs, and reordering the
/// internal structure, for example when applying a sorting order.
pub trait TransformNodeIds {
    /// Reassign all node IDs in the graph using the provided
    /// `transform` function. `transform` must be injective, and is
    /// `Copy + Send + Sync` as some implementations may perform part
    /// of the work in parallel.
    fn transform_node_ids<F>(&mut self, transform: F)
    where
        F: Fn(NodeId) -> NodeId + Copy + Send + Sync;

    /// Reorder the graph to match `order`, which must contain one
    /// handle for each node in the graph. The orientation of the
    /// handles is ignored.
    ///
    /// If `compact_ids` is true, the nodes are renumbered from 1 in
    /// the order given. Returns `true` if the node IDs were changed.
    fn apply_ordering(&mut self, order: &[Handle], compact_ids: bool) -> bool;
}

/// A graph that supports all forms of handle- and edge-related
/// mutation.
///
/// Is automatically implemented for any graph that implements all of
/// the mutation traits.
pub trait MutableHandleGraph:
    AdditiveHandleGraph + SubtractiveHandleGraph + MutableHandles + TransformNodeIds
{
}

impl<T> MutableHandleGraph for T where
    T: AdditiveHandleGraph
        + SubtractiveHandleGraph
        + MutableHandles
        + TransformNodeIds
{
}
