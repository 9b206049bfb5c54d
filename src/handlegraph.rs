use crate::handle::{Direction, Edge, Handle, NodeId};

/// Trait encapsulating the immutable aspects of a handlegraph.
///
/// Iteration is done with callbacks that return `true` to keep
/// going, or `false` to stop early. Every iteration method returns
/// `false` if it was stopped early, and `true` otherwise.
pub trait HandleGraph {
    fn has_node<I: Into<NodeId>>(&self, node_id: I) -> bool;

    /// The length of the sequence of a given node
    fn length(&self, handle: Handle) -> usize;

    /// Returns the sequence of a node in the handle's local forward
    /// orientation. Copies the sequence, as the sequence in the graph
    /// may be reversed depending on orientation.
    fn sequence(&self, handle: Handle) -> Vec<u8>;

    fn min_node_id(&self) -> NodeId;
    fn max_node_id(&self) -> NodeId;

    /// Return the total number of nodes in the graph
    fn node_count(&self) -> usize;

    /// Call `f` on each handle on the given side of `handle`. The
    /// handles passed to `f` are oriented so that they point away
    /// from `handle`, i.e. when following edges to the left, `f`
    /// receives the handles whose right side is attached to the left
    /// side of `handle`.
    fn follow_edges<F>(&self, handle: Handle, dir: Direction, f: F) -> bool
    where
        F: FnMut(Handle) -> bool;

    /// Call `f` on the forward handle of each node in the graph.
    fn for_each_handle<F>(&self, f: F) -> bool
    where
        F: FnMut(Handle) -> bool;

    /// Like `for_each_handle`, but implementations may call `f` from
    /// several threads at once. The order is undefined, and stopping
    /// early is best-effort.
    fn for_each_handle_par<F>(&self, f: F) -> bool
    where
        Self: Sync,
        F: Fn(Handle) -> bool + Sync + Send,
    {
        self.for_each_handle(f)
    }

    /// Get the handle for the node with the given ID.
    #[inline]
    fn handle<I: Into<NodeId>>(&self, node_id: I, is_reverse: bool) -> Handle {
        Handle::pack(node_id, is_reverse)
    }

    fn subsequence(
        &self,
        handle: Handle,
        index: usize,
        size: usize,
    ) -> Vec<u8> {
        self.sequence(handle)[index..index + size].into()
    }

    fn base(&self, handle: Handle, index: usize) -> u8 {
        self.sequence(handle)[index]
    }

    fn degree(&self, handle: Handle, dir: Direction) -> usize {
        let mut count = 0;
        self.follow_edges(handle, dir, |_| {
            count += 1;
            true
        });
        count
    }

    fn has_edge(&self, left: Handle, right: Handle) -> bool {
        let mut found = false;
        self.follow_edges(left, Direction::Right, |next| {
            found = next == right;
            !found
        });
        found
    }

    /// Collect the handles on one side of `handle`, in the order
    /// `follow_edges` produces them.
    fn neighbors(&self, handle: Handle, dir: Direction) -> Vec<Handle> {
        let mut res = Vec::new();
        self.follow_edges(handle, dir, |h| {
            res.push(h);
            true
        });
        res
    }

    /// Collect the forward handles of all nodes.
    fn handles(&self) -> Vec<Handle> {
        let mut res = Vec::with_capacity(self.node_count());
        self.for_each_handle(|h| {
            res.push(h);
            true
        });
        res
    }

    /// Call `f` once for each edge in the graph, in canonical form.
    ///
    /// Edges are found by looking at both sides of each forward
    /// handle; an edge is only reported from the endpoint with the
    /// lower node ID, and reversing self-loops on the left side are
    /// only reported when the neighbor is reverse.
    fn for_each_edge<F>(&self, mut f: F) -> bool
    where
        F: FnMut(Edge) -> bool,
    {
        self.for_each_handle(|handle| {
            let mut keep_going = true;

            self.follow_edges(handle, Direction::Right, |next| {
                if handle.id() <= next.id() {
                    keep_going = f(Edge::edge_handle(handle, next));
                }
                keep_going
            });

            if keep_going {
                self.follow_edges(handle, Direction::Left, |prev| {
                    if handle.id() < prev.id()
                        || (handle.id() == prev.id() && prev.is_reverse())
                    {
                        keep_going = f(Edge::edge_handle(prev, handle));
                    }
                    keep_going
                });
            }

            keep_going
        })
    }

    fn edges(&self) -> Vec<Edge> {
        let mut res = Vec::new();
        self.for_each_edge(|e| {
            res.push(e);
            true
        });
        res
    }

    /// Return the total number of edges in the graph
    fn edge_count(&self) -> usize {
        let mut count = 0;
        self.for_each_edge(|_| {
            count += 1;
            true
        });
        count
    }

    /// Sum up all the sequences in the graph
    fn total_length(&self) -> usize {
        let mut total = 0;
        self.for_each_handle(|h| {
            total += self.length(h);
            true
        });
        total
    }
}
