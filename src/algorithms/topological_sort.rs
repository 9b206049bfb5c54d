use std::collections::BTreeSet;

use fnv::FnvHashSet;

use crate::handle::{Direction, Edge, Handle, NodeId};
use crate::handlegraph::HandleGraph;

use super::dfs::{dfs, DfsVisitor};

/// The forward handles of all nodes without edges on their left
/// side.
pub fn head_nodes<G: HandleGraph>(graph: &G) -> Vec<Handle> {
    let mut heads = Vec::new();
    graph.for_each_handle(|h| {
        if graph.degree(h, Direction::Left) == 0 {
            heads.push(h);
        }
        true
    });
    heads
}

/// The forward handles of all nodes without edges on their right
/// side.
pub fn tail_nodes<G: HandleGraph>(graph: &G) -> Vec<Handle> {
    let mut tails = Vec::new();
    graph.for_each_handle(|h| {
        if graph.degree(h, Direction::Right) == 0 {
            tails.push(h);
        }
        true
    });
    tails
}

/// All tips of the graph, facing inward: heads in their forward
/// orientation, and tails reversed. Nodes without any edges appear
/// once in each orientation.
pub fn find_tips<G: HandleGraph>(graph: &G) -> Vec<Handle> {
    let mut tips = Vec::new();
    graph.for_each_handle(|h| {
        if graph.degree(h, Direction::Left) == 0 {
            tips.push(h);
        }
        if graph.degree(h, Direction::Right) == 0 {
            tips.push(h.flip());
        }
        true
    });
    tips
}

/// Order the nodes of the graph with a topological sort.
///
/// The order only depends on the IDs and edges of the graph, not on
/// the iteration order of the backend. Nodes are taken lowest handle
/// first; when the remaining nodes are all in cycles, the search is
/// restarted from the lowest unvisited node, so the result is not a
/// topological order if the graph has directed cycles.
pub fn topological_order<G: HandleGraph>(graph: &G) -> Vec<Handle> {
    let mut order: Vec<Handle> = Vec::with_capacity(graph.node_count());

    let mut unvisited: BTreeSet<NodeId> =
        graph.handles().into_iter().map(|h| h.id()).collect();
    let mut visited: FnvHashSet<NodeId> = FnvHashSet::default();
    let mut masked: FnvHashSet<Edge> = FnvHashSet::default();

    let mut ready: BTreeSet<Handle> = head_nodes(graph).into_iter().collect();

    loop {
        if ready.is_empty() {
            match unvisited.iter().next() {
                Some(&id) => {
                    ready.insert(Handle::pack(id, false));
                }
                None => break,
            }
        }

        while let Some(handle) = ready.iter().next().copied() {
            ready.remove(&handle);

            if !visited.insert(handle.id()) {
                continue;
            }
            unvisited.remove(&handle.id());
            order.push(handle);

            for prev in graph.neighbors(handle, Direction::Left) {
                masked.insert(Edge::edge_handle(prev, handle));
            }

            for next in graph.neighbors(handle, Direction::Right) {
                masked.insert(Edge::edge_handle(handle, next));

                if visited.contains(&next.id()) {
                    continue;
                }

                let no_incoming = graph
                    .follow_edges(next, Direction::Left, |prev| {
                        masked.contains(&Edge::edge_handle(prev, next))
                    });

                if no_incoming {
                    ready.insert(next);
                }
            }
        }
    }

    order
}

struct CycleCheck<'a, G> {
    graph: &'a G,
    on_stack: FnvHashSet<Handle>,
    cyclic: bool,
}

impl<'a, G: HandleGraph> DfsVisitor for CycleCheck<'a, G> {
    fn begin(&mut self, handle: Handle) {
        self.on_stack.insert(handle);
        let on_stack = &self.on_stack;
        let closes_cycle = !self
            .graph
            .follow_edges(handle, Direction::Right, |next| {
                !on_stack.contains(&next)
            });
        self.cyclic |= closes_cycle;
    }

    fn end(&mut self, handle: Handle) {
        self.on_stack.remove(&handle);
    }

    fn stop(&self) -> bool {
        self.cyclic
    }
}

/// Returns `true` if no handle can reach itself, in the same
/// orientation, by walking rightward. Cycles that pass through the
/// other strand of a node are allowed.
pub fn is_directed_acyclic<G: HandleGraph>(graph: &G) -> bool {
    let mut check = CycleCheck {
        graph,
        on_stack: FnvHashSet::default(),
        cyclic: false,
    };
    dfs(graph, &mut check, &[], &FnvHashSet::default());
    !check.cyclic
}

struct ReachesOtherStrand {
    root: Handle,
    found: bool,
}

impl DfsVisitor for ReachesOtherStrand {
    fn begin(&mut self, handle: Handle) {
        self.found |= handle == self.root.flip();
    }

    fn stop(&self) -> bool {
        self.found
    }
}

/// Returns `true` if no node can reach itself, in either
/// orientation, by walking rightward. Unlike
/// [`is_directed_acyclic`], a walk that comes back to a node on its
/// other strand, such as a reversing self-loop, is a cycle.
///
/// This searches from both strands of every node, so it takes
/// quadratic time on large acyclic graphs.
pub fn is_acyclic<G: HandleGraph>(graph: &G) -> bool {
    if !is_directed_acyclic(graph) {
        return false;
    }

    let no_sinks = FnvHashSet::default();

    graph.for_each_handle(|handle| {
        [handle, handle.flip()].iter().all(|&root| {
            let mut check = ReachesOtherStrand { root, found: false };
            dfs(graph, &mut check, &[root], &no_sinks);
            !check.found
        })
    })
}
