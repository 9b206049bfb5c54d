use std::collections::VecDeque;

use fnv::FnvHashMap;

use crate::error::{HandleGraphError, Result};
use crate::handle::{Direction, Handle, NodeId};
use crate::handlegraph::HandleGraph;

/// Pick an orientation for every node so that all edges connect the
/// chosen handles head to tail, i.e. no edge reverses strand.
///
/// Nodes are oriented one connected component at a time, starting
/// from the lowest node in iteration order, which is kept forward.
/// Returns the count of oriented nodes as an error if there is no
/// such orientation.
pub(crate) fn orient_nodes<G: HandleGraph>(
    graph: &G,
) -> std::result::Result<Vec<Handle>, usize> {
    let mut orientation: FnvHashMap<NodeId, bool> = FnvHashMap::default();
    let mut oriented: Vec<Handle> = Vec::with_capacity(graph.node_count());
    let mut queue: VecDeque<Handle> = VecDeque::new();

    for handle in graph.handles() {
        if orientation.contains_key(&handle.id()) {
            continue;
        }

        orientation.insert(handle.id(), handle.is_reverse());
        oriented.push(handle);
        queue.push_back(handle);

        while let Some(current) = queue.pop_front() {
            for &dir in [Direction::Right, Direction::Left].iter() {
                let consistent = graph.follow_edges(current, dir, |next| {
                    match orientation.get(&next.id()) {
                        Some(&is_rev) => is_rev == next.is_reverse(),
                        None => {
                            orientation.insert(next.id(), next.is_reverse());
                            oriented.push(next);
                            queue.push_back(next);
                            true
                        }
                    }
                });

                if !consistent {
                    return Err(oriented.len());
                }
            }
        }
    }

    Ok(oriented)
}

/// A handle for every node, oriented so that every edge in the
/// graph runs from the end of one of the handles to the start of
/// another, if such an orientation exists.
pub fn single_stranded_orientation<G: HandleGraph>(
    graph: &G,
) -> Option<Vec<Handle>> {
    orient_nodes(graph).ok()
}

/// Returns `true` if the graph has no reversing edges, once nodes
/// are suitably oriented.
pub fn is_single_stranded<G: HandleGraph>(graph: &G) -> bool {
    orient_nodes(graph).is_ok()
}

/// `single_stranded_orientation`, with the failure reported as an
/// error.
pub(crate) fn require_single_stranded<G: HandleGraph>(
    graph: &G,
) -> Result<Vec<Handle>> {
    orient_nodes(graph).map_err(|oriented| HandleGraphError::NotSingleStranded {
        oriented,
        nodes: graph.node_count(),
    })
}
