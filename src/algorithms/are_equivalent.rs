use bstr::ByteSlice;

use log::debug;

use crate::handle::Direction;
use crate::handlegraph::HandleGraph;
use crate::pathhandlegraph::PathHandleGraph;

/// Returns `true` if the two graphs have the same node IDs, with the
/// same sequences, and the same edges. The reason for a mismatch is
/// logged at `debug` level.
pub fn are_equivalent<G, H>(graph_1: &G, graph_2: &H) -> bool
where
    G: HandleGraph,
    H: HandleGraph,
{
    if graph_1.node_count() != graph_2.node_count() {
        debug!(
            "graphs have different node counts: {} and {}",
            graph_1.node_count(),
            graph_2.node_count()
        );
        return false;
    }

    if graph_1.edge_count() != graph_2.edge_count() {
        debug!(
            "graphs have different edge counts: {} and {}",
            graph_1.edge_count(),
            graph_2.edge_count()
        );
        return false;
    }

    graph_1.for_each_handle(|handle| {
        if !graph_2.has_node(handle.id()) {
            debug!("node {} is missing from the second graph", handle.id());
            return false;
        }

        let seq_1 = graph_1.sequence(handle);
        let seq_2 = graph_2.sequence(handle);
        if seq_1 != seq_2 {
            debug!(
                "node {} has sequence {} and {}",
                handle.id(),
                seq_1.as_bstr(),
                seq_2.as_bstr()
            );
            return false;
        }

        [handle, handle.flip()].iter().all(|&h| {
            [Direction::Left, Direction::Right].iter().all(|&dir| {
                if graph_1.degree(h, dir) != graph_2.degree(h, dir) {
                    debug!("handle {} has different degrees going {:?}", h, dir);
                    return false;
                }

                graph_1.follow_edges(h, dir, |other| {
                    let found = match dir {
                        Direction::Left => graph_2.has_edge(other, h),
                        Direction::Right => graph_2.has_edge(h, other),
                    };
                    if !found {
                        debug!(
                            "edge between {} and {} is missing from the second graph",
                            h, other
                        );
                    }
                    found
                })
            })
        })
    })
}

/// Like [`are_equivalent`], and also checks that the graphs have the
/// same paths, by name, with the same circularity and steps.
pub fn are_equivalent_with_paths<G, H>(graph_1: &G, graph_2: &H) -> bool
where
    G: PathHandleGraph,
    H: PathHandleGraph,
{
    if !are_equivalent(graph_1, graph_2) {
        return false;
    }

    if graph_1.path_count() != graph_2.path_count() {
        debug!(
            "graphs have different path counts: {} and {}",
            graph_1.path_count(),
            graph_2.path_count()
        );
        return false;
    }

    graph_1.for_each_path(|path_1| {
        let name = match graph_1.path_name(path_1) {
            Some(name) => name,
            None => return false,
        };

        let path_2 = match graph_2.name_to_path_id(name) {
            Some(path) => path,
            None => {
                debug!(
                    "path {} is missing from the second graph",
                    name.as_bstr()
                );
                return false;
            }
        };

        if graph_1.is_circular(path_1) != graph_2.is_circular(path_2) {
            debug!("path {} differs in circularity", name.as_bstr());
            return false;
        }

        if graph_1.path_handles(path_1) != graph_2.path_handles(path_2) {
            debug!("path {} has different steps", name.as_bstr());
            return false;
        }

        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::Edge;
    use crate::hashgraph::HashGraph;
    use crate::mutablehandlegraph::{AdditiveHandleGraph, SubtractiveHandleGraph};
    use crate::pathhandlegraph::MutablePathHandleGraph;
    use crate::util::test::*;

    #[test]
    fn graphs_built_in_different_order() {
        let graph_1: HashGraph = test_graph_no_paths();

        let mut graph_2 = HashGraph::new();
        let mut handles = graph_1.handles();
        handles.reverse();
        for h in handles {
            graph_2.create_handle(&graph_1.sequence(h), h.id());
        }
        for Edge(l, r) in graph_1.edges() {
            // written from the other end
            graph_2.create_edge(Edge(r.flip(), l.flip()));
        }

        assert!(are_equivalent(&graph_1, &graph_2));
        assert!(are_equivalent(&graph_2, &graph_1));
    }

    #[test]
    fn differences_are_found() {
        let graph_1: HashGraph = test_graph_no_paths();

        let mut graph_2: HashGraph = test_graph_no_paths();
        graph_2.remove_edge(edge(4, 6));
        graph_2.create_edge(Edge(hnd(4), r_hnd(6)));
        assert!(!are_equivalent(&graph_1, &graph_2));

        let mut graph_3 = HashGraph::new();
        for h in graph_1.handles() {
            let seq = if h.id() == 3u64.into() {
                b"ATT".to_vec()
            } else {
                graph_1.sequence(h)
            };
            graph_3.create_handle(&seq, h.id());
        }
        for e in graph_1.edges() {
            graph_3.create_edge(e);
        }
        assert!(!are_equivalent(&graph_1, &graph_3));
    }

    #[test]
    fn paths_are_compared_by_name() {
        let (graph_1, _, _) = two_path_graph();
        let (mut graph_2, _, path_2) = two_path_graph();
        assert!(are_equivalent_with_paths(&graph_1, &graph_2));

        graph_2.set_circularity(path_2, true);
        assert!(are_equivalent(&graph_1, &graph_2));
        assert!(!are_equivalent_with_paths(&graph_1, &graph_2));
    }
}
