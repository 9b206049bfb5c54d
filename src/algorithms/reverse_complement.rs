use crate::error::{HandleGraphError, Result};
use crate::handle::Edge;
use crate::handlegraph::HandleGraph;
use crate::mutablehandlegraph::AdditiveHandleGraph;

/// Fill the empty graph `into` with the reverse complement of
/// `graph`. Node IDs are kept, and each node's forward strand is the
/// reverse strand of the original node, so every edge is reversed.
pub fn reverse_complement_graph<G, M>(graph: &G, into: &mut M) -> Result<()>
where
    G: HandleGraph,
    M: HandleGraph + AdditiveHandleGraph,
{
    if into.node_count() > 0 {
        return Err(HandleGraphError::NonEmptyDestination);
    }

    graph.for_each_handle(|handle| {
        into.create_handle(&graph.sequence(handle.flip()), handle.id());
        true
    });

    graph.for_each_edge(|Edge(left, right)| {
        into.create_edge(Edge(right, left));
        true
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashgraph::HashGraph;
    use crate::util::test::*;

    #[test]
    fn reverse_complement_reverses_edges() {
        let graph: HashGraph = test_graph_no_paths();
        let mut rev = HashGraph::new();
        reverse_complement_graph(&graph, &mut rev).unwrap();

        assert_eq!(rev.node_count(), graph.node_count());
        assert_eq!(rev.edge_count(), graph.edge_count());

        for h in graph.handles() {
            assert_eq!(rev.sequence(h), graph.sequence(h.flip()));
        }

        for Edge(l, r) in graph.edges() {
            assert!(rev.has_edge(r, l));
            assert!(rev.has_edge(l.flip(), r.flip()));
        }
    }

    #[test]
    fn double_reverse_complement_is_identity() {
        let graph: HashGraph = test_graph_no_paths();
        let mut rev = HashGraph::new();
        let mut rev_rev = HashGraph::new();
        reverse_complement_graph(&graph, &mut rev).unwrap();
        reverse_complement_graph(&rev, &mut rev_rev).unwrap();

        assert!(crate::algorithms::are_equivalent(&graph, &rev_rev));
    }

    #[test]
    fn reverse_complement_requires_empty_destination() {
        let graph: HashGraph = test_graph_no_paths();
        let mut into: HashGraph = test_graph_no_paths();
        assert_eq!(
            reverse_complement_graph(&graph, &mut into),
            Err(HandleGraphError::NonEmptyDestination)
        );
    }
}
