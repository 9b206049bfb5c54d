use fnv::FnvHashMap;

#[allow(unused_imports)]
use log::debug;

use crate::error::{HandleGraphError, Result};
use crate::handle::{Edge, Handle};
use crate::handlegraph::HandleGraph;
use crate::mutablehandlegraph::AdditiveHandleGraph;

/// Copy `graph` into the empty graph `into` with each strand of
/// every node as its own node, so that every edge of `into` goes
/// between forward handles.
///
/// Returns a map from the forward handle of each new node to the
/// handle in `graph` whose sequence it has.
pub fn split_strands<G, M>(
    graph: &G,
    into: &mut M,
) -> Result<FnvHashMap<Handle, Handle>>
where
    G: HandleGraph,
    M: HandleGraph + AdditiveHandleGraph,
{
    if into.node_count() > 0 {
        return Err(HandleGraphError::NonEmptyDestination);
    }

    let nodes = graph.node_count();
    let mut translation: FnvHashMap<Handle, Handle> = FnvHashMap::default();
    translation.reserve(2 * nodes);

    // the new nodes spelling each original handle
    let mut strand_node: FnvHashMap<Handle, Handle> = FnvHashMap::default();
    strand_node.reserve(2 * nodes);

    graph.for_each_handle(|handle| {
        for &h in [handle, handle.flip()].iter() {
            let new = into.append_handle(&graph.sequence(h));
            strand_node.insert(h, new);
            translation.insert(new, h);
        }
        true
    });

    graph.for_each_edge(|Edge(left, right)| {
        into.create_edge(Edge(strand_node[&left], strand_node[&right]));
        into.create_edge(Edge(
            strand_node[&right.flip()],
            strand_node[&left.flip()],
        ));
        true
    });

    debug!(
        "split {} nodes into {} single-strand nodes",
        nodes,
        into.node_count()
    );

    Ok(translation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::Direction;
    use crate::hashgraph::HashGraph;
    use crate::util::test::*;

    #[test]
    fn strands_become_nodes() {
        let mut graph = HashGraph::new();
        let n1 = graph.append_handle(b"AAC");
        let n2 = graph.append_handle(b"GT");
        graph.create_edge(Edge(n1, n2.flip()));

        let mut split = HashGraph::new();
        let translation = split_strands(&graph, &mut split).unwrap();

        assert_eq!(split.node_count(), 4);
        assert_eq!(split.edge_count(), 2);
        assert_eq!(translation.len(), 4);

        // new nodes are all forward, and spell the translated handle
        for (&new, &old) in translation.iter() {
            assert!(!new.is_reverse());
            assert_eq!(split.sequence(new), graph.sequence(old));
        }

        let new_of = |old: Handle| {
            translation
                .iter()
                .find(|(_, &o)| o == old)
                .map(|(&n, _)| n)
                .unwrap()
        };

        assert!(split.has_edge(new_of(n1), new_of(n2.flip())));
        assert!(split.has_edge(new_of(n2), new_of(n1.flip())));

        // every edge joins forward handles, read from the forward strand
        for h in split.handles() {
            for &dir in [Direction::Left, Direction::Right].iter() {
                for other in split.neighbors(h, dir) {
                    assert!(!other.is_reverse());
                }
            }
        }
    }

    #[test]
    fn split_keeps_forward_walks() {
        let graph: HashGraph = test_graph_no_paths();
        let mut split = HashGraph::new();
        let translation = split_strands(&graph, &mut split).unwrap();

        assert_eq!(split.node_count(), 2 * graph.node_count());
        assert_eq!(split.edge_count(), 2 * graph.edge_count());

        for h in split.handles() {
            let old = translation[&h];
            let mut next: Vec<Handle> = split
                .neighbors(h, Direction::Right)
                .into_iter()
                .map(|n| translation[&n])
                .collect();
            let mut expected = graph.neighbors(old, Direction::Right);
            next.sort();
            expected.sort();
            assert_eq!(next, expected);
        }
    }

    #[test]
    fn split_requires_empty_destination() {
        let graph: HashGraph = test_graph_no_paths();
        let mut into = HashGraph::new();
        into.append_handle(b"A");

        assert_eq!(
            split_strands(&graph, &mut into),
            Err(HandleGraphError::NonEmptyDestination)
        );
    }
}
