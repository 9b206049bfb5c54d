use fnv::FnvHashSet;

use crate::handle::{Handle, NodeId};
use crate::mutablehandlegraph::MutableHandles;

/// Make the orientation of each of the given handles its node's
/// forward orientation. Returns the IDs of the nodes that were
/// flipped.
pub fn apply_orientations<G: MutableHandles>(
    graph: &mut G,
    orientations: &[Handle],
) -> FnvHashSet<NodeId> {
    let mut flipped = FnvHashSet::default();
    for &handle in orientations {
        if handle.is_reverse() {
            flipped.insert(handle.id());
            graph.apply_orientation(handle);
        }
    }
    flipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::single_stranded_orientation;
    use crate::handle::Edge;
    use crate::handlegraph::HandleGraph;
    use crate::hashgraph::HashGraph;
    use crate::mutablehandlegraph::AdditiveHandleGraph;
    use crate::pathhandlegraph::{MutablePathHandleGraph, PathHandleGraph};
    use crate::util::test::*;

    #[test]
    fn orient_graph_forward() {
        let mut graph = HashGraph::new();
        let n1 = graph.append_handle(b"AAC");
        let n2 = graph.append_handle(b"GGT");
        let n3 = graph.append_handle(b"TA");
        graph.create_edge(Edge(n1, n2.flip()));
        graph.create_edge(Edge(n2.flip(), n3));

        let path = graph.create_path(b"p", false).unwrap();
        graph.append_step(path, n1);
        graph.append_step(path, n2.flip());
        graph.append_step(path, n3);
        let before = graph.path_sequence(path);

        let orientation = single_stranded_orientation(&graph).unwrap();
        let flipped = apply_orientations(&mut graph, &orientation);

        assert_eq!(flipped.len(), 1);
        assert!(flipped.contains(&NodeId::from(2u64)));

        assert_eq!(graph.sequence(hnd(2)), b"ACC".to_vec());
        assert!(graph.has_edge(hnd(1), hnd(2)));
        assert!(graph.has_edge(hnd(2), hnd(3)));
        assert_eq!(graph.path_handles(path), vec_hnd(vec![1, 2, 3]));
        assert_eq!(graph.path_sequence(path), before);
    }

    #[test]
    fn forward_handles_are_untouched() {
        let mut graph: HashGraph = test_graph_no_paths();
        let handles = graph.handles();
        let flipped = apply_orientations(&mut graph, &handles);
        assert!(flipped.is_empty());
    }
}
