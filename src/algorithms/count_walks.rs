use fnv::FnvHashMap;

use crate::handle::{Direction, Handle};
use crate::handlegraph::HandleGraph;

use super::topological_sort::topological_order;

/// The number of walks from any head node that end at each handle.
#[derive(Debug, Clone, Default)]
pub struct WalkCounts {
    /// Handles without edges to their right, in topological order.
    pub sinks: Vec<Handle>,
    pub counts: FnvHashMap<Handle, usize>,
    /// `true` if some count did not fit in a `usize`, in which case
    /// the counts past that point are too low.
    pub overflowed: bool,
}

/// Count the walks that start at a head node and reach each handle,
/// walking rightward in topological order.
///
/// The graph must be a single-stranded DAG, which can be checked
/// with [`is_single_stranded`](super::is_single_stranded) and
/// [`is_directed_acyclic`](super::is_directed_acyclic).
pub fn count_walks_through_nodes<G: HandleGraph>(graph: &G) -> WalkCounts {
    let mut walks = WalkCounts::default();
    walks.counts.reserve(graph.node_count());

    for handle in topological_order(graph) {
        if graph.degree(handle, Direction::Left) == 0 {
            walks.counts.insert(handle, 1);
        }
        let count_here = walks.counts.get(&handle).copied().unwrap_or(0);

        let mut is_sink = true;
        graph.follow_edges(handle, Direction::Right, |next| {
            is_sink = false;
            let count_next = walks.counts.entry(next).or_insert(0);
            match count_next.checked_add(count_here) {
                Some(sum) => *count_next = sum,
                None => walks.overflowed = true,
            }
            true
        });

        if is_sink {
            walks.sinks.push(handle);
        }
    }

    walks
}

/// The number of walks from a head node to a tail node, or
/// `usize::MAX` if there are more than that. The graph must be a
/// single-stranded DAG.
pub fn count_walks<G: HandleGraph>(graph: &G) -> usize {
    let walks = count_walks_through_nodes(graph);
    if walks.overflowed {
        return usize::MAX;
    }

    walks
        .sinks
        .iter()
        .try_fold(0usize, |total, sink| {
            total.checked_add(walks.counts.get(sink).copied().unwrap_or(0))
        })
        .unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::Edge;
    use crate::hashgraph::HashGraph;
    use crate::mutablehandlegraph::AdditiveHandleGraph;
    use crate::util::test::*;

    #[test]
    fn count_walks_in_dag() {
        let graph: HashGraph = test_graph_no_paths();
        let walks = count_walks_through_nodes(&graph);

        let expected = [1, 2, 6, 3, 1, 12, 3, 3, 9];
        for (ix, &count) in expected.iter().enumerate() {
            assert_eq!(walks.counts[&hnd(ix as u64 + 1)], count);
        }
        assert_eq!(walks.sinks, vec![hnd(6)]);
        assert!(!walks.overflowed);

        assert_eq!(count_walks(&graph), 12);

        let (graph, _, _) = two_path_graph();
        assert_eq!(count_walks(&graph), 2);
    }

    #[test]
    fn count_walks_separate_components() {
        let mut graph = HashGraph::new();
        let n1 = graph.append_handle(b"A");
        let n2 = graph.append_handle(b"C");
        let n3 = graph.append_handle(b"G");
        graph.create_edge(Edge(n1, n2));

        // a lone node is both a head and a tail
        assert_eq!(count_walks(&graph), 2);
        assert_eq!(count_walks_through_nodes(&graph).sinks, vec![n2, n3]);

        assert_eq!(count_walks(&HashGraph::new()), 0);
    }

    #[test]
    fn count_walks_saturates() {
        let mut graph = HashGraph::new();
        let mut hub = graph.append_handle(b"A");

        // each bubble doubles the number of walks
        for _ in 0..(usize::BITS + 1) {
            let top = graph.append_handle(b"C");
            let bottom = graph.append_handle(b"G");
            let next = graph.append_handle(b"T");
            graph.create_edge(Edge(hub, top));
            graph.create_edge(Edge(hub, bottom));
            graph.create_edge(Edge(top, next));
            graph.create_edge(Edge(bottom, next));
            hub = next;
        }

        assert!(count_walks_through_nodes(&graph).overflowed);
        assert_eq!(count_walks(&graph), usize::MAX);
    }
}
