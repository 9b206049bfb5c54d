/*!

Writing a graph as GFA in a canonical form, so that graphs with the
same IDs, sequences, and edges give byte-identical output no matter
which backend holds them or in which order they were built. This
makes the output suitable as input to a content hash.

The output has one `S` line per node, each followed by the `L` lines
of the canonical edges that start at it. Links have no overlap
field.

*/

use std::fmt::Display;
use std::io::{self, Write};

use crate::handle::{Direction, Handle, NodeId};
use crate::handlegraph::HandleGraph;

#[inline]
fn orient_char(is_reverse: bool) -> char {
    if is_reverse {
        '-'
    } else {
        '+'
    }
}

/// The canonical links starting at the node of `forward`, as
/// `(from is reverse, to, to is reverse)`, sorted.
fn canonical_links<G, K, F>(
    graph: &G,
    forward: Handle,
    from: &K,
    key: &F,
) -> Vec<(bool, K, bool)>
where
    G: HandleGraph,
    K: Ord,
    F: Fn(NodeId) -> K,
{
    let mut links: Vec<(bool, K, bool)> = Vec::new();

    graph.follow_edges(forward, Direction::Right, |next| {
        let to = key(next.id());
        // self-loops from the forward strand are always canonical
        if *from <= to {
            links.push((false, to, next.is_reverse()));
        }
        true
    });

    graph.follow_edges(forward.flip(), Direction::Right, |next| {
        let to = key(next.id());
        if *from < to || (*from == to && !next.is_reverse()) {
            links.push((true, to, next.is_reverse()));
        }
        true
    });

    links.sort();
    links.dedup();
    links
}

fn write_canonical<G, W, K, F>(
    graph: &G,
    out: &mut W,
    key: F,
) -> io::Result<()>
where
    G: HandleGraph,
    W: Write,
    K: Ord + Display,
    F: Fn(NodeId) -> K,
{
    let mut nodes: Vec<(K, Handle)> = graph
        .handles()
        .into_iter()
        .map(|h| (key(h.id()), h))
        .collect();
    nodes.sort();

    for (id, handle) in nodes.iter() {
        write!(out, "S\t{}\t", id)?;
        out.write_all(&graph.sequence(*handle))?;
        writeln!(out)?;

        for (from_rev, to, to_rev) in canonical_links(graph, *handle, id, &key) {
            writeln!(
                out,
                "L\t{}\t{}\t{}\t{}",
                id,
                orient_char(from_rev),
                to,
                orient_char(to_rev)
            )?;
        }
    }

    Ok(())
}

/// Write `graph` to `out` as canonical GFA. Nodes, and the targets
/// of links, are sorted by numeric ID if `integer_ids` is `true`,
/// and by the ID as a decimal string otherwise.
pub fn canonical_gfa<G, W>(
    graph: &G,
    out: &mut W,
    integer_ids: bool,
) -> io::Result<()>
where
    G: HandleGraph,
    W: Write,
{
    if integer_ids {
        write_canonical(graph, out, u64::from)
    } else {
        write_canonical(graph, out, |id: NodeId| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::Edge;
    use crate::hashgraph::HashGraph;
    use crate::mutablehandlegraph::AdditiveHandleGraph;
    use crate::util::test::*;

    use quickcheck::{quickcheck, TestResult};

    fn gfa_string<G: HandleGraph>(graph: &G, integer_ids: bool) -> String {
        let mut out: Vec<u8> = Vec::new();
        canonical_gfa(graph, &mut out, integer_ids).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn small_graph() -> HashGraph {
        let mut graph = HashGraph::new();
        graph.create_handle(b"GATT", 2u64);
        graph.create_handle(b"A", 10u64);
        graph.create_handle(b"CC", 1u64);
        graph.create_edge(Edge(hnd(10), r_hnd(2)));
        graph.create_edge(Edge(hnd(1), hnd(2)));
        graph.create_edge(Edge(r_hnd(1), hnd(1)));
        graph.create_edge(Edge(hnd(1), r_hnd(1)));
        graph
    }

    #[test]
    fn canonical_integer_ids() {
        let graph = small_graph();
        let expected = "S\t1\tCC\n\
                        L\t1\t+\t1\t-\n\
                        L\t1\t+\t2\t+\n\
                        L\t1\t-\t1\t+\n\
                        S\t2\tGATT\n\
                        L\t2\t+\t10\t-\n\
                        S\t10\tA\n";
        assert_eq!(gfa_string(&graph, true), expected);
    }

    #[test]
    fn canonical_string_ids() {
        let graph = small_graph();
        let expected = "S\t1\tCC\n\
                        L\t1\t+\t1\t-\n\
                        L\t1\t+\t2\t+\n\
                        L\t1\t-\t1\t+\n\
                        S\t10\tA\n\
                        L\t10\t+\t2\t-\n\
                        S\t2\tGATT\n";
        assert_eq!(gfa_string(&graph, false), expected);
    }

    #[test]
    fn every_edge_written_once() {
        let graph: HashGraph = test_graph_no_paths();
        let gfa = gfa_string(&graph, true);
        let links = gfa.lines().filter(|l| l.starts_with('L')).count();
        assert_eq!(links, graph.edge_count());
    }

    fn build_graph(seqs: &[Vec<u8>], edges: &[Edge], reverse: bool) -> HashGraph {
        let mut graph = HashGraph::new();
        let mut ids: Vec<usize> = (0..seqs.len()).collect();
        if reverse {
            ids.reverse();
        }
        for ix in ids {
            graph.create_handle(&seqs[ix], ix as u64 + 1);
        }

        if reverse {
            for &Edge(l, r) in edges.iter().rev() {
                graph.create_edge(Edge(r.flip(), l.flip()));
            }
        } else {
            for &edge in edges.iter() {
                graph.create_edge(edge);
            }
        }
        graph
    }

    quickcheck! {
        fn prop_canonical_gfa_is_deterministic(
            seqs: Vec<Vec<u8>>,
            links: Vec<(u8, bool, u8, bool)>
        ) -> TestResult {
            if seqs.is_empty() {
                return TestResult::discard();
            }

            let seqs: Vec<Vec<u8>> = seqs
                .iter()
                .map(|s| s.iter().map(|b| b"ACGT"[*b as usize % 4]).collect())
                .collect();

            let n = seqs.len() as u64;
            let edges: Vec<Edge> = links
                .iter()
                .map(|&(l, l_rev, r, r_rev)| {
                    Edge(
                        Handle::pack(l as u64 % n + 1, l_rev),
                        Handle::pack(r as u64 % n + 1, r_rev),
                    )
                })
                .collect();

            let graph_1 = build_graph(&seqs, &edges, false);
            let graph_2 = build_graph(&seqs, &edges, true);

            let same = gfa_string(&graph_1, true) == gfa_string(&graph_2, true)
                && gfa_string(&graph_1, false) == gfa_string(&graph_2, false);

            TestResult::from_bool(same)
        }
    }
}
