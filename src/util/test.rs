#![allow(dead_code)]
use crate::{
    handle::{Edge, Handle},
    handlegraph::HandleGraph,
    hashgraph::HashGraph,
    mutablehandlegraph::AdditiveHandleGraph,
    pathhandlegraph::{MutablePathHandleGraph, PathHandleGraph, PathId},
};

pub fn hnd(x: u64) -> Handle {
    Handle::pack(x, false)
}

pub fn r_hnd(x: u64) -> Handle {
    Handle::pack(x, true)
}

pub fn vec_hnd(v: Vec<u64>) -> Vec<Handle> {
    v.into_iter().map(hnd).collect::<Vec<_>>()
}

pub fn edge(l: u64, r: u64) -> Edge {
    Edge(hnd(l), hnd(r))
}

pub fn test_graph_no_paths<G>() -> G
where
    G: AdditiveHandleGraph + Default,
{
    use bstr::B;
    let mut graph = G::default();

    let seqs = vec![
        //                  Node
        B("GTCA"),       //  1
        B("AAGTGCTAGT"), //  2
        B("ATA"),        //  3
        B("AGTA"),       //  4
        B("GTCCA"),      //  5
        B("GGGT"),       //  6
        B("AACT"),       //  7
        B("AACAT"),      //  8
        B("AGCC"),       //  9
    ];
    /*
    1 ----- 8 --- 4 -----
      \   /   \     \     \
        2      \     \      6
      /   \     \     \   /
    5 ----- 7 --- 3 --- 9
    */

    let _handles = seqs
        .iter()
        .map(|seq| graph.append_handle(seq))
        .collect::<Vec<_>>();

    macro_rules! insert_edges {
            ($graph:ident, [$(($from:literal, $to:literal)),*]) => {
                $(
                    $graph.create_edge(edge($from, $to));
                )*
            };
        }

    insert_edges!(
        graph,
        [
            (1, 2),
            (1, 8),
            (5, 2),
            (5, 7),
            (2, 8),
            (2, 7),
            (7, 3),
            (8, 3),
            (8, 4),
            (3, 9),
            (4, 9),
            (4, 6),
            (9, 6)
        ]
    );

    graph
}

/// Two bubbles with a path through each branch.
///
/// ```text
/// 1 -> 2 -> 3 -> 4
///   \> 5 -> 6 /
/// ```
pub fn two_path_graph() -> (HashGraph, PathId, PathId) {
    let mut graph = HashGraph::new();

    let n1 = graph.append_handle(b"CAAATAAG");
    let n2 = graph.append_handle(b"A");
    let n3 = graph.append_handle(b"G");
    let n4 = graph.append_handle(b"T");
    let n5 = graph.append_handle(b"C");
    let n6 = graph.append_handle(b"TTG");

    graph.create_edge(Edge(n1, n2));
    graph.create_edge(Edge(n1, n5));
    graph.create_edge(Edge(n2, n3));
    graph.create_edge(Edge(n5, n6));
    graph.create_edge(Edge(n3, n4));
    graph.create_edge(Edge(n6, n4));

    let path_1 = graph.create_path(b"path1", false).unwrap();
    for &h in [n1, n2, n3, n4].iter() {
        graph.append_step(path_1, h);
    }

    let path_2 = graph.create_path(b"path2", false).unwrap();
    for &h in [n1, n5, n6, n4].iter() {
        graph.append_step(path_2, h);
    }

    (graph, path_1, path_2)
}

/// A simple cycle `1 -> 2 -> 3 -> 1`, with a tail `3 -> 4`.
pub fn cycle_graph() -> HashGraph {
    let mut graph = HashGraph::new();
    let n1 = graph.append_handle(b"ACG");
    let n2 = graph.append_handle(b"TT");
    let n3 = graph.append_handle(b"GCA");
    let n4 = graph.append_handle(b"T");

    graph.create_edge(Edge(n1, n2));
    graph.create_edge(Edge(n2, n3));
    graph.create_edge(Edge(n3, n1));
    graph.create_edge(Edge(n3, n4));
    graph
}

/// The spelled sequences of all paths, by name.
pub fn path_sequences<G: PathHandleGraph>(graph: &G) -> Vec<(Vec<u8>, Vec<u8>)> {
    let mut res: Vec<(Vec<u8>, Vec<u8>)> = graph
        .path_ids()
        .into_iter()
        .map(|p| {
            let name = graph.path_name(p).map(|n| n.to_vec()).unwrap_or_default();
            (name, graph.path_sequence(p))
        })
        .collect();
    res.sort();
    res
}

/// Check that the edges of a graph are symmetric.
pub fn edges_are_consistent<G: HandleGraph>(graph: &G) -> bool {
    use crate::handle::Direction;
    graph.handles().into_iter().all(|h| {
        [h, h.flip()].iter().all(|&h| {
            graph
                .neighbors(h, Direction::Right)
                .into_iter()
                .all(|next| graph.neighbors(next, Direction::Left).contains(&h))
        })
    })
}
