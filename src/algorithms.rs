/*!

Algorithms written against the handlegraph traits.

Each algorithm only requires the traits it needs, so the read-only
ones work on any [`HandleGraph`](crate::handlegraph::HandleGraph),
including [`SubHandleGraph`](crate::subgraph::SubHandleGraph)
overlays, and the mutating ones on any backend with the
corresponding mutation traits.

*/

pub mod apply_orientations;
pub mod are_equivalent;
pub mod canonical_gfa;
pub mod chop;
pub mod copy_graph;
pub mod count_walks;
pub mod dagify;
pub mod dfs;
pub mod dijkstra;
pub mod eades;
pub mod reverse_complement;
pub mod single_stranded;
pub mod split_strands;
pub mod strongly_connected_components;
pub mod topological_sort;
pub mod unchop;

pub use self::apply_orientations::apply_orientations;
pub use self::are_equivalent::{are_equivalent, are_equivalent_with_paths};
pub use self::canonical_gfa::canonical_gfa;
pub use self::chop::{chop, chop_with_record};
pub use self::copy_graph::{
    append_handle_graph, append_path_handle_graph, copy_handle_graph,
    copy_path, copy_path_handle_graph, extend,
};
pub use self::count_walks::{
    count_walks, count_walks_through_nodes, WalkCounts,
};
pub use self::dagify::{dagify, dagify_from};
pub use self::dfs::{dfs, DfsVisitor};
pub use self::dijkstra::{
    dijkstra, find_shortest_paths, shortest_path_between, Dijkstra,
};
pub use self::eades::eades_algorithm;
pub use self::reverse_complement::reverse_complement_graph;
pub use self::single_stranded::{
    is_single_stranded, single_stranded_orientation,
};
pub use self::split_strands::split_strands;
pub use self::strongly_connected_components::strongly_connected_components;
pub use self::topological_sort::{
    find_tips, head_nodes, is_acyclic, is_directed_acyclic, tail_nodes,
    topological_order,
};
pub use self::unchop::{
    concat_nodes, nodes_are_perfect_path_neighbors, simple_components, unchop,
};
