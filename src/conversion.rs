/*!

Building graphs from parsed GFA.

*/

use bstr::ByteSlice;

use crate::{
    handle::{Edge, Handle},
    mutablehandlegraph::AdditiveHandleGraph,
    pathhandlegraph::MutablePathHandleGraph,
};

use gfa::{
    gfa::{Link, Path, Segment, GFA},
    optfields::OptFields,
};

#[allow(unused_imports)]
use log::{debug, warn};

fn add_gfa_segment<G, T>(graph: &mut G, seg: &Segment<usize, T>)
where
    G: AdditiveHandleGraph,
    T: OptFields,
{
    graph.create_handle(&seg.sequence, seg.name);
}

fn add_gfa_link<G, T>(graph: &mut G, link: &Link<usize, T>)
where
    G: AdditiveHandleGraph,
    T: OptFields,
{
    let left = Handle::new(link.from_segment, link.from_orient);
    let right = Handle::new(link.to_segment, link.to_orient);
    graph.create_edge(Edge(left, right));
}

fn add_gfa_path<G, T>(graph: &mut G, path: &Path<usize, T>)
where
    G: MutablePathHandleGraph,
    T: OptFields,
{
    match graph.create_path(&path.path_name, false) {
        Some(path_id) => {
            for (seg, orient) in path.iter() {
                graph.append_step(path_id, Handle::new(seg, orient));
            }
        }
        None => warn!(
            "skipping duplicate GFA path {}",
            path.path_name.as_bstr()
        ),
    }
}

/// Construct a graph from a GFA whose segment names are integers.
/// Segments become nodes with the same IDs, links become edges, and
/// paths become embedded paths.
pub fn from_gfa<G, T>(gfa: &GFA<usize, T>) -> G
where
    G: Default + AdditiveHandleGraph + MutablePathHandleGraph,
    T: OptFields,
{
    let mut graph: G = Default::default();

    gfa.segments.iter().for_each(|s| add_gfa_segment(&mut graph, s));
    gfa.links.iter().for_each(|l| add_gfa_link(&mut graph, l));
    gfa.paths.iter().for_each(|p| add_gfa_path(&mut graph, p));

    debug!(
        "loaded GFA with {} segments, {} links, {} paths",
        gfa.segments.len(),
        gfa.links.len(),
        gfa.paths.len()
    );

    graph
}
