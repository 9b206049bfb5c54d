/*!

Copying the nodes, edges, and paths of one graph into another,
using only the capability traits.

Handles are always rebuilt from their node ID and orientation in the
destination graph, so the source and destination may be different
backends.

*/

use bstr::BString;

#[allow(unused_imports)]
use log::{debug, trace};

use crate::error::{HandleGraphError, Result};
use crate::handle::{Edge, Handle, NodeId};
use crate::handlegraph::HandleGraph;
use crate::mutablehandlegraph::AdditiveHandleGraph;
use crate::pathhandlegraph::{
    MutablePathHandleGraph, PathHandleGraph, PathId, PathMetadata, PathSense,
};

use super::topological_sort::{head_nodes, tail_nodes};

#[inline]
fn shifted(handle: Handle, offset: u64) -> Handle {
    Handle::pack(handle.id() + offset, handle.is_reverse())
}

fn copy_nodes_and_edges<G, M>(from: &G, into: &mut M, offset: u64)
where
    G: HandleGraph,
    M: AdditiveHandleGraph,
{
    from.for_each_handle(|handle| {
        into.create_handle(&from.sequence(handle), handle.id() + offset);
        true
    });

    from.for_each_edge(|Edge(left, right)| {
        into.create_edge(Edge(shifted(left, offset), shifted(right, offset)));
        true
    });
}

/// Copy all nodes and edges of `from` into `into`, keeping node IDs.
/// `into` must not contain any of the IDs in `from`.
pub fn copy_handle_graph<G, M>(from: &G, into: &mut M)
where
    G: HandleGraph,
    M: AdditiveHandleGraph,
{
    copy_nodes_and_edges(from, into, 0);
}

// references first, then generic paths, then haplotypes
fn paths_by_sense<G: PathHandleGraph>(graph: &G) -> Vec<PathId> {
    let rank = |sense: PathSense| match sense {
        PathSense::Reference => 0,
        PathSense::Generic => 1,
        PathSense::Haplotype => 2,
    };

    let mut paths: Vec<(u8, PathId)> = graph
        .path_ids()
        .into_iter()
        .map(|p| {
            let sense = graph
                .path_metadata(p)
                .map(|m| m.sense)
                .unwrap_or(PathSense::Generic);
            (rank(sense), p)
        })
        .collect();
    paths.sort();
    paths.into_iter().map(|(_, p)| p).collect()
}

fn create_matching_path<G, M>(
    from: &G,
    path: PathId,
    into: &mut M,
) -> Result<PathId>
where
    G: PathHandleGraph,
    M: MutablePathHandleGraph,
{
    let name = from
        .path_name(path)
        .ok_or(HandleGraphError::MissingPath(path))?
        .to_vec();
    let circular = from.is_circular(path);

    // keep the metadata if it spells the same name
    let same_name = |meta: &PathMetadata| {
        meta.path_name()
            .map(|n| n.as_slice() == name.as_slice())
            .unwrap_or(false)
    };

    let created = match from.path_metadata(path) {
        Some(meta) if same_name(&meta) => {
            into.create_path_with_metadata(&meta, circular)
        }
        _ => into.create_path(&name, circular),
    };

    created.ok_or_else(|| HandleGraphError::DuplicatePath(BString::from(name)))
}

fn append_path_steps<G, M>(
    from: &G,
    from_path: PathId,
    into: &mut M,
    into_path: PathId,
    offset: u64,
) where
    G: PathHandleGraph,
    M: MutablePathHandleGraph,
{
    for handle in from.path_handles(from_path) {
        into.append_step(into_path, shifted(handle, offset));
    }
}

/// Copy the path `path` of `from` into `into`, with the same name,
/// metadata, and circularity. The nodes of the path must already
/// exist in `into`.
pub fn copy_path<G, M>(from: &G, path: PathId, into: &mut M) -> Result<PathId>
where
    G: PathHandleGraph,
    M: MutablePathHandleGraph,
{
    let into_path = create_matching_path(from, path, into)?;
    append_path_steps(from, path, into, into_path, 0);
    Ok(into_path)
}

/// Copy all nodes, edges, and paths of `from` into `into`.
pub fn copy_path_handle_graph<G, M>(from: &G, into: &mut M) -> Result<()>
where
    G: PathHandleGraph,
    M: MutablePathHandleGraph + AdditiveHandleGraph,
{
    copy_handle_graph(from, into);

    for path in paths_by_sense(from) {
        copy_path(from, path, into)?;
    }

    Ok(())
}

/// Add the nodes and edges of `from` after those of `into`, and
/// connect every tail of `into` to every head of `from`.
///
/// The IDs of `from` are shifted by the max ID of `into`, which is
/// returned.
pub fn append_handle_graph<G, M>(from: &G, into: &mut M) -> NodeId
where
    G: HandleGraph,
    M: HandleGraph + AdditiveHandleGraph,
{
    let offset = u64::from(into.max_node_id());
    let tails = tail_nodes(into);
    let heads = head_nodes(from);

    copy_nodes_and_edges(from, into, offset);

    for &tail in tails.iter() {
        for &head in heads.iter() {
            into.create_edge(Edge(tail, shifted(head, offset)));
        }
    }

    debug!(
        "appended {} nodes at offset {}, joining {} tails to {} heads",
        from.node_count(),
        offset,
        tails.len(),
        heads.len()
    );

    NodeId::from(offset)
}

/// Append `from` to `into` like [`append_handle_graph`], and also
/// its paths. A path in `from` that shares its name with a path in
/// `into` is appended to that path; the others are copied.
///
/// If `only_connect_path_tips` is `true`, the only edges added
/// between the two graphs join the last step of each shared path in
/// `into` to the first step of its continuation from `from`. The
/// offset used for the IDs of `from` is returned.
pub fn append_path_handle_graph<G, M>(
    from: &G,
    into: &mut M,
    only_connect_path_tips: bool,
) -> Result<NodeId>
where
    G: PathHandleGraph,
    M: MutablePathHandleGraph + AdditiveHandleGraph,
{
    let offset = u64::from(into.max_node_id());
    let tails = tail_nodes(into);
    let heads = head_nodes(from);

    copy_nodes_and_edges(from, into, offset);

    let mut joins: Vec<Edge> = Vec::new();

    for path in paths_by_sense(from) {
        let name = from
            .path_name(path)
            .ok_or(HandleGraphError::MissingPath(path))?
            .to_vec();

        match into.name_to_path_id(&name) {
            Some(into_path) => {
                let last = into.handle_of_step(&into.path_back(into_path));
                let first = from
                    .handle_of_step(&from.path_begin(path))
                    .map(|h| shifted(h, offset));

                if let (Some(last), Some(first)) = (last, first) {
                    joins.push(Edge(last, first));
                }

                trace!("appending path {}", BString::from(name));
                append_path_steps(from, path, into, into_path, offset);
            }
            None => {
                let into_path = create_matching_path(from, path, into)?;
                append_path_steps(from, path, into, into_path, offset);
            }
        }
    }

    if only_connect_path_tips {
        for edge in joins {
            into.create_edge(edge);
        }
    } else {
        for &tail in tails.iter() {
            for &head in heads.iter() {
                into.create_edge(Edge(tail, shifted(head, offset)));
            }
        }
    }

    Ok(NodeId::from(offset))
}

/// Add the nodes and edges of `from` that are missing in `into`.
/// Both graphs must use the same ID space.
pub fn extend<G, M>(from: &G, into: &mut M)
where
    G: HandleGraph,
    M: HandleGraph + AdditiveHandleGraph,
{
    from.for_each_handle(|handle| {
        if !into.has_node(handle.id()) {
            into.create_handle(&from.sequence(handle), handle.id());
        }
        true
    });

    from.for_each_edge(|Edge(left, right)| {
        if !into.has_edge(left, right) {
            into.create_edge(Edge(left, right));
        }
        true
    });
}
