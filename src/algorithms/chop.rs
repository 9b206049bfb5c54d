use rayon::prelude::*;

#[allow(unused_imports)]
use log::{debug, trace};

use crate::handle::{Handle, NodeId};
use crate::handlegraph::HandleGraph;
use crate::mutablehandlegraph::MutableHandleGraph;

/// Divide every node longer than `max_node_length` into pieces of
/// at most that length, and renumber the nodes from 1 so that the
/// pieces of a node take its place in the ID order. Edges and paths
/// are preserved.
pub fn chop<G>(graph: &mut G, max_node_length: usize)
where
    G: HandleGraph + MutableHandleGraph,
{
    chop_with_record(graph, max_node_length, |_, _, _| {});
}

/// Like [`chop`], but calls `record_change` with the original node
/// ID, the offset into the original node, and the new forward
/// handle, for every node that was divided or renumbered.
pub fn chop_with_record<G, F>(
    graph: &mut G,
    max_node_length: usize,
    mut record_change: F,
) where
    G: HandleGraph + MutableHandleGraph,
    F: FnMut(NodeId, usize, Handle),
{
    if max_node_length == 0 {
        return;
    }

    let t = std::time::Instant::now();

    // (original rank, rank within the original node, handle)
    let mut ranked: Vec<(usize, usize, Handle)> =
        Vec::with_capacity(graph.node_count());
    let mut to_chop: Vec<(usize, Handle)> = Vec::new();
    let mut original_ids: Vec<NodeId> = Vec::with_capacity(graph.node_count());

    for (rank, handle) in graph.handles().into_iter().enumerate() {
        original_ids.push(handle.id());
        if graph.length(handle) > max_node_length {
            to_chop.push((rank, handle));
        } else {
            ranked.push((rank, 0, handle));
        }
    }

    if to_chop.is_empty() {
        return;
    }

    for &(rank, handle) in to_chop.iter() {
        let length = graph.length(handle);
        let offsets: Vec<usize> =
            (max_node_length..length).step_by(max_node_length).collect();

        let pieces = graph.divide_handle(handle, offsets);
        trace!("chopped {} into {} pieces", handle.id(), pieces.len());

        for (ix, piece) in pieces.into_iter().enumerate() {
            ranked.push((rank, ix, piece));
        }
    }

    ranked.par_sort_unstable();

    let order: Vec<Handle> = ranked.iter().map(|&(_, _, h)| h).collect();
    let ids_changed = graph.apply_ordering(&order, true);

    debug!(
        "chopped {} of {} nodes into {} nodes in {:.3} ms",
        to_chop.len(),
        original_ids.len(),
        ranked.len(),
        t.elapsed().as_secs_f64() * 1000.0
    );

    let handle_at = |new_rank: usize| {
        if ids_changed {
            Handle::pack(new_rank as u64 + 1, false)
        } else {
            ranked[new_rank].2
        }
    };

    let mut new_rank = 0;
    while new_rank < ranked.len() {
        let original_rank = ranked[new_rank].0;
        let end = new_rank
            + ranked[new_rank..]
                .iter()
                .take_while(|&&(r, _, _)| r == original_rank)
                .count();
        let was_split = end - new_rank > 1;

        let mut offset = 0;
        for rank in new_rank..end {
            let handle = handle_at(rank);
            if ids_changed || was_split {
                record_change(original_ids[original_rank], offset, handle);
            }
            offset += graph.length(handle);
        }

        new_rank = end;
    }
}
