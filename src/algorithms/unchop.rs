use std::collections::VecDeque;

use fnv::{FnvHashMap, FnvHashSet};

use rayon::prelude::*;

#[allow(unused_imports)]
use log::{debug, error, info, trace};

use crate::{
    error::{HandleGraphError, Result},
    handle::{Direction, Edge, Handle, NodeId},
    handlegraph::HandleGraph,
    mutablehandlegraph::*,
    pathhandlegraph::*,
};

/// Returns `true` if every path that visits `left` continues
/// directly to `right`, in the matching orientation, and no path
/// visits `right` without coming from `left`.
pub fn nodes_are_perfect_path_neighbors<G: PathHandleGraph>(
    graph: &G,
    left: Handle,
    right: Handle,
) -> bool {
    let mut expected_next = 0usize;

    for step in graph.steps_on_handle(left) {
        let handle = match graph.handle_of_step(&step) {
            Some(handle) => handle,
            None => return false,
        };

        let step_is_rev = handle != left;

        let next_step = if step_is_rev {
            if !graph.has_previous_step(&step) {
                return false;
            }
            graph.previous_step(&step)
        } else {
            if !graph.has_next_step(&step) {
                return false;
            }
            graph.next_step(&step)
        };

        match graph.handle_of_step(&next_step) {
            Some(next) => {
                let next = if step_is_rev { next.flip() } else { next };
                if next != right {
                    return false;
                }
                expected_next += 1;
            }
            None => return false,
        }
    }

    graph.steps_on_handle(right).len() == expected_next
}

fn can_merge<G: PathHandleGraph>(graph: &G, left: Handle, right: Handle) -> bool {
    graph.degree(left, Direction::Right) == 1
        && graph.degree(right, Direction::Left) == 1
        && nodes_are_perfect_path_neighbors(graph, left, right)
}

fn single_neighbor<G: HandleGraph>(
    graph: &G,
    handle: Handle,
    dir: Direction,
) -> Option<Handle> {
    let mut neighbor = None;
    let mut count = 0;
    graph.follow_edges(handle, dir, |h| {
        neighbor = Some(h);
        count += 1;
        count < 2
    });
    if count == 1 {
        neighbor
    } else {
        None
    }
}

/// Find the maximal runs of nodes that can be merged into single
/// nodes without changing the graph's walks or paths. Each run is
/// returned in left-to-right order, with handles oriented along the
/// run. Only runs of at least `min_size` nodes are returned.
pub fn simple_components<G: PathHandleGraph>(
    graph: &G,
    min_size: usize,
) -> Vec<Vec<Handle>> {
    let mut seen: FnvHashSet<NodeId> = FnvHashSet::default();
    let mut components: Vec<Vec<Handle>> = Vec::new();

    for handle in graph.handles() {
        if !seen.insert(handle.id()) {
            continue;
        }

        let mut comp: VecDeque<Handle> = VecDeque::new();
        comp.push_back(handle);

        let mut current = handle;
        while let Some(next) = single_neighbor(graph, current, Direction::Right)
        {
            if seen.contains(&next.id()) || !can_merge(graph, current, next) {
                break;
            }
            seen.insert(next.id());
            comp.push_back(next);
            current = next;
        }

        let mut current = handle;
        while let Some(prev) = single_neighbor(graph, current, Direction::Left)
        {
            if seen.contains(&prev.id()) || !can_merge(graph, prev, current) {
                break;
            }
            seen.insert(prev.id());
            comp.push_front(prev);
            current = prev;
        }

        if comp.len() >= min_size {
            components.push(comp.into_iter().collect());
        }
    }

    components
}

/// Find the steps where a path enters and leaves the run of
/// `handles`, starting from `step`, which must be on the first
/// handle. Returns the first and last steps in path order, and
/// whether the path traverses the run in reverse.
fn run_extent<G: PathHandleGraph>(
    graph: &G,
    handles: &[Handle],
    step: G::StepHandle,
) -> Option<(G::StepHandle, G::StepHandle, bool)> {
    let front = *handles.first()?;
    let runs_reverse = graph.handle_of_step(&step)? != front;

    let mut back_step = step;

    for &expected in handles[1..].iter() {
        back_step = if runs_reverse {
            if !graph.has_previous_step(&back_step) {
                return None;
            }
            graph.previous_step(&back_step)
        } else {
            if !graph.has_next_step(&back_step) {
                return None;
            }
            graph.next_step(&back_step)
        };

        let handle = graph.handle_of_step(&back_step)?;
        let handle = if runs_reverse { handle.flip() } else { handle };
        if handle != expected {
            return None;
        }
    }

    if runs_reverse {
        Some((back_step, step, true))
    } else {
        Some((step, back_step, false))
    }
}

/// Merge the handles in the provided slice to a single node, whose
/// sequence is the concatenation of the handles' sequences
/// left-to-right.
///
/// The handles must be on distinct nodes, in left-to-right order,
/// with an edge between each consecutive pair, and all paths that
/// contain any of the handles must contain all other handles, in the
/// same order as in the slice (in either direction). Returns the
/// handle of the new node.
pub fn concat_nodes<G>(graph: &mut G, handles: &[Handle]) -> Result<Handle>
where
    G: AdditiveHandleGraph + SubtractiveHandleGraph + MutablePathHandleGraph,
{
    if handles.len() < 2 {
        return Err(HandleGraphError::TooFewHandles(handles.len()));
    }

    let front = handles[0];
    let back = handles[handles.len() - 1];

    let distinct: FnvHashSet<NodeId> = handles.iter().map(|h| h.id()).collect();
    if distinct.len() != handles.len()
        || !handles.windows(2).all(|w| graph.has_edge(w[0], w[1]))
    {
        return Err(HandleGraphError::NotContiguous);
    }

    // check every path before changing anything
    let front_steps = graph.steps_on_handle(front);
    for &step in front_steps.iter() {
        run_extent(graph, handles, step).ok_or(HandleGraphError::NotContiguous)?;
    }
    if handles[1..]
        .iter()
        .any(|&h| graph.steps_on_handle(h).len() != front_steps.len())
    {
        return Err(HandleGraphError::NotContiguous);
    }

    // create the new node
    let new_seq: Vec<u8> = handles
        .iter()
        .flat_map(|handle| graph.sequence(*handle))
        .collect();

    let new_handle = graph.append_handle(&new_seq);

    // create the left neighbors
    let mut left_neighbors: FnvHashSet<Handle> = FnvHashSet::default();
    for other in graph.neighbors(front, Direction::Left) {
        if other == back {
            left_neighbors.insert(new_handle);
        } else if other == front.flip() {
            left_neighbors.insert(new_handle.flip());
        } else {
            left_neighbors.insert(other);
        }
    }

    // create the right neighbors
    let mut right_neighbors: FnvHashSet<Handle> = FnvHashSet::default();
    for other in graph.neighbors(back, Direction::Right) {
        if other == front {
            // already added as a left neighbor
        } else if other == back.flip() {
            right_neighbors.insert(new_handle.flip());
        } else {
            right_neighbors.insert(other);
        }
    }

    for &other in left_neighbors.iter() {
        graph.create_edge(Edge(other, new_handle));
    }

    for &other in right_neighbors.iter() {
        graph.create_edge(Edge(new_handle, other));
    }

    // each rewrite removes one step on the front handle, and may
    // invalidate the other steps
    while let Some(step) = graph.steps_on_handle(front).into_iter().next() {
        let (from, to, runs_reverse) = run_extent(graph, handles, step)
            .ok_or(HandleGraphError::NotContiguous)?;

        let new_seg = if runs_reverse {
            new_handle.flip()
        } else {
            new_handle
        };
        graph.rewrite_segment(&from, &to, &[new_seg]);
    }

    // remove the old nodes, and their edges
    for &handle in handles.iter() {
        graph.remove_handle(handle);
    }

    trace!("merged {} nodes into {}", handles.len(), new_handle.id());

    Ok(new_handle)
}

/// Merge every run of nodes that can be merged without changing the
/// graph's walks or paths, then renumber the nodes from 1, keeping
/// the merged nodes in the position of the run they replace.
pub fn unchop<G>(graph: &mut G) -> Result<()>
where
    G: MutableHandleGraph + MutablePathHandleGraph,
{
    let t = std::time::Instant::now();

    let node_rank: FnvHashMap<NodeId, f64> = graph
        .handles()
        .into_iter()
        .enumerate()
        .map(|(rank, handle)| (handle.id(), rank as f64))
        .collect();

    let components = simple_components(graph, 2);

    debug!(
        "found {} simple components in {:.3} ms",
        components.len(),
        t.elapsed().as_secs_f64() * 1000.0
    );

    let to_merge: FnvHashSet<NodeId> = components
        .iter()
        .flat_map(|comp| comp.iter().map(|&h| h.id()))
        .collect();

    let mut ordered_handles: Vec<(f64, Handle)> = graph
        .handles()
        .into_iter()
        .filter(|handle| !to_merge.contains(&handle.id()))
        .map(|handle| (node_rank[&handle.id()], handle))
        .collect();

    let t = std::time::Instant::now();
    for comp in components.iter() {
        let rank_sum: f64 = comp.iter().map(|h| node_rank[&h.id()]).sum();
        let rank_v = rank_sum / (comp.len() as f64);

        let merged = concat_nodes(graph, comp)?;
        ordered_handles.push((rank_v, merged.forward()));
    }
    debug!(
        "merged {} components in {:.3} ms",
        components.len(),
        t.elapsed().as_secs_f64() * 1000.0
    );

    ordered_handles.par_sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });

    let handle_order: Vec<Handle> =
        ordered_handles.into_iter().map(|(_, h)| h).collect();

    graph.apply_ordering(&handle_order, true);

    Ok(())
}
