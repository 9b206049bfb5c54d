use std::cmp::Reverse;
use std::collections::BinaryHeap;

use fnv::{FnvHashMap, FnvHashSet};

#[allow(unused_imports)]
use log::{debug, trace};

use crate::handle::{Direction, Handle};
use crate::handlegraph::HandleGraph;

/// Closest-first search settings.
///
/// The distance to a handle is the number of bases between the end
/// of a start handle (its beginning when traversing leftward) and
/// the beginning of the handle, so start handles, and the handles
/// directly next to them, are at distance 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Dijkstra {
    /// Follow edges on the left side of each handle.
    pub traverse_leftward: bool,
    /// If the callback returns `false`, don't search past that
    /// handle, but keep searching elsewhere.
    pub prune: bool,
    /// Don't report the start handles when the search begins, only
    /// if they are reached again through a cycle.
    pub cycle_to_start: bool,
}

impl Dijkstra {
    pub fn leftward() -> Self {
        Dijkstra {
            traverse_leftward: true,
            ..Default::default()
        }
    }

    /// Visit every handle reachable from `starts`, calling `f` with
    /// each handle and its distance, in nondecreasing order of
    /// distance. Returns `false` if the search was stopped, or
    /// pruned, by `f`.
    pub fn run<G, F>(&self, graph: &G, starts: &[Handle], mut f: F) -> bool
    where
        G: HandleGraph,
        F: FnMut(Handle, usize) -> bool,
    {
        self.search(graph, starts, |handle, dist, _| f(handle, dist))
    }

    /// Like `run`, but `f` also gets the handle the search came
    /// from, which is `None` for start handles.
    fn search<G, F>(&self, graph: &G, starts: &[Handle], mut f: F) -> bool
    where
        G: HandleGraph,
        F: FnMut(Handle, usize, Option<Handle>) -> bool,
    {
        let dir = if self.traverse_leftward {
            Direction::Left
        } else {
            Direction::Right
        };

        let start_set: FnvHashSet<Handle> = starts.iter().copied().collect();
        let mut unseen_starts = if self.cycle_to_start {
            start_set.clone()
        } else {
            FnvHashSet::default()
        };

        let mut visited: FnvHashSet<Handle> = FnvHashSet::default();
        let mut queue: BinaryHeap<Reverse<(usize, Handle, Option<Handle>)>> =
            BinaryHeap::new();

        for &start in starts {
            queue.push(Reverse((0, start, None)));
        }

        let mut stopped_early = false;

        while let Some(Reverse((mut distance, current, prev))) = queue.pop() {
            if self.cycle_to_start && unseen_starts.remove(&current) {
                trace!("leaving start {} unreported", current);
            } else {
                if !visited.insert(current) {
                    continue;
                }

                if !f(current, distance, prev) {
                    if self.prune {
                        stopped_early = true;
                        continue;
                    } else {
                        return false;
                    }
                }
            }

            if !start_set.contains(&current) {
                distance += graph.length(current);
            }

            graph.follow_edges(current, dir, |next| {
                if !visited.contains(&next) {
                    queue.push(Reverse((distance, next, Some(current))));
                }
                true
            });
        }

        !stopped_early
    }
}

/// Closest-first traversal from `starts`, using the default
/// settings apart from the direction. See [`Dijkstra::run`].
pub fn dijkstra<G, F>(
    graph: &G,
    starts: &[Handle],
    traverse_leftward: bool,
    f: F,
) -> bool
where
    G: HandleGraph,
    F: FnMut(Handle, usize) -> bool,
{
    let settings = Dijkstra {
        traverse_leftward,
        ..Default::default()
    };
    settings.run(graph, starts, f)
}

/// The distance to every handle reachable from `start`.
pub fn find_shortest_paths<G: HandleGraph>(
    graph: &G,
    start: Handle,
    traverse_leftward: bool,
) -> FnvHashMap<Handle, usize> {
    let mut distances = FnvHashMap::default();
    dijkstra(graph, &[start], traverse_leftward, |handle, dist| {
        distances.insert(handle, dist);
        true
    });
    distances
}

/// Find a shortest walk from `start` to `end`, going rightward.
///
/// Returns the handles of the walk after `start`, up to and
/// including `end`, each with its distance from `start`. If `start`
/// and `end` are the same, the walk is empty. Returns `None` if
/// `end` can't be reached.
pub fn shortest_path_between<G: HandleGraph>(
    graph: &G,
    start: Handle,
    end: Handle,
) -> Option<Vec<(Handle, usize)>> {
    if start == end {
        return Some(Vec::new());
    }

    let mut reached: FnvHashMap<Handle, (Option<Handle>, usize)> =
        FnvHashMap::default();

    Dijkstra::default().search(graph, &[start], |handle, dist, prev| {
        reached.insert(handle, (prev, dist));
        handle != end
    });

    let mut path = Vec::new();
    let mut current = end;

    while current != start {
        let (prev, dist) = *reached.get(&current)?;
        path.push((current, dist));
        current = prev?;
    }

    path.reverse();
    Some(path)
}
