use std::collections::BTreeSet;

use fnv::FnvHashMap;

use crate::handle::{Direction, Handle};
use crate::handlegraph::HandleGraph;

use super::single_stranded::orient_nodes;

struct Layout {
    out_edges: Vec<Vec<usize>>,
    in_edges: Vec<Vec<usize>>,
    out_deg: Vec<usize>,
    in_deg: Vec<usize>,
    removed: Vec<bool>,
    // (in - out, index), so the first entry has the largest out - in
    by_delta: BTreeSet<(i64, usize)>,
    sinks: Vec<usize>,
    sources: Vec<usize>,
}

impl Layout {
    fn new(out_edges: Vec<Vec<usize>>, in_edges: Vec<Vec<usize>>) -> Self {
        let n = out_edges.len();
        let out_deg: Vec<usize> = out_edges.iter().map(|e| e.len()).collect();
        let in_deg: Vec<usize> = in_edges.iter().map(|e| e.len()).collect();

        let by_delta = (0..n)
            .map(|i| (in_deg[i] as i64 - out_deg[i] as i64, i))
            .collect();

        let sinks = (0..n).rev().filter(|&i| out_deg[i] == 0).collect();
        let sources = (0..n).rev().filter(|&i| in_deg[i] == 0).collect();

        Layout {
            out_edges,
            in_edges,
            out_deg,
            in_deg,
            removed: vec![false; n],
            by_delta,
            sinks,
            sources,
        }
    }

    fn key(&self, i: usize) -> (i64, usize) {
        (self.in_deg[i] as i64 - self.out_deg[i] as i64, i)
    }

    fn remove(&mut self, i: usize) {
        let key = self.key(i);
        self.by_delta.remove(&key);
        self.removed[i] = true;

        for ix in 0..self.out_edges[i].len() {
            let j = self.out_edges[i][ix];
            if !self.removed[j] {
                let key = self.key(j);
                self.by_delta.remove(&key);
                self.in_deg[j] -= 1;
                let key = self.key(j);
                self.by_delta.insert(key);
                if self.in_deg[j] == 0 {
                    self.sources.push(j);
                }
            }
        }

        for ix in 0..self.in_edges[i].len() {
            let j = self.in_edges[i][ix];
            if !self.removed[j] {
                let key = self.key(j);
                self.by_delta.remove(&key);
                self.out_deg[j] -= 1;
                let key = self.key(j);
                self.by_delta.insert(key);
                if self.out_deg[j] == 0 {
                    self.sinks.push(j);
                }
            }
        }
    }

    /// Returns the order of the vertices.
    fn run(mut self) -> Vec<usize> {
        let n = self.removed.len();
        let mut front: Vec<usize> = Vec::with_capacity(n);
        let mut back: Vec<usize> = Vec::new();

        while !self.by_delta.is_empty() {
            while let Some(i) = self.sinks.pop() {
                if !self.removed[i] {
                    self.remove(i);
                    back.push(i);
                }
            }

            while let Some(i) = self.sources.pop() {
                if !self.removed[i] {
                    self.remove(i);
                    front.push(i);
                }
            }

            if let Some(&(_, i)) = self.by_delta.iter().next() {
                self.remove(i);
                front.push(i);
            }
        }

        front.extend(back.into_iter().rev());
        front
    }
}

/// Lay out the handles of the graph so that few edges point
/// backward, using the Eades-Lin-Smyth heuristic for the minimum
/// feedback arc set.
///
/// Handles are oriented with
/// [`single_stranded_orientation`](super::single_stranded_orientation),
/// so the layout is only meaningful on single-stranded graphs;
/// others are laid out using forward handles.
pub fn eades_algorithm<G: HandleGraph>(graph: &G) -> Vec<Handle> {
    let handles = orient_nodes(graph).unwrap_or_else(|_| graph.handles());

    let index: FnvHashMap<Handle, usize> = handles
        .iter()
        .enumerate()
        .map(|(ix, &h)| (h, ix))
        .collect();

    let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); handles.len()];
    let mut in_edges: Vec<Vec<usize>> = vec![Vec::new(); handles.len()];

    for (i, &handle) in handles.iter().enumerate() {
        graph.follow_edges(handle, Direction::Right, |next| {
            if let Some(&j) = index.get(&next) {
                // self-loops can't be avoided by any layout
                if i != j {
                    out_edges[i].push(j);
                    in_edges[j].push(i);
                }
            }
            true
        });
    }

    Layout::new(out_edges, in_edges)
        .run()
        .into_iter()
        .map(|ix| handles[ix])
        .collect()
}
