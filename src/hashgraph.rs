/*!

A simple `HashMap`-backed graph implementing every capability
trait in the crate.

Nodes are stored in a hash map, but `for_each_handle` visits them
in ascending ID order, so results of algorithms that depend on the
iteration order are reproducible. Since there's no other internal
ordering, `apply_ordering` only has an effect when compacting IDs.

*/

use fnv::FnvHashMap;
use rayon::prelude::*;

#[allow(unused_imports)]
use log::{debug, trace, warn};

use crate::{
    handle::{Direction, Edge, Handle, NodeId},
    handlegraph::HandleGraph,
    mutablehandlegraph::*,
    pathhandlegraph::{
        MutablePathHandleGraph, PathHandleGraph, PathId, PathMetadata,
    },
    util::dna,
};

mod graph;
pub mod node;
pub mod path;

pub use self::graph::HashGraph;
pub use self::node::Node;
pub use self::path::{Path, PathStep};

impl HandleGraph for HashGraph {
    #[inline]
    fn has_node<I: Into<NodeId>>(&self, node_id: I) -> bool {
        self.graph.contains_key(&node_id.into())
    }

    #[inline]
    fn length(&self, handle: Handle) -> usize {
        self.get_node_unchecked(&handle.id()).sequence.len()
    }

    fn sequence(&self, handle: Handle) -> Vec<u8> {
        let seq = &self.get_node_unchecked(&handle.id()).sequence;
        if handle.is_reverse() {
            dna::rev_comp(seq)
        } else {
            seq.clone()
        }
    }

    #[inline]
    fn min_node_id(&self) -> NodeId {
        self.min_id
    }

    #[inline]
    fn max_node_id(&self) -> NodeId {
        self.max_id
    }

    #[inline]
    fn node_count(&self) -> usize {
        self.graph.len()
    }

    fn follow_edges<F>(&self, handle: Handle, dir: Direction, mut f: F) -> bool
    where
        F: FnMut(Handle) -> bool,
    {
        let node = self.get_node_unchecked(&handle.id());
        let handles = if handle.is_reverse() != (dir == Direction::Left) {
            &node.left_edges
        } else {
            &node.right_edges
        };

        for h in handles.iter() {
            let cont = if dir == Direction::Left {
                f(h.flip())
            } else {
                f(*h)
            };

            if !cont {
                return false;
            }
        }
        true
    }

    fn for_each_handle<F>(&self, mut f: F) -> bool
    where
        F: FnMut(Handle) -> bool,
    {
        let mut ids: Vec<NodeId> = self.graph.keys().copied().collect();
        ids.sort_unstable();

        for id in ids {
            if !f(Handle::pack(id, false)) {
                return false;
            }
        }

        true
    }

    fn for_each_handle_par<F>(&self, f: F) -> bool
    where
        Self: Sync,
        F: Fn(Handle) -> bool + Sync + Send,
    {
        self.graph
            .par_iter()
            .all(|(id, _)| f(Handle::pack(*id, false)))
    }

    fn has_edge(&self, left: Handle, right: Handle) -> bool {
        self.get_node(&left.id())
            .map(|node| node.edges_from(left).contains(&right))
            .unwrap_or(false)
    }

    fn total_length(&self) -> usize {
        self.graph.values().map(|node| node.sequence.len()).sum()
    }
}

impl AdditiveHandleGraph for HashGraph {
    fn append_handle(&mut self, sequence: &[u8]) -> Handle {
        self.create_handle(sequence, self.max_id + 1)
    }

    fn create_handle<T: Into<NodeId>>(
        &mut self,
        sequence: &[u8],
        node_id: T,
    ) -> Handle {
        let node_id: NodeId = node_id.into();
        assert!(!node_id.is_zero(), "Node IDs must be greater than zero");
        self.graph.insert(node_id, Node::new(sequence));
        self.max_id = std::cmp::max(self.max_id, node_id);
        self.min_id = std::cmp::min(self.min_id, node_id);
        Handle::pack(node_id, false)
    }

    fn create_edge(&mut self, Edge(left, right): Edge) {
        if self.has_edge(left, right) {
            return;
        }

        self.get_node_mut_unchecked(&left.id())
            .edges_from_mut(left)
            .push(right);

        // a reversing self-loop is stored only once
        if left != right.flip() {
            self.get_node_mut_unchecked(&right.id())
                .edges_from_mut(right.flip())
                .push(left.flip());
        }
    }
}

impl SubtractiveHandleGraph for HashGraph {
    fn remove_handle(&mut self, handle: Handle) -> bool {
        let node_id = handle.id();
        if !self.has_node(node_id) {
            return false;
        }

        let fwd = handle.forward();
        for edge in incident_edges(self, fwd) {
            self.remove_edge(edge);
        }

        if let Some(node) = self.graph.remove(&node_id) {
            if !node.occurrences.is_empty() {
                warn!(
                    "removed node {} while {} path steps still visit it",
                    node_id,
                    node.occurrence_count()
                );
            }
        }

        if node_id == self.min_id || node_id == self.max_id {
            self.refresh_id_range();
        }

        true
    }

    fn remove_edge(&mut self, Edge(left, right): Edge) -> bool {
        if !self.has_edge(left, right) {
            return false;
        }

        let from_left = self.get_node_mut_unchecked(&left.id()).edges_from_mut(left);
        if let Some(ix) = from_left.iter().position(|&h| h == right) {
            from_left.remove(ix);
        }

        if left != right.flip() {
            let from_right = self
                .get_node_mut_unchecked(&right.id())
                .edges_from_mut(right.flip());
            if let Some(ix) = from_right.iter().position(|&h| h == left.flip()) {
                from_right.remove(ix);
            }
        }

        true
    }

    fn clear_graph(&mut self) {
        *self = HashGraph::default();
    }
}

/// All edges touching the node of `handle`, each written with the
/// forward handle of the node on the side it attaches to. Self-loops
/// may appear twice.
fn incident_edges(graph: &HashGraph, fwd: Handle) -> Vec<Edge> {
    let mut edges = Vec::new();
    graph.follow_edges(fwd, Direction::Right, |next| {
        edges.push(Edge(fwd, next));
        true
    });
    graph.follow_edges(fwd, Direction::Left, |prev| {
        edges.push(Edge(prev, fwd));
        true
    });
    edges
}

impl MutableHandles for HashGraph {
    fn divide_handle(
        &mut self,
        handle: Handle,
        offsets: Vec<usize>,
    ) -> Vec<Handle> {
        let node_id = handle.id();
        let fwd = handle.forward();
        let len = self.length(fwd);

        let mut fwd_offsets: Vec<usize> = offsets
            .into_iter()
            .filter(|&o| o > 0 && o < len)
            .map(|o| if handle.is_reverse() { len - o } else { o })
            .collect();
        fwd_offsets.sort_unstable();
        fwd_offsets.dedup();

        if fwd_offsets.is_empty() {
            return vec![handle];
        }

        let edges = incident_edges(self, fwd);
        for &edge in edges.iter() {
            self.remove_edge(edge);
        }

        let seq = self.get_node_unchecked(&node_id).sequence.clone();

        let mut bounds = Vec::with_capacity(fwd_offsets.len() + 2);
        bounds.push(0);
        bounds.extend(fwd_offsets);
        bounds.push(len);

        self.get_node_mut_unchecked(&node_id).sequence =
            seq[bounds[0]..bounds[1]].to_vec();

        let mut pieces = vec![fwd];
        for w in bounds.windows(2).skip(1) {
            pieces.push(self.append_handle(&seq[w[0]..w[1]]));
        }

        let first = pieces[0];
        let last = pieces[pieces.len() - 1];

        // the old node's right side is now the last piece's right
        // side, and its left side the first piece's
        let map_left = |h: Handle| match (h.id() == node_id, h.is_reverse()) {
            (false, _) => h,
            (true, false) => last,
            (true, true) => first.flip(),
        };
        let map_right = |h: Handle| match (h.id() == node_id, h.is_reverse()) {
            (false, _) => h,
            (true, false) => first,
            (true, true) => last.flip(),
        };

        for Edge(l, r) in edges {
            self.create_edge(Edge(map_left(l), map_right(r)));
        }

        for w in pieces.windows(2) {
            self.create_edge(Edge(w[0], w[1]));
        }

        let path_ids: Vec<PathId> = self
            .get_node_unchecked(&node_id)
            .occurrences
            .keys()
            .copied()
            .collect();

        for path_id in path_ids {
            self.unindex_path(path_id);
            if let Some(path) = self.paths.get_mut(&path_id) {
                let mut nodes = Vec::with_capacity(path.nodes.len());
                for &h in path.nodes.iter() {
                    if h.id() != node_id {
                        nodes.push(h);
                    } else if h.is_reverse() {
                        nodes.extend(pieces.iter().rev().map(|p| p.flip()));
                    } else {
                        nodes.extend(pieces.iter().copied());
                    }
                }
                path.nodes = nodes;
            }
            self.index_path(path_id);
        }

        if handle.is_reverse() {
            pieces.into_iter().rev().map(Handle::flip).collect()
        } else {
            pieces
        }
    }

    fn apply_orientation(&mut self, handle: Handle) -> Handle {
        if !handle.is_reverse() {
            return handle;
        }

        let node_id = handle.id();
        let edges = incident_edges(self, handle.forward());
        for &edge in edges.iter() {
            self.remove_edge(edge);
        }

        let node = self.get_node_mut_unchecked(&node_id);
        node.sequence = dna::rev_comp(&node.sequence);

        let swap = |h: Handle| if h.id() == node_id { h.flip() } else { h };

        for Edge(l, r) in edges {
            self.create_edge(Edge(swap(l), swap(r)));
        }

        self.map_path_steps_on_node(node_id, swap);

        handle.flip()
    }
}

impl TransformNodeIds for HashGraph {
    fn transform_node_ids<F>(&mut self, transform: F)
    where
        F: Fn(NodeId) -> NodeId + Copy + Send + Sync,
    {
        let map = move |h: Handle| Handle::pack(transform(h.id()), h.is_reverse());

        let old_graph = std::mem::take(&mut self.graph);
        let mut graph: FnvHashMap<NodeId, Node> = FnvHashMap::default();
        graph.reserve(old_graph.len());

        for (id, mut node) in old_graph {
            node.left_edges.iter_mut().for_each(|h| *h = map(*h));
            node.right_edges.iter_mut().for_each(|h| *h = map(*h));
            graph.insert(transform(id), node);
        }
        self.graph = graph;

        self.paths.par_iter_mut().for_each(|(_, path)| {
            path.nodes.iter_mut().for_each(|h| *h = map(*h));
        });

        self.refresh_id_range();
    }

    fn apply_ordering(&mut self, order: &[Handle], compact_ids: bool) -> bool {
        if !compact_ids {
            return false;
        }

        debug_assert_eq!(order.len(), self.node_count());

        let new_ids: FnvHashMap<NodeId, NodeId> = order
            .iter()
            .enumerate()
            .map(|(ix, h)| (h.id(), NodeId::from(ix as u64 + 1)))
            .collect();

        if new_ids.iter().all(|(old, new)| old == new) {
            return false;
        }

        let new_ids = &new_ids;
        self.transform_node_ids(|id| new_ids.get(&id).copied().unwrap_or(id));
        true
    }
}

impl PathHandleGraph for HashGraph {
    type StepHandle = PathStep;

    fn path_count(&self) -> usize {
        self.paths.len()
    }

    fn has_path(&self, name: &[u8]) -> bool {
        self.path_id.contains_key(name)
    }

    fn name_to_path_id(&self, name: &[u8]) -> Option<PathId> {
        self.path_id.get(name).copied()
    }

    fn path_name(&self, path: PathId) -> Option<&[u8]> {
        self.paths.get(&path).map(|p| p.name.as_slice())
    }

    fn is_circular(&self, path: PathId) -> bool {
        self.paths.get(&path).map(|p| p.is_circular).unwrap_or(false)
    }

    fn step_count(&self, path: PathId) -> usize {
        self.paths.get(&path).map(|p| p.len()).unwrap_or(0)
    }

    fn handle_of_step(&self, step: &PathStep) -> Option<Handle> {
        self.paths.get(&step.path_id())?.lookup_step_handle(step)
    }

    fn path_of_step(&self, step: &PathStep) -> PathId {
        step.path_id()
    }

    fn path_begin(&self, path: PathId) -> PathStep {
        if self.step_count(path) == 0 {
            PathStep::End(path)
        } else {
            PathStep::Step(path, 0)
        }
    }

    fn path_end(&self, path: PathId) -> PathStep {
        PathStep::End(path)
    }

    fn path_back(&self, path: PathId) -> PathStep {
        match self.step_count(path) {
            0 => PathStep::Front(path),
            n => PathStep::Step(path, n - 1),
        }
    }

    fn path_front_end(&self, path: PathId) -> PathStep {
        PathStep::Front(path)
    }

    fn has_next_step(&self, step: &PathStep) -> bool {
        match *step {
            PathStep::Front(path) => self.step_count(path) > 0,
            PathStep::End(_) => false,
            PathStep::Step(path, ix) => {
                self.is_circular(path) || ix + 1 < self.step_count(path)
            }
        }
    }

    fn has_previous_step(&self, step: &PathStep) -> bool {
        match *step {
            PathStep::Front(_) => false,
            PathStep::End(path) => self.step_count(path) > 0,
            PathStep::Step(path, ix) => self.is_circular(path) || ix > 0,
        }
    }

    fn next_step(&self, step: &PathStep) -> PathStep {
        match *step {
            PathStep::Front(path) => self.path_begin(path),
            PathStep::End(path) => PathStep::End(path),
            PathStep::Step(path, ix) => {
                if ix + 1 < self.step_count(path) {
                    PathStep::Step(path, ix + 1)
                } else if self.is_circular(path) {
                    PathStep::Step(path, 0)
                } else {
                    PathStep::End(path)
                }
            }
        }
    }

    fn previous_step(&self, step: &PathStep) -> PathStep {
        match *step {
            PathStep::Front(path) => PathStep::Front(path),
            PathStep::End(path) => self.path_back(path),
            PathStep::Step(path, ix) => {
                if ix > 0 {
                    PathStep::Step(path, ix - 1)
                } else if self.is_circular(path) {
                    self.path_back(path)
                } else {
                    PathStep::Front(path)
                }
            }
        }
    }

    fn for_each_path<F>(&self, mut f: F) -> bool
    where
        F: FnMut(PathId) -> bool,
    {
        let mut ids: Vec<PathId> = self.paths.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter().all(|p| f(p))
    }

    fn for_each_step_on_handle<F>(&self, handle: Handle, mut f: F) -> bool
    where
        F: FnMut(PathStep) -> bool,
    {
        let node = self.get_node_unchecked(&handle.id());
        let mut steps: Vec<PathStep> = node
            .occurrences
            .iter()
            .flat_map(|(path, ixs)| {
                ixs.iter().map(move |&ix| PathStep::Step(*path, ix))
            })
            .collect();
        steps.sort_unstable();
        steps.into_iter().all(|s| f(s))
    }

    fn path_metadata(&self, path: PathId) -> Option<PathMetadata> {
        self.paths.get(&path).map(|p| p.metadata.clone())
    }
}

impl MutablePathHandleGraph for HashGraph {
    fn create_path(&mut self, name: &[u8], circular: bool) -> Option<PathId> {
        self.insert_path(name, PathMetadata::parse(name), circular)
    }

    fn create_path_with_metadata(
        &mut self,
        metadata: &PathMetadata,
        circular: bool,
    ) -> Option<PathId> {
        let name = metadata.path_name().ok()?;
        self.insert_path(&name, metadata.clone(), circular)
    }

    fn destroy_path(&mut self, path: PathId) -> bool {
        self.unindex_path(path);
        match self.paths.remove(&path) {
            Some(removed) => {
                self.path_id.remove(removed.name.as_slice());
                true
            }
            None => false,
        }
    }

    fn append_step(&mut self, path_id: PathId, handle: Handle) -> PathStep {
        let path = self.get_path_mut_unchecked(&path_id);
        path.nodes.push(handle);
        let ix = path.nodes.len() - 1;
        self.get_node_mut_unchecked(&handle.id())
            .occurrences
            .entry(path_id)
            .or_default()
            .push(ix);
        PathStep::Step(path_id, ix)
    }

    fn prepend_step(&mut self, path_id: PathId, handle: Handle) -> PathStep {
        self.unindex_path(path_id);
        self.get_path_mut_unchecked(&path_id).nodes.insert(0, handle);
        self.index_path(path_id);
        PathStep::Step(path_id, 0)
    }

    fn rewrite_segment(
        &mut self,
        begin: &PathStep,
        end: &PathStep,
        new_segment: &[Handle],
    ) -> (PathStep, PathStep) {
        let path_id = begin.path_id();
        assert_eq!(
            path_id,
            end.path_id(),
            "Tried to rewrite path segment between two different paths"
        );

        let len = self.step_count(path_id);
        let is_circular = self.is_circular(path_id);

        let from = match *begin {
            PathStep::Front(_) => 0,
            PathStep::End(_) => len,
            PathStep::Step(_, ix) => ix,
        };
        // exclusive end of the rewritten range
        let to = match *end {
            PathStep::Front(_) => 0,
            PathStep::End(_) => len,
            PathStep::Step(_, ix) => ix + 1,
        };

        self.unindex_path(path_id);

        let path = self.get_path_mut_unchecked(&path_id);

        // a circular segment ending on the step just before its
        // beginning covers the whole path
        let whole_circle = is_circular
            && from == to
            && matches!((*begin, *end), (PathStep::Step(..), PathStep::Step(..)));

        let seg_start = if whole_circle {
            path.nodes = new_segment.to_vec();
            0
        } else if from <= to {
            path.nodes.splice(from..to, new_segment.iter().copied());
            from
        } else {
            assert!(
                is_circular,
                "Tried to rewrite a segment that wraps around a linear path"
            );
            // keep the part between the end and the beginning, and
            // let the new segment close the circle
            let mut nodes: Vec<Handle> = path.nodes[to..from].to_vec();
            let start = nodes.len();
            nodes.extend(new_segment.iter().copied());
            path.nodes = nodes;
            start
        };

        let new_len = path.nodes.len();

        self.index_path(path_id);

        if new_segment.is_empty() {
            let before = if seg_start == 0 {
                PathStep::Front(path_id)
            } else {
                PathStep::Step(path_id, seg_start - 1)
            };
            let after = if seg_start < new_len {
                PathStep::Step(path_id, seg_start)
            } else {
                PathStep::End(path_id)
            };
            (before, after)
        } else {
            (
                PathStep::Step(path_id, seg_start),
                PathStep::Step(path_id, seg_start + new_segment.len() - 1),
            )
        }
    }

    fn set_circularity(&mut self, path: PathId, circular: bool) {
        if let Some(path) = self.paths.get_mut(&path) {
            path.is_circular = circular;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bstr::B;

    fn hnd(x: u64) -> Handle {
        Handle::pack(x, false)
    }

    fn r_hnd(x: u64) -> Handle {
        Handle::pack(x, true)
    }

    fn path_graph() -> (HashGraph, PathId) {
        let mut graph = HashGraph::new();
        let h1 = graph.append_handle(b"ACCT");
        let h2 = graph.append_handle(b"GG");
        let h3 = graph.append_handle(b"TTAC");

        graph.create_edge(Edge(h1, h2));
        graph.create_edge(Edge(h2, h3.flip()));

        let path = graph.create_path(b"path1", false).unwrap();
        graph.append_step(path, h1);
        graph.append_step(path, h2);
        graph.append_step(path, h3.flip());

        (graph, path)
    }

    #[test]
    fn edges_are_visible_from_both_ends() {
        let (graph, _) = path_graph();

        assert!(graph.has_edge(hnd(1), hnd(2)));
        assert!(graph.has_edge(hnd(2).flip(), hnd(1).flip()));
        assert!(graph.has_edge(hnd(3), r_hnd(2)));

        assert_eq!(graph.neighbors(hnd(2), Direction::Left), vec![hnd(1)]);
        assert_eq!(graph.neighbors(hnd(3), Direction::Right), vec![r_hnd(2)]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn duplicate_edges_are_ignored() {
        let (mut graph, _) = path_graph();
        graph.create_edge(Edge(hnd(1), hnd(2)));
        graph.create_edge(Edge(r_hnd(2), r_hnd(1)));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree(hnd(1), Direction::Right), 1);
    }

    #[test]
    fn self_loops_count_once() {
        let mut graph = HashGraph::new();
        let h = graph.append_handle(b"A");
        graph.create_edge(Edge(h, h));
        graph.create_edge(Edge(h, h.flip()));
        graph.create_edge(Edge(h.flip(), h));

        let mut edges = graph.edges();
        edges.sort();
        assert_eq!(edges, vec![Edge(h, h), Edge(h, h.flip()), Edge(h.flip(), h)]);

        assert!(graph.remove_edge(Edge(h.flip(), h.flip())));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn reverse_sequence_is_reverse_complement() {
        let (graph, path) = path_graph();
        assert_eq!(graph.sequence(r_hnd(1)), b"AGGT".to_vec());
        assert_eq!(graph.path_sequence(path), b"ACCTGGGTAA".to_vec());
    }

    #[test]
    fn divide_handle_keeps_edges_and_paths() {
        let (mut graph, path) = path_graph();
        let before = graph.path_sequence(path);

        let pieces = graph.divide_handle(r_hnd(3), vec![1, 3]);

        assert_eq!(pieces.len(), 3);
        let seqs: Vec<Vec<u8>> =
            pieces.iter().map(|&h| graph.sequence(h)).collect();
        assert_eq!(seqs, vec![b"G".to_vec(), b"TA".to_vec(), b"A".to_vec()]);

        assert_eq!(graph.path_sequence(path), before);
        assert_eq!(graph.step_count(path), 5);
        assert!(graph.has_edge(hnd(2), pieces[0]));
        assert!(graph.has_edge(pieces[0], pieces[1]));
        assert!(graph.has_edge(pieces[1], pieces[2]));
    }

    #[test]
    fn apply_orientation_flips_node() {
        let (mut graph, path) = path_graph();
        let before = graph.path_sequence(path);

        let new = graph.apply_orientation(r_hnd(3));
        assert_eq!(new, hnd(3));
        assert_eq!(graph.sequence(hnd(3)), b"GTAA".to_vec());
        assert!(graph.has_edge(hnd(2), hnd(3)));
        assert_eq!(graph.path_handles(path), vec![hnd(1), hnd(2), hnd(3)]);
        assert_eq!(graph.path_sequence(path), before);
    }

    #[test]
    fn remove_handle_removes_edges() {
        let (mut graph, path) = path_graph();
        graph.destroy_path(path);
        assert!(graph.remove_handle(hnd(2)));
        assert!(!graph.has_node(2u64));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.neighbors(hnd(1), Direction::Right), vec![]);
        assert!(!graph.remove_handle(hnd(2)));
    }

    #[test]
    fn apply_ordering_compacts_ids() {
        let mut graph = HashGraph::new();
        let a = graph.create_handle(b"A", 10u64);
        let b = graph.create_handle(b"C", 20u64);
        graph.create_edge(Edge(a, b));
        let path = graph.create_path(b"p", false).unwrap();
        graph.append_step(path, a);
        graph.append_step(path, b);

        assert!(graph.apply_ordering(&[b, a], true));
        assert_eq!(graph.min_node_id(), NodeId(1));
        assert_eq!(graph.max_node_id(), NodeId(2));
        assert_eq!(graph.sequence(hnd(1)), b"C".to_vec());
        assert!(graph.has_edge(hnd(2), hnd(1)));
        assert_eq!(graph.path_handles(path), vec![hnd(2), hnd(1)]);

        assert!(!graph.apply_ordering(&[hnd(1), hnd(2)], true));
    }

    #[test]
    fn path_steps_and_sentinels() {
        let (graph, path) = path_graph();

        let begin = graph.path_begin(path);
        assert_eq!(begin, PathStep::Step(path, 0));
        assert!(!graph.has_previous_step(&begin));
        assert_eq!(graph.previous_step(&begin), PathStep::Front(path));

        let back = graph.path_back(path);
        assert!(!graph.has_next_step(&back));
        assert_eq!(graph.next_step(&back), PathStep::End(path));
        assert_eq!(graph.previous_step(&graph.next_step(&back)), back);
        assert_eq!(graph.handle_of_step(&graph.path_end(path)), None);
    }

    #[test]
    fn circular_paths_wrap() {
        let (mut graph, path) = path_graph();
        graph.set_circularity(path, true);

        let back = graph.path_back(path);
        assert!(graph.has_next_step(&back));
        assert_eq!(graph.next_step(&back), graph.path_begin(path));
        assert_eq!(graph.previous_step(&graph.path_begin(path)), back);

        let mut visited = 0;
        graph.for_each_step_in_path(path, |_| {
            visited += 1;
            true
        });
        assert_eq!(visited, 3);
    }

    #[test]
    fn rewrite_segment_updates_occurrences() {
        let (mut graph, path) = path_graph();
        let h4 = graph.append_handle(b"GGGT");

        let begin = PathStep::Step(path, 1);
        let end = PathStep::Step(path, 2);
        let (first, last) = graph.rewrite_segment(&begin, &end, &[h4]);

        assert_eq!(first, PathStep::Step(path, 1));
        assert_eq!(last, PathStep::Step(path, 1));
        assert_eq!(graph.path_handles(path), vec![hnd(1), h4]);
        assert!(graph.steps_on_handle(hnd(2)).is_empty());
        assert_eq!(graph.steps_on_handle(h4), vec![PathStep::Step(path, 1)]);
    }

    #[test]
    fn rewrite_segment_wraps_circular_path() {
        let (mut graph, path) = path_graph();
        graph.set_circularity(path, true);
        let h4 = graph.append_handle(b"CCC");

        // replace steps 2 and 0, i.e. the seam of the circle
        let begin = PathStep::Step(path, 2);
        let end = PathStep::Step(path, 0);
        graph.rewrite_segment(&begin, &end, &[h4]);

        assert_eq!(graph.path_handles(path), vec![hnd(2), h4]);
    }

    #[test]
    fn rewrite_segment_replaces_whole_circle() {
        let (mut graph, path) = path_graph();
        graph.set_circularity(path, true);
        let h4 = graph.append_handle(b"CCC");

        // from step 1 around the seam back to step 0
        let begin = PathStep::Step(path, 1);
        let end = PathStep::Step(path, 0);
        let (first, last) = graph.rewrite_segment(&begin, &end, &[h4]);

        assert_eq!(graph.path_handles(path), vec![h4]);
        assert_eq!(first, PathStep::Step(path, 0));
        assert_eq!(last, PathStep::Step(path, 0));
        assert!(graph.steps_on_handle(hnd(1)).is_empty());
        assert!(graph.steps_on_handle(hnd(2)).is_empty());
    }

    #[test]
    fn paths_by_name_and_metadata() {
        let mut graph = HashGraph::new();
        let meta = PathMetadata::haplotype("HG002", 1, "chr1").with_phase_block(4);
        let path = graph.create_path_with_metadata(&meta, false).unwrap();

        assert!(graph.has_path(b"HG002#1#chr1"));
        assert_eq!(graph.name_to_path_id(B("HG002#1#chr1")), Some(path));
        assert_eq!(graph.path_metadata(path), Some(meta));
        assert_eq!(graph.create_path(b"HG002#1#chr1", false), None);

        assert!(graph.destroy_path(path));
        assert!(!graph.has_path(b"HG002#1#chr1"));
        assert_eq!(graph.path_count(), 0);
    }

    #[test]
    fn parallel_iteration_sees_all_handles() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let (graph, _) = path_graph();
        let total = AtomicUsize::new(0);
        graph.for_each_handle_par(|h| {
            total.fetch_add(graph.length(h), Ordering::Relaxed);
            true
        });
        assert_eq!(total.into_inner(), graph.total_length());
    }
}
