use fnv::{FnvHashMap, FnvHashSet};

#[allow(unused_imports)]
use log::{debug, trace};

use crate::error::{HandleGraphError, Result};
use crate::handle::{Edge, Handle, NodeId};
use crate::handlegraph::HandleGraph;
use crate::mutablehandlegraph::{AdditiveHandleGraph, SubtractiveHandleGraph};
use crate::subgraph::SubHandleGraph;

use super::dfs::{dfs, DfsVisitor};
use super::eades::eades_algorithm;
use super::single_stranded::require_single_stranded;
use super::strongly_connected_components::strongly_connected_components;

/// Maps each node in the new graph to the node it copies.
pub type Translator = FnvHashMap<NodeId, NodeId>;

/// Maps each handle in the original graph, in its assigned
/// orientation, to its copies in the new graph, in order.
type Injector = FnvHashMap<Handle, Vec<Handle>>;

/// A strongly connected component laid out so that most edges
/// point forward.
struct ComponentLayout {
    layout: Vec<Handle>,
    lengths: Vec<i64>,
    forward_edges: Vec<Vec<usize>>,
    backward_edges: Vec<(usize, usize)>,
}

impl ComponentLayout {
    fn new<G: HandleGraph>(
        graph: &G,
        component: &FnvHashSet<NodeId>,
        reversed: &FnvHashSet<NodeId>,
    ) -> Self {
        let mut ids: Vec<NodeId> = component.iter().copied().collect();
        ids.sort_unstable();
        let subgraph = SubHandleGraph::with_nodes(graph, ids);

        let mut layout = eades_algorithm(&subgraph);

        // match the orientation used for the rest of the graph
        if let Some(&first) = layout.first() {
            if first.is_reverse() != reversed.contains(&first.id()) {
                layout.reverse();
                layout.iter_mut().for_each(|h| *h = h.flip());
            }
        }

        let ordering: FnvHashMap<Handle, usize> =
            layout.iter().enumerate().map(|(ix, &h)| (h, ix)).collect();

        let mut forward_edges: Vec<Vec<usize>> = vec![Vec::new(); layout.len()];
        let mut backward_edges: Vec<(usize, usize)> = Vec::new();

        subgraph.for_each_edge(|Edge(left, right)| {
            let indices = match (ordering.get(&left), ordering.get(&right)) {
                (Some(&i), Some(&j)) => Some((i, j)),
                _ => ordering
                    .get(&right.flip())
                    .copied()
                    .zip(ordering.get(&left.flip()).copied()),
            };

            if let Some((i, j)) = indices {
                if i < j {
                    forward_edges[i].push(j);
                } else {
                    backward_edges.push((i, j));
                }
            }
            true
        });

        let lengths = layout.iter().map(|&h| graph.length(h) as i64).collect();

        ComponentLayout {
            layout,
            lengths,
            forward_edges,
            backward_edges,
        }
    }

    /// A handle on a cycle made only of empty nodes, if there is one.
    /// Walks around such a cycle never get longer, so the copies
    /// could never stop.
    fn empty_cycle(&self) -> Option<Handle> {
        let size = self.layout.len();
        let empty: Vec<bool> = self.lengths.iter().map(|&l| l == 0).collect();

        let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); size];
        let mut in_degree: Vec<usize> = vec![0; size];

        let forward = self
            .forward_edges
            .iter()
            .enumerate()
            .flat_map(|(i, targets)| targets.iter().map(move |&j| (i, j)));

        for (i, j) in forward.chain(self.backward_edges.iter().copied()) {
            if empty[i] && empty[j] {
                out_edges[i].push(j);
                in_degree[j] += 1;
            }
        }

        let mut stack: Vec<usize> =
            (0..size).filter(|&i| empty[i] && in_degree[i] == 0).collect();
        let mut removed = vec![false; size];

        while let Some(i) = stack.pop() {
            removed[i] = true;
            for &j in out_edges[i].iter() {
                in_degree[j] -= 1;
                if in_degree[j] == 0 {
                    stack.push(j);
                }
            }
        }

        (0..size)
            .find(|&i| empty[i] && !removed[i])
            .map(|i| self.layout[i])
    }
}

fn last_copy(injector: &Injector, handle: Handle) -> Option<Handle> {
    injector.get(&handle).and_then(|copies| copies.last().copied())
}

/// Add one copy of the component's nodes and the forward edges
/// between them, connected to the previous copy by the backward
/// edges.
fn add_copy<G, M>(
    graph: &G,
    into: &mut M,
    comp: &ComponentLayout,
    translator: &mut Translator,
    injector: &mut Injector,
    first_copy: bool,
) where
    G: HandleGraph,
    M: AdditiveHandleGraph,
{
    for &original in comp.layout.iter() {
        let new_handle = into.append_handle(&graph.sequence(original.forward()));
        let new_handle = if original.is_reverse() {
            new_handle.flip()
        } else {
            new_handle
        };

        trace!("{} duplicated to {}", original, new_handle);

        translator.insert(new_handle.id(), original.id());
        injector.entry(original).or_default().push(new_handle);
    }

    for (i, targets) in comp.forward_edges.iter().enumerate() {
        if let Some(from) = last_copy(injector, comp.layout[i]) {
            for &j in targets.iter() {
                if let Some(to) = last_copy(injector, comp.layout[j]) {
                    into.create_edge(Edge(from, to));
                }
            }
        }
    }

    if !first_copy {
        for &(i, j) in comp.backward_edges.iter() {
            let from_copies = &injector[&comp.layout[i]];
            let from = from_copies[from_copies.len() - 2];
            if let Some(to) = last_copy(injector, comp.layout[j]) {
                into.create_edge(Edge(from, to));
            }
        }
    }
}

fn dagify_internal<G, M>(
    graph: &G,
    into: &mut M,
    min_preserved_path_length: usize,
) -> Result<(Translator, Injector)>
where
    G: HandleGraph,
    M: AdditiveHandleGraph,
{
    let t = std::time::Instant::now();

    let orientation = require_single_stranded(graph)?;

    let reversed: FnvHashSet<NodeId> = orientation
        .iter()
        .filter(|h| h.is_reverse())
        .map(|h| h.id())
        .collect();

    let components = strongly_connected_components(graph);

    let mut component_of: FnvHashMap<NodeId, usize> = FnvHashMap::default();
    let mut translator: Translator = FnvHashMap::default();
    let mut injector: Injector = FnvHashMap::default();

    let min_length = min_preserved_path_length as i64;

    let layouts: Vec<ComponentLayout> = components
        .iter()
        .map(|component| ComponentLayout::new(graph, component, &reversed))
        .collect();

    // with nothing to preserve, one copy of each component is enough
    if min_length > 0 {
        if let Some(handle) = layouts.iter().find_map(|c| c.empty_cycle()) {
            return Err(HandleGraphError::EmptyCycle(handle.id()));
        }
    }

    for (comp_ix, (component, comp)) in
        components.iter().zip(layouts.iter()).enumerate()
    {
        for &id in component.iter() {
            component_of.insert(id, comp_ix);
        }

        let size = comp.layout.len();

        // distances within the current copy, and to the next copy,
        // measured from the ends of the backward edges' sources
        let mut distances: Vec<i64> = vec![i64::MAX; size];
        let mut next_distances: Vec<i64> = vec![i64::MAX; size];

        for &(i, _) in comp.backward_edges.iter() {
            distances[i] = -comp.lengths[i];
        }

        let mut min_relaxed_dist: i64 = -1;
        let mut copy_num = 0;

        while min_relaxed_dist < min_length {
            add_copy(
                graph,
                into,
                comp,
                &mut translator,
                &mut injector,
                copy_num == 0,
            );

            for i in 0..size {
                if distances[i] == i64::MAX {
                    continue;
                }
                let dist_thru = distances[i] + comp.lengths[i];
                for &j in comp.forward_edges[i].iter() {
                    distances[j] = distances[j].min(dist_thru);
                }
            }

            min_relaxed_dist = i64::MAX;
            for &(i, j) in comp.backward_edges.iter() {
                if distances[i] == i64::MAX {
                    continue;
                }
                let dist_thru = distances[i] + comp.lengths[i];
                if dist_thru < next_distances[j] {
                    next_distances[j] = dist_thru;
                    min_relaxed_dist = min_relaxed_dist.min(dist_thru);
                }
            }

            std::mem::swap(&mut distances, &mut next_distances);
            next_distances.iter_mut().for_each(|d| *d = i64::MAX);
            copy_num += 1;
        }

        trace!(
            "component {} with {} nodes copied {} times",
            comp_ix,
            size,
            copy_num
        );
    }

    graph.for_each_edge(|edge| {
        let Edge(left, right) = edge;
        if component_of.get(&left.id()) == component_of.get(&right.id()) {
            return true;
        }

        let Edge(left, right) =
            if left.is_reverse() != reversed.contains(&left.id()) {
                Edge(right.flip(), left.flip())
            } else {
                edge
            };

        if let (Some(from), Some(targets)) =
            (last_copy(&injector, left), injector.get(&right))
        {
            for &to in targets.iter() {
                into.create_edge(Edge(from, to));
            }
        }
        true
    });

    debug!(
        "dagified {} nodes in {} components into {} nodes in {:.3} ms",
        graph.node_count(),
        components.len(),
        translator.len(),
        t.elapsed().as_secs_f64() * 1000.0
    );

    Ok((translator, injector))
}

/// Fill `into` with a copy of `graph`, where the strongly connected
/// components have been duplicated so that the result is acyclic,
/// while every walk in `graph` of up to `min_preserved_path_length`
/// bases is still present.
///
/// `graph` must be single-stranded, otherwise
/// `HandleGraphError::NotSingleStranded` is returned. If a cycle
/// consists only of empty nodes, and `min_preserved_path_length` is
/// not zero, `HandleGraphError::EmptyCycle` is returned and `into` is
/// left untouched. Returns a map from the node IDs in `into` to the
/// node IDs in `graph`.
pub fn dagify<G, M>(
    graph: &G,
    into: &mut M,
    min_preserved_path_length: usize,
) -> Result<Translator>
where
    G: HandleGraph,
    M: AdditiveHandleGraph,
{
    dagify_internal(graph, into, min_preserved_path_length).map(|(t, _)| t)
}

#[derive(Default)]
struct Reachable(FnvHashSet<NodeId>);

impl DfsVisitor for Reachable {
    fn begin(&mut self, handle: Handle) {
        self.0.insert(handle.id());
    }
}

/// Like [`dagify`], but only keep the part of the result that can
/// be reached by walking rightward from `starts`.
///
/// Returns the node ID map, and, for each start handle, the copy in
/// `into` from which all walks to the right are preserved.
pub fn dagify_from<G, M>(
    graph: &G,
    starts: &[Handle],
    into: &mut M,
    min_preserved_path_length: usize,
) -> Result<(Translator, Vec<Handle>)>
where
    G: HandleGraph,
    M: HandleGraph + AdditiveHandleGraph + SubtractiveHandleGraph,
{
    let (mut translator, injector) =
        dagify_internal(graph, into, min_preserved_path_length)?;

    let mut into_starts: Vec<Handle> = Vec::with_capacity(starts.len());

    for &start in starts {
        let copy = match injector.get(&start).and_then(|c| c.first()) {
            Some(&first) => first,
            // held against the assigned orientation, so the last copy
            // has every walk leading to it on its left
            None => last_copy(&injector, start.flip())
                .map(Handle::flip)
                .ok_or(HandleGraphError::MissingNode(start.id()))?,
        };
        into_starts.push(copy);
    }

    let mut reachable = Reachable::default();
    dfs(&*into, &mut reachable, &into_starts, &FnvHashSet::default());
    let reachable = reachable.0;

    let to_remove: Vec<Handle> = into
        .handles()
        .into_iter()
        .filter(|h| !reachable.contains(&h.id()))
        .collect();

    debug!(
        "removing {} of {} dagified nodes unreachable from {} starts",
        to_remove.len(),
        into.node_count(),
        starts.len()
    );

    for handle in to_remove {
        translator.remove(&handle.id());
        into.remove_handle(handle);
    }

    Ok((translator, into_starts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::topological_sort::is_directed_acyclic;
    use crate::hashgraph::HashGraph;
    use crate::util::test::*;

    use quickcheck::{quickcheck, TestResult};

    fn translated_ids(translator: &Translator) -> Vec<u64> {
        let mut ids: Vec<u64> = translator.values().map(|&id| id.into()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    #[test]
    fn dagify_single_copy_when_nothing_to_preserve() {
        let graph = cycle_graph();
        let mut into = HashGraph::new();

        let translator = dagify(&graph, &mut into, 0).unwrap();

        assert_eq!(into.node_count(), 4);
        assert_eq!(into.edge_count(), 3);
        assert_eq!(translated_ids(&translator), vec![1, 2, 3, 4]);
        assert!(is_directed_acyclic(&into));
        assert!(!is_directed_acyclic(&graph));
    }

    #[test]
    fn dagify_unrolls_cycle() {
        let graph = cycle_graph();
        let mut into = HashGraph::new();

        let translator = dagify(&graph, &mut into, 10).unwrap();

        // the cycle 1-2-3 is copied three times
        assert_eq!(into.node_count(), 10);
        assert_eq!(translator.len(), 10);
        assert_eq!(into.edge_count(), 9);
        assert_eq!(translated_ids(&translator), vec![1, 2, 3, 4]);
        assert!(is_directed_acyclic(&into));

        for h in into.handles() {
            let orig = graph.handle(translator[&h.id()], false);
            assert_eq!(into.sequence(h), graph.sequence(orig));
        }
    }

    #[test]
    fn dagify_self_loop() {
        let mut graph = HashGraph::new();
        let n1 = graph.append_handle(b"ACGT");
        graph.create_edge(Edge(n1, n1));

        let mut into = HashGraph::new();
        let translator = dagify(&graph, &mut into, 5).unwrap();

        assert_eq!(translator.len(), 3);
        assert_eq!(into.edge_count(), 2);
        assert!(is_directed_acyclic(&into));
    }

    #[test]
    fn dagify_empty_self_loop() {
        let mut graph = HashGraph::new();
        let n1 = graph.append_handle(b"");
        graph.create_edge(Edge(n1, n1));

        let mut into = HashGraph::new();
        assert_eq!(
            dagify(&graph, &mut into, 5),
            Err(HandleGraphError::EmptyCycle(NodeId::from(1u64)))
        );
        assert_eq!(into.node_count(), 0);

        let translator = dagify(&graph, &mut into, 0).unwrap();
        assert_eq!(translator.len(), 1);
        assert!(is_directed_acyclic(&into));
    }

    #[test]
    fn dagify_empty_cycle_inside_component() {
        let mut graph = HashGraph::new();
        let n1 = graph.append_handle(b"AC");
        let n2 = graph.append_handle(b"");
        let n3 = graph.append_handle(b"");
        graph.create_edge(Edge(n1, n2));
        graph.create_edge(Edge(n2, n3));
        graph.create_edge(Edge(n3, n2));
        graph.create_edge(Edge(n3, n1));

        let mut into = HashGraph::new();
        let res = dagify(&graph, &mut into, 5);
        assert!(matches!(res, Err(HandleGraphError::EmptyCycle(id))
                         if id == n2.id() || id == n3.id()));

        // the cycle through 1 is not empty, so it can be unrolled
        let mut graph = HashGraph::new();
        let n1 = graph.append_handle(b"A");
        let n2 = graph.append_handle(b"");
        graph.create_edge(Edge(n1, n2));
        graph.create_edge(Edge(n2, n1));

        let mut into = HashGraph::new();
        let translator = dagify(&graph, &mut into, 5).unwrap();
        assert_eq!(translated_ids(&translator), vec![1, 2]);
        assert!(is_directed_acyclic(&into));
    }

    #[test]
    fn dagify_keeps_dag_as_is() {
        let graph: HashGraph = test_graph_no_paths();
        let mut into = HashGraph::new();

        let translator = dagify(&graph, &mut into, 100).unwrap();

        assert_eq!(translator.len(), graph.node_count());
        assert_eq!(into.edge_count(), graph.edge_count());
        assert_eq!(into.total_length(), graph.total_length());
    }

    #[test]
    fn dagify_rejects_reversing_graph() {
        let mut graph = HashGraph::new();
        let n1 = graph.append_handle(b"AC");
        let n2 = graph.append_handle(b"GT");
        graph.create_edge(Edge(n1, n2));
        graph.create_edge(Edge(n1, n2.flip()));

        let mut into = HashGraph::new();
        let res = dagify(&graph, &mut into, 10);
        assert!(matches!(
            res,
            Err(HandleGraphError::NotSingleStranded { nodes: 2, .. })
        ));
    }

    #[test]
    fn dagify_from_drops_unreachable() {
        let graph = cycle_graph();
        let mut into = HashGraph::new();

        let (translator, starts) =
            dagify_from(&graph, &[hnd(2)], &mut into, 0).unwrap();

        assert_eq!(starts.len(), 1);
        assert_eq!(translator[&starts[0].id()], NodeId::from(2u64));
        assert_eq!(into.node_count(), 3);
        assert_eq!(translated_ids(&translator), vec![2, 3, 4]);
    }

    #[test]
    fn dagify_from_reverse_start() {
        let graph = cycle_graph();
        let mut into = HashGraph::new();

        let (translator, starts) =
            dagify_from(&graph, &[r_hnd(4)], &mut into, 0).unwrap();

        assert!(starts[0].is_reverse());
        assert_eq!(translator[&starts[0].id()], NodeId::from(4u64));
        assert_eq!(into.node_count(), 4);
    }

    quickcheck! {
        fn prop_dagify_is_acyclic(
            lengths: Vec<u8>,
            links: Vec<(u8, u8)>,
            min_length: u8
        ) -> TestResult {
            if lengths.is_empty() {
                return TestResult::discard();
            }

            let mut graph = HashGraph::new();
            for &len in lengths.iter().take(8) {
                let seq = vec![b'A'; 1 + len as usize % 4];
                graph.append_handle(&seq);
            }

            let n = graph.node_count() as u64;
            for &(l, r) in links.iter().take(16) {
                graph.create_edge(edge(l as u64 % n + 1, r as u64 % n + 1));
            }

            let mut into = HashGraph::new();
            let translator =
                match dagify(&graph, &mut into, min_length as usize % 12) {
                    Ok(translator) => translator,
                    Err(_) => return TestResult::failed(),
                };

            let all_ids: Vec<u64> = (1..=n).collect();

            TestResult::from_bool(
                is_directed_acyclic(&into)
                    && translator.len() == into.node_count()
                    && translated_ids(&translator) == all_ids,
            )
        }
    }
}
