use fnv::{FnvHashMap, FnvHashSet};

#[allow(unused_imports)]
use log::{debug, trace};

use crate::handle::{Direction, Handle, NodeId};
use crate::handlegraph::HandleGraph;

use super::dfs::{dfs, DfsVisitor};

/// Tarjan's algorithm, run over the oriented handles.
struct Tarjan<'a, G> {
    graph: &'a G,
    index: usize,
    roots: FnvHashMap<Handle, Handle>,
    discover_idx: FnvHashMap<Handle, usize>,
    stack: Vec<Handle>,
    on_stack: FnvHashSet<Handle>,
    used: FnvHashSet<NodeId>,
    components: Vec<FnvHashSet<NodeId>>,
}

impl<'a, G: HandleGraph> DfsVisitor for Tarjan<'a, G> {
    fn begin(&mut self, handle: Handle) {
        self.roots.insert(handle, handle);
        self.discover_idx.insert(handle, self.index);
        self.index += 1;
        self.stack.push(handle);
        self.on_stack.insert(handle);
    }

    fn end(&mut self, handle: Handle) {
        let mut root = self.roots[&handle];

        self.graph.follow_edges(handle, Direction::Right, |next| {
            if self.on_stack.contains(&next) {
                let next_root = self.roots[&next];
                if self.discover_idx[&next_root] < self.discover_idx[&root] {
                    root = next_root;
                }
            }
            true
        });

        self.roots.insert(handle, root);

        if root != handle {
            return;
        }

        let mut component = FnvHashSet::default();
        while let Some(other) = self.stack.pop() {
            self.on_stack.remove(&other);
            component.insert(other.id());
            if other == handle {
                break;
            }
        }

        // both strands of a component produce the same set of IDs
        if component.iter().any(|id| self.used.contains(id)) {
            trace!("skipping mirrored component with {} nodes", component.len());
            return;
        }

        self.used.extend(component.iter().copied());
        self.components.push(component);
    }
}

/// Find the strongly connected components of the graph, as sets of
/// node IDs. A node is part of a component if either of its
/// orientations is, and every node is in exactly one component.
pub fn strongly_connected_components<G: HandleGraph>(
    graph: &G,
) -> Vec<FnvHashSet<NodeId>> {
    let t = std::time::Instant::now();

    let mut tarjan = Tarjan {
        graph,
        index: 0,
        roots: FnvHashMap::default(),
        discover_idx: FnvHashMap::default(),
        stack: Vec::new(),
        on_stack: FnvHashSet::default(),
        used: FnvHashSet::default(),
        components: Vec::new(),
    };

    dfs(graph, &mut tarjan, &[], &FnvHashSet::default());

    debug!(
        "found {} strongly connected components in {:.3} ms",
        tarjan.components.len(),
        t.elapsed().as_secs_f64() * 1000.0
    );

    tarjan.components
}
