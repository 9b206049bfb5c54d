use fnv::FnvHashMap;

use gfa::{gfa::GFA, optfields::OptFields};

use crate::{
    handle::{Handle, NodeId},
    pathhandlegraph::{PathId, PathMetadata},
};

use super::{Node, Path};

/// A handlegraph implementation using `HashMap` to represent the
/// graph topology and nodes, and each path as a `Vec` of nodes.
#[derive(Debug, Clone)]
pub struct HashGraph {
    pub max_id: NodeId,
    pub min_id: NodeId,
    pub graph: FnvHashMap<NodeId, Node>,
    pub path_id: FnvHashMap<Vec<u8>, PathId>,
    pub paths: FnvHashMap<PathId, Path>,
    next_path_id: u64,
}

impl Default for HashGraph {
    fn default() -> HashGraph {
        HashGraph {
            max_id: NodeId::from(0),
            min_id: NodeId::from(std::u64::MAX),
            graph: Default::default(),
            path_id: Default::default(),
            paths: Default::default(),
            next_path_id: 0,
        }
    }
}

impl HashGraph {
    pub fn new() -> HashGraph {
        Default::default()
    }

    /// Build a graph from a GFA with integer segment names.
    pub fn from_gfa<T: OptFields>(gfa: &GFA<usize, T>) -> HashGraph {
        crate::conversion::from_gfa(gfa)
    }

    pub fn get_node(&self, node_id: &NodeId) -> Option<&Node> {
        self.graph.get(node_id)
    }

    pub fn get_node_unchecked(&self, node_id: &NodeId) -> &Node {
        self.graph.get(node_id).unwrap_or_else(|| {
            panic!("Tried getting a node that doesn't exist, ID: {:?}", node_id)
        })
    }

    pub fn get_node_mut(&mut self, node_id: &NodeId) -> Option<&mut Node> {
        self.graph.get_mut(node_id)
    }

    pub(super) fn get_node_mut_unchecked(&mut self, node_id: &NodeId) -> &mut Node {
        self.graph.get_mut(node_id).unwrap_or_else(|| {
            panic!("Tried getting a node that doesn't exist, ID: {:?}", node_id)
        })
    }

    pub fn get_path(&self, path_id: &PathId) -> Option<&Path> {
        self.paths.get(path_id)
    }

    pub fn get_path_unchecked(&self, path_id: &PathId) -> &Path {
        self.paths.get(path_id).unwrap_or_else(|| {
            panic!("Tried to look up nonexistent path: {:?}", path_id)
        })
    }

    pub(super) fn get_path_mut_unchecked(&mut self, path_id: &PathId) -> &mut Path {
        self.paths.get_mut(path_id).unwrap_or_else(|| {
            panic!("Tried to look up nonexistent path: {:?}", path_id)
        })
    }

    pub(super) fn insert_path(
        &mut self,
        name: &[u8],
        metadata: PathMetadata,
        circular: bool,
    ) -> Option<PathId> {
        if self.path_id.contains_key(name) {
            return None;
        }
        let path_id = PathId(self.next_path_id);
        self.next_path_id += 1;
        self.path_id.insert(name.to_vec(), path_id);
        self.paths
            .insert(path_id, Path::new(name, metadata, path_id, circular));
        Some(path_id)
    }

    /// Remove the occurrence records of a path from all of its nodes.
    pub(super) fn unindex_path(&mut self, path_id: PathId) {
        if let Some(path) = self.paths.get(&path_id) {
            for handle in path.nodes.iter() {
                if let Some(node) = self.graph.get_mut(&handle.id()) {
                    node.occurrences.remove(&path_id);
                }
            }
        }
    }

    /// Record the steps of a path on its nodes.
    pub(super) fn index_path(&mut self, path_id: PathId) {
        if let Some(path) = self.paths.get(&path_id) {
            for (ix, handle) in path.nodes.iter().enumerate() {
                if let Some(node) = self.graph.get_mut(&handle.id()) {
                    node.occurrences.entry(path_id).or_default().push(ix);
                }
            }
        }
    }

    pub(super) fn refresh_id_range(&mut self) {
        self.min_id = self
            .graph
            .keys()
            .min()
            .copied()
            .unwrap_or(NodeId(std::u64::MAX));
        self.max_id = self.graph.keys().max().copied().unwrap_or(NodeId(0));
    }

    /// Apply `f` to every handle stored on the paths that step on
    /// the node `node_id`.
    pub(super) fn map_path_steps_on_node<F>(&mut self, node_id: NodeId, f: F)
    where
        F: Fn(Handle) -> Handle,
    {
        let occurrences: Vec<(PathId, Vec<usize>)> = match self.graph.get(&node_id) {
            Some(node) => node
                .occurrences
                .iter()
                .map(|(p, ixs)| (*p, ixs.clone()))
                .collect(),
            None => return,
        };

        for (path_id, ixs) in occurrences {
            if let Some(path) = self.paths.get_mut(&path_id) {
                for ix in ixs {
                    path.nodes[ix] = f(path.nodes[ix]);
                }
            }
        }
    }
}
