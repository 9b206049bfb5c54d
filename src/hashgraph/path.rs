use bstr::BString;

use crate::handle::Handle;
use crate::pathhandlegraph::{PathId, PathMetadata};

/// A step on a `HashGraph` path. `Front` and `End` are the sentinels
/// before the first and after the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathStep {
    Front(PathId),
    End(PathId),
    Step(PathId, usize),
}

impl PathStep {
    pub fn index(&self) -> Option<usize> {
        if let Self::Step(_, ix) = self {
            Some(*ix)
        } else {
            None
        }
    }

    pub fn path_id(&self) -> PathId {
        match self {
            Self::Front(i) => *i,
            Self::End(i) => *i,
            Self::Step(i, _) => *i,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Path {
    pub path_id: PathId,
    pub name: BString,
    pub metadata: PathMetadata,
    pub is_circular: bool,
    pub nodes: Vec<Handle>,
}

impl Path {
    pub fn new<T: Into<BString>>(
        name: T,
        metadata: PathMetadata,
        path_id: PathId,
        is_circular: bool,
    ) -> Self {
        Path {
            name: name.into(),
            metadata,
            path_id,
            is_circular,
            nodes: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn lookup_step_handle(&self, step: &PathStep) -> Option<Handle> {
        match step {
            PathStep::Front(_) => None,
            PathStep::End(_) => None,
            PathStep::Step(_, ix) => self.nodes.get(*ix).copied(),
        }
    }
}
