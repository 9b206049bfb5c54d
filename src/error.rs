/*!

Errors returned when an operation is called outside of its
preconditions.

*/

use bstr::BString;
use thiserror::Error;

use crate::handle::{Edge, Handle, NodeId};
use crate::pathhandlegraph::PathId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandleGraphError {
    #[error("handle {handle} is not an entry point of edge {edge:?}")]
    NotEdgeParticipant { edge: Edge, handle: Handle },

    #[error(
        "graph is not single-stranded: only {oriented} of {nodes} nodes could be oriented"
    )]
    NotSingleStranded { oriented: usize, nodes: usize },

    #[error(
        "node {0} is on a cycle of empty nodes, which no number of copies can unroll"
    )]
    EmptyCycle(NodeId),

    #[error("cannot merge {0} handles, at least two are required")]
    TooFewHandles(usize),

    #[error("handles to merge must form a contiguous run of distinct nodes")]
    NotContiguous,

    #[error("destination graph must be empty")]
    NonEmptyDestination,

    #[error("node {0} does not exist in the graph")]
    MissingNode(NodeId),

    #[error("path {0:?} does not exist in the graph")]
    MissingPath(PathId),

    #[error("a path named {0} already exists")]
    DuplicatePath(BString),

    #[error("invalid path metadata: {0}")]
    InvalidPathMetadata(&'static str),
}

pub type Result<T> = std::result::Result<T, HandleGraphError>;
