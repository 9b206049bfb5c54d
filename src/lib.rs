/*!
Algorithms on bidirected sequence graphs, written against a small
set of capability traits in the style of
[`libhandlegraph`](https://github.com/vgteam/libhandlegraph).

# Overview

A bidirected sequence graph has nodes that carry DNA sequence, and
edges that connect node *sides*, so every node can be traversed in
its forward or its reverse-complement orientation. Paths, named
walks through the graph, can be embedded on top.

The algorithms in [`algorithms`] are written once against the
traits, and work on any graph that implements them. A
`HashMap`-based implementation, [`HashGraph`](hashgraph::HashGraph),
is provided.

# The interface

The handlegraph interface is split into three categories, each
consisting of a number of traits that encapsulate a subset of the
functionality implied by their category.

* [`handlegraph`] is for immutable access to the nodes and edges of a graph
* [`mutablehandlegraph`] is for mutable access to nodes and edges
* [`pathhandlegraph`] is for both immutable and mutable access to the paths embedded in a graph

Algorithms only require the traits they use, e.g.
[`dijkstra`](algorithms::dijkstra::dijkstra) only needs
[`HandleGraph`](handlegraph::HandleGraph), while
[`unchop`](algorithms::unchop::unchop) needs both node and path
mutation.

# `Handle`s and `NodeId`s

The core types, used all over the various traits, are defined in [`handle`]:

* [`NodeId`](handle::NodeId) is a newtype used as a node identifier
* [`Handle`](handle::Handle) represents a specific orientation of a node
* [`Edge`](handle::Edge) is a newtype for edges in a specific order

# Misc.

* [`conversion`] builds graphs from parsed GFA
* [`subgraph`] restricts a graph to a subset of its nodes
* [`error`] has the error type returned when an operation is used outside its preconditions

*/

pub mod error;
pub mod handle;

pub mod handlegraph;
pub mod mutablehandlegraph;
pub mod pathhandlegraph;

pub mod hashgraph;
pub mod subgraph;

pub mod conversion;
pub mod util;

pub mod algorithms;

pub use error::{HandleGraphError, Result};
