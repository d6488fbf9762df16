//! # Predecessor Graphs
//!
//! Connectivity is stored per target node as the list of edges feeding it,
//! which is the natural layout for "gather inputs, then update this neuron"
//! dynamics.
//!
//! ```rust
//! use ctrnn::graph::PredecessorGraph;
//!
//! let mut graph = PredecessorGraph::with_nodes(2);
//! graph.add_weighted_edge(0, 1, 0.5).unwrap();
//! graph.add_edge(4, 0).unwrap(); // grows the graph to 5 nodes
//!
//! assert_eq!(graph.num_nodes(), 5);
//! assert_eq!(graph.num_edges(), 2);
//! assert_eq!(graph.predecessors(1).unwrap()[0].weight, 0.5);
//! ```

mod edge_list;
mod predecessor;

pub use predecessor::{EdgeTail, NodeId, PredecessorGraph, DEFAULT_WEIGHT};
