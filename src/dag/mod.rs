//! Graph layer: node identity, edges, the graph itself and its validation.
//!
//! Both front ends (plain expressions and edge lists) feed a
//! `GraphBuilder`; `GraphBuilder::build` runs the validator and hands back
//! an immutable `Graph`.

pub mod edge;
pub mod graph;
pub mod node;
pub mod validate;

pub use edge::Edge;
pub use graph::{Graph, GraphBuilder};
pub use node::Node;
