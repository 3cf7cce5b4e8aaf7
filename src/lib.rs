//! Workflow expression to DAG compiler.
//!
//! A job's execution topology is written either as a plain expression
//!
//! ```text
//! A->((B->C->D),(A->F))->(G,H,X)->J; A->Y
//! ```
//!
//! or as a JSON edge list (`["1:1:A -> 1:1:C", ...]`). [`parse`] turns
//! either into a validated [`Graph`] of [`Node`]s wired between the shared
//! [`Node::START`] and [`Node::END`] sentinels; [`thumb`] renders a
//! letter-canonicalized form for display.
//!
//! ```
//! let graph = dag_expression::parse("(A,B)->C").unwrap();
//! assert_eq!(graph.node_count(), 5);
//! assert_eq!(dag_expression::thumb("Extract->Load"), "A->B");
//! ```

pub mod dag;
pub mod diagnostics;
pub mod edges;
mod error;
pub mod expr;
pub mod render;
mod thumb;

pub use dag::{Edge, Graph, GraphBuilder, Node};
pub use error::DagError;
pub use thumb::thumb;

pub type Result<T> = std::result::Result<T, DagError>;

/// Compile `expression` into a validated DAG.
///
/// The edge-list form is tried first; anything no edge-list decoder claims
/// is read as a plain expression. Every call owns its own parser state.
pub fn parse(expression: &str) -> Result<Graph> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Err(DagError::malformed("expression cannot be blank"));
    }

    let mut builder = GraphBuilder::new();
    match edges::detect(expression)? {
        Some(list) => edges::build_edge_list(&list.edges, &mut builder)?,
        None => expr::build_plain(expression, &mut builder)?,
    }

    let graph = builder.build().map_err(|e| match e {
        DagError::InvalidTopology(msg) => DagError::InvalidTopology(diagnostics::error_message(
            msg,
            expression,
        )),
        other => other,
    })?;
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        topologies = graph.topologies().len(),
        "expression compiled"
    );
    Ok(graph)
}
