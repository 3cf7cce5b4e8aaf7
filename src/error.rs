use thiserror::Error;

/// Everything that can make a workflow expression fail to compile.
///
/// Nothing is retried or partially recovered: the first error aborts the
/// whole `parse` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DagError {
    /// Syntax problems: unbalanced parentheses, dangling separators, blank
    /// topologies, malformed edge-list items or node text.
    #[error("malformed expression: {0}")]
    MalformedExpression(String),

    /// The syntax was fine but the resulting graph is not a usable DAG.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// An edge-list item names `Start` or `End`, which are reserved.
    #[error("edge-list node cannot be Start or End: {0}")]
    EdgeListSourceOrTargetIsSentinel(String),
}

impl DagError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedExpression(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidTopology(msg.into())
    }
}
