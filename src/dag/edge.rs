use crate::dag::Node;
use crate::{DagError, Result};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed `source -> target` dependency between two stages.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: Node,
    pub target: Node,
}

impl Edge {
    pub fn new(source: Node, target: Node) -> Result<Self> {
        if source == target {
            return Err(DagError::invalid(format!("self loop on node {}", source)));
        }
        Ok(Self { source, target })
    }
}

/// Same text an edge-list item uses: `1:1:A -> 1:1:B`.
impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_matches_edge_list_items() {
        let edge = Edge::new(Node::START, Node::new(1, 1, "A").unwrap()).unwrap();
        assert_eq!(edge.to_string(), "0:0:Start -> 1:1:A");
    }

    #[test]
    fn self_loop_is_rejected() {
        let a = Node::new(1, 1, "A").unwrap();
        assert!(matches!(
            Edge::new(a.clone(), a),
            Err(DagError::InvalidTopology(_))
        ));
    }
}
