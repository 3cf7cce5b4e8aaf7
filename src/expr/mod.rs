//! Plain expression front end.
//!
//! ```text
//! A->((B->C->D),(A->F))->(G,H,X)->J; A->Y
//! ```
//!
//! `;` separates independent topologies, `->` separates stages, `,` joins
//! terms of one stage and parentheses group sub-graphs. Every topology is
//! normalized, then resolved and built recursively between the shared
//! `Start` and `End` sentinels.

pub mod build;
pub mod resolve;
pub mod span;
pub mod token;

use crate::dag::GraphBuilder;
use crate::diagnostics;
use crate::{DagError, Result};

use build::{TopologyBuilder, split_topologies};
use span::SpanCache;
use token::{check_parenthesis, complete_parenthesis};

/// Build every topology of `expression` into `graph`.
///
/// A fresh span cache is used per call; span ids are meaningless across
/// calls.
pub fn build_plain(expression: &str, graph: &mut GraphBuilder) -> Result<()> {
    if !check_parenthesis(expression) {
        return Err(DagError::malformed(diagnostics::error_message(
            "unbalanced parenthesis",
            expression,
        )));
    }

    let mut cache = SpanCache::new();
    for (i, topology) in split_topologies(expression)?.into_iter().enumerate() {
        let number = i as u32 + 1;
        if !check_parenthesis(topology) {
            return Err(DagError::malformed(diagnostics::error_message(
                format!("unbalanced parenthesis in topology {}", number),
                topology,
            )));
        }
        let completed = complete_parenthesis(topology);
        tracing::debug!(topology = number, expr = %completed, "normalized topology");

        let root = cache.intern(completed);
        TopologyBuilder::new(number, &mut cache, graph)
            .build(root)
            .map_err(|e| with_topology(e, number))?;
    }
    Ok(())
}

fn with_topology(err: DagError, number: u32) -> DagError {
    match err {
        DagError::MalformedExpression(msg) => {
            DagError::MalformedExpression(format!("topology {}: {}", number, msg))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::Node;
    use pretty_assertions::assert_eq;

    fn edges(expression: &str) -> Vec<String> {
        let mut graph = GraphBuilder::new();
        build_plain(expression, &mut graph).unwrap();
        graph.build().unwrap().edges().map(|e| e.to_string()).collect()
    }

    #[test]
    fn chain() {
        assert_eq!(
            edges("A->B"),
            vec!["0:0:Start -> 1:1:A", "1:1:A -> 1:1:B", "1:1:B -> 0:0:End"]
        );
    }

    #[test]
    fn deeply_wrapped_term_is_not_a_name() {
        assert_eq!(edges("(((A->B)))"), edges("A->B"));
    }

    #[test]
    fn malformed_errors_name_the_topology() {
        let mut graph = GraphBuilder::new();
        let err = build_plain("A->B; C->", &mut graph).unwrap_err();
        match err {
            DagError::MalformedExpression(msg) => assert!(msg.starts_with("topology 2:"), "{}", msg),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn reserved_names_are_rejected() {
        for expr in ["A->End", "Start->A", "A->(B,End)"] {
            let mut graph = GraphBuilder::new();
            assert!(matches!(
                build_plain(expr, &mut graph),
                Err(DagError::MalformedExpression(_))
            ));
        }
    }

    #[test]
    fn separator_only_terms_are_rejected() {
        for expr in ["A,(->),B", "A,(->->),B", "A->()", "(A)(B)", "A,,B", "A->->B"] {
            let mut graph = GraphBuilder::new();
            assert!(
                matches!(build_plain(expr, &mut graph), Err(DagError::MalformedExpression(_))),
                "{}",
                expr
            );
        }
    }

    #[test]
    fn sentinels_are_shared_between_topologies() {
        let mut graph = GraphBuilder::new();
        build_plain("A;B", &mut graph).unwrap();
        let graph = graph.build().unwrap();
        assert_eq!(graph.successors(&Node::START).count(), 2);
        assert_eq!(graph.predecessors(&Node::END).count(), 2);
    }
}
