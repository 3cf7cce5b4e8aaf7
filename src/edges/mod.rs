//! Edge-list front end.
//!
//! Some graphs cannot be written in the plain grammar, e.g. the crossing
//! fan-out `[A->C, A->D, B->D, B->E]`:
//!
//! ```text
//!                ┌─────>C──┐
//!         ┌──>A──┤         │
//!         │      └──┐      │
//!  Start──┤         ├──>D──┼──>End
//!         │      ┌──┘      │
//!         └──>B──┤         │
//!                └─────>E──┘
//! ```
//!
//! They are accepted as a JSON edge list instead. Each decoder recognises
//! one JSON shape; the first decoder whose shape matches and whose payload
//! deserialises claims the input. `Start`/`End` edges are inferred from
//! in-/out-degree after all listed edges are in.

pub mod object_array;
pub mod string_array;

use crate::dag::{Edge, GraphBuilder, Node};
use crate::diagnostics;
use crate::{DagError, Result};

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

pub use object_array::ObjectArrayDecoder;
pub use string_array::StringArrayDecoder;

/// `topology:ordinal:name` with a non-blank name.
static NODE_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\d+:\d+:.*\S.*$").expect("node text pattern"));

/// Bare names default to topology 1, ordinal 1.
const DEFAULT_PREFIX: &str = "1:1:";

pub trait EdgeListDecoder: Sync {
    fn name(&self) -> &'static str;

    /// Cheap shape test on the raw text.
    fn matches(&self, text: &str) -> bool;

    /// `Ok(None)` when the payload is not this decoder's JSON type or is an
    /// empty array. Errors are reserved for claimed inputs with bad items.
    fn decode(&self, text: &str) -> Result<Option<Vec<Edge>>>;

    /// Compact JSON in this decoder's shape.
    fn encode(&self, edges: &[Edge]) -> String;
}

pub static DECODERS: [&dyn EdgeListDecoder; 2] = [&StringArrayDecoder, &ObjectArrayDecoder];

/// Edges decoded from a claimed input, together with the decoder that
/// claimed it.
pub struct EdgeList {
    pub decoder: &'static dyn EdgeListDecoder,
    pub edges: Vec<Edge>,
}

/// Try every decoder in order. `Ok(None)` means the text is not an edge
/// list and should be read as a plain expression.
pub fn detect(text: &str) -> Result<Option<EdgeList>> {
    for &decoder in DECODERS.iter() {
        if !decoder.matches(text) {
            continue;
        }
        if let Some(edges) = decoder.decode(text)? {
            tracing::debug!(decoder = decoder.name(), edges = edges.len(), "edge list detected");
            return Ok(Some(EdgeList { decoder, edges }));
        }
    }
    Ok(None)
}

/// Parse one endpoint of an edge-list item.
pub fn parse_node(text: &str) -> Result<Node> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DagError::malformed("edge-list node cannot be blank"));
    }
    if NODE_TEXT.is_match(text) {
        text.parse()
    } else {
        format!("{}{}", DEFAULT_PREFIX, text).parse()
    }
}

/// Add the listed edges, then attach sources to `Start` and sinks to `End`.
pub fn build_edge_list(edges: &[Edge], graph: &mut GraphBuilder) -> Result<()> {
    let mut seen: HashSet<&Node> = HashSet::new();
    let mut order: Vec<&Node> = Vec::new();
    let mut has_incoming: HashSet<&Node> = HashSet::new();
    let mut has_outgoing: HashSet<&Node> = HashSet::new();

    for edge in edges {
        for node in [&edge.source, &edge.target] {
            if node.is_start_or_end() {
                return Err(DagError::EdgeListSourceOrTargetIsSentinel(edge.to_string()));
            }
            if seen.insert(node) {
                order.push(node);
            }
        }
        if !graph.put_edge(edge.source.clone(), edge.target.clone())? {
            diagnostics::warn(format!("duplicate edge-list item ignored: {}", edge));
        }
        has_outgoing.insert(&edge.source);
        has_incoming.insert(&edge.target);
    }

    for &node in order.iter().filter(|n| !has_incoming.contains(*n)) {
        graph.put_edge(Node::START, node.clone())?;
    }
    for &node in order.iter().filter(|n| !has_outgoing.contains(*n)) {
        graph.put_edge(node.clone(), Node::END)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn n(name: &str) -> Node {
        Node::new(1, 1, name).unwrap()
    }

    #[test]
    fn bare_names_get_the_default_prefix() {
        assert_eq!(parse_node(" A ").unwrap(), n("A"));
        assert_eq!(parse_node("2:3:B").unwrap(), Node::new(2, 3, "B").unwrap());
        assert_eq!(parse_node("1:1:A B").unwrap().name(), "A B");
        assert_eq!(parse_node("x:1:A").unwrap().name(), "x:1:A");
        assert!(parse_node("  ").is_err());
    }

    #[test]
    fn explicit_sentinels_parse_as_sentinels() {
        assert!(parse_node("0:0:End").unwrap().is_end());
    }

    #[test]
    fn infers_start_and_end() {
        let edges = vec![
            Edge::new(n("A"), n("C")).unwrap(),
            Edge::new(n("A"), n("D")).unwrap(),
            Edge::new(n("B"), n("D")).unwrap(),
            Edge::new(n("B"), n("E")).unwrap(),
        ];
        let mut graph = GraphBuilder::new();
        build_edge_list(&edges, &mut graph).unwrap();
        let graph = graph.build().unwrap();
        let starts: Vec<&Node> = graph.successors(&Node::START).collect();
        let ends: Vec<&Node> = graph.predecessors(&Node::END).collect();
        assert_eq!(starts, vec![&n("A"), &n("B")]);
        assert_eq!(ends, vec![&n("C"), &n("D"), &n("E")]);
        assert_eq!(graph.edge_count(), 9);
    }

    #[test]
    fn sentinel_endpoints_are_rejected() {
        let edges = vec![Edge::new(n("A"), Node::END).unwrap()];
        let mut graph = GraphBuilder::new();
        assert!(matches!(
            build_edge_list(&edges, &mut graph),
            Err(DagError::EdgeListSourceOrTargetIsSentinel(_))
        ));
    }

    #[test]
    fn plain_text_is_not_detected() {
        assert!(detect("A->B").unwrap().is_none());
        assert!(detect("[A->B]").unwrap().is_none());
        assert!(detect("[]").unwrap().is_none());
    }
}
