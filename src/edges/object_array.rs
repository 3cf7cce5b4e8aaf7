//! `[{"source": "1:1:A", "target": "1:1:C"}, ...]`

use crate::dag::Edge;
use crate::edges::{EdgeListDecoder, parse_node};
use crate::Result;

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*\[\s*\{.+\}\s*\]\s*$").expect("object array pattern"));

#[derive(Debug, Deserialize)]
struct RawEdge {
    source: String,
    target: String,
}

pub struct ObjectArrayDecoder;

impl EdgeListDecoder for ObjectArrayDecoder {
    fn name(&self) -> &'static str {
        "object-array"
    }

    fn matches(&self, text: &str) -> bool {
        SHAPE.is_match(text)
    }

    fn decode(&self, text: &str) -> Result<Option<Vec<Edge>>> {
        let raw: Vec<RawEdge> = match serde_json::from_str(text) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(error = %e, "not a JSON edge object array");
                return Ok(None);
            }
        };
        if raw.is_empty() {
            return Ok(None);
        }
        raw.iter()
            .map(|r| Edge::new(parse_node(&r.source)?, parse_node(&r.target)?))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    fn encode(&self, edges: &[Edge]) -> String {
        let items: Vec<serde_json::Value> = edges
            .iter()
            .map(|e| {
                serde_json::json!({
                    "source": e.source.to_string(),
                    "target": e.target.to_string(),
                })
            })
            .collect();
        serde_json::Value::Array(items).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DagError;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_objects() {
        let text = r#"[
            {"source": "1:1:A", "target": "1:1:C"},
            {"source": "B", "target": "2:1:D"}
        ]"#;
        assert!(ObjectArrayDecoder.matches(text));
        let edges = ObjectArrayDecoder.decode(text).unwrap().unwrap();
        let text: Vec<String> = edges.iter().map(|e| e.to_string()).collect();
        assert_eq!(text, vec!["1:1:A -> 1:1:C", "1:1:B -> 2:1:D"]);
    }

    #[test]
    fn wrong_object_shape_is_not_claimed() {
        let text = r#"[{"from": "A", "to": "B"}]"#;
        assert!(ObjectArrayDecoder.matches(text));
        assert!(ObjectArrayDecoder.decode(text).unwrap().is_none());
    }

    #[test]
    fn blank_endpoint_is_malformed() {
        let text = r#"[{"source": " ", "target": "B"}]"#;
        assert!(matches!(
            ObjectArrayDecoder.decode(text),
            Err(DagError::MalformedExpression(_))
        ));
    }

    #[test]
    fn encodes_objects() {
        let edges = ObjectArrayDecoder
            .decode(r#"[{"source": "A", "target": "B"}]"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            ObjectArrayDecoder.encode(&edges),
            r#"[{"source":"1:1:A","target":"1:1:B"}]"#
        );
    }
}
