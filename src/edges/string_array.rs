//! `["1:1:A -> 1:1:C", "1:1:A -> 1:1:D", "B -> D"]`

use crate::dag::Edge;
use crate::diagnostics;
use crate::edges::{EdgeListDecoder, parse_node};
use crate::{DagError, Result};

use regex::Regex;
use std::sync::LazyLock;

static SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)^\s*\[\s*".+"\s*\]\s*$"#).expect("string array pattern"));

const ARROW: &str = "->";

pub struct StringArrayDecoder;

impl StringArrayDecoder {
    fn decode_item(item: &str) -> Result<Edge> {
        let parts: Vec<&str> = item.split(ARROW).collect();
        let [source, target] = parts.as_slice() else {
            return Err(DagError::malformed(diagnostics::error_message(
                "edge-list item must be `source -> target`",
                item,
            )));
        };
        Edge::new(parse_node(source)?, parse_node(target)?)
    }
}

impl EdgeListDecoder for StringArrayDecoder {
    fn name(&self) -> &'static str {
        "string-array"
    }

    fn matches(&self, text: &str) -> bool {
        SHAPE.is_match(text)
    }

    fn decode(&self, text: &str) -> Result<Option<Vec<Edge>>> {
        let items: Vec<String> = match serde_json::from_str(text) {
            Ok(items) => items,
            Err(e) => {
                tracing::debug!(error = %e, "not a JSON string array");
                return Ok(None);
            }
        };
        if items.is_empty() {
            return Ok(None);
        }
        items
            .iter()
            .map(|item| Self::decode_item(item))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    fn encode(&self, edges: &[Edge]) -> String {
        let items: Vec<serde_json::Value> = edges
            .iter()
            .map(|e| serde_json::Value::String(e.to_string()))
            .collect();
        serde_json::Value::Array(items).to_string()
    }
}
