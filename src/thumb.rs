//! Thumbnail form of an expression, for display only.
//!
//! Every distinct stage name is replaced by the next letter in
//! first-encounter order; structure is copied as-is.
//!
//! ```text
//! Extract -> Transform -> Load ; Extract -> Load   =>   A->B->C;A->C
//! ```

use crate::Result;
use crate::dag::Edge;
use crate::edges::{self, EdgeList};

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"->|,|\(|\)|;").expect("thumb split pattern"));

/// Thumb either input form. Never validates: an edge list whose items do
/// not decode is thumbed as plain text.
pub fn thumb(expression: &str) -> String {
    match edges::detect(expression) {
        Ok(Some(list)) => match thumb_edges(&list) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(error = %e, "edge list thumb failed, using plain form");
                thumb_plain(expression)
            }
        },
        Ok(None) => thumb_plain(expression),
        Err(e) => {
            tracing::debug!(error = %e, "edge list not decodable, using plain form");
            thumb_plain(expression)
        }
    }
}

/// A, B, ..., Z, AA, AB, ...
fn letter(mut n: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push(char::from(b'A' + (n % 26) as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out.iter().rev().collect()
}

#[derive(Default)]
struct Letters {
    assigned: HashMap<String, String>,
}

impl Letters {
    fn get(&mut self, name: &str) -> &str {
        let next = self.assigned.len();
        self.assigned
            .entry(name.to_string())
            .or_insert_with(|| letter(next))
    }
}

fn thumb_plain(expression: &str) -> String {
    let mut letters = Letters::default();
    let mut out = String::with_capacity(expression.len());
    let mut push_name = |out: &mut String, text: &str| {
        let name = text.trim();
        if !name.is_empty() {
            out.push_str(letters.get(name));
        }
    };

    let mut start = 0;
    for m in SPLIT.find_iter(expression) {
        push_name(&mut out, &expression[start..m.start()]);
        out.push_str(m.as_str());
        start = m.end();
    }
    push_name(&mut out, &expression[start..]);
    out
}

fn thumb_edges(list: &EdgeList) -> Result<String> {
    let mut letters = Letters::default();
    let mut out = Vec::with_capacity(list.edges.len());
    for edge in &list.edges {
        let source = edge.source.renamed(letters.get(edge.source.name()))?;
        let target = edge.target.renamed(letters.get(edge.target.name()))?;
        out.push(Edge::new(source, target)?);
    }
    Ok(list.decoder.encode(&out))
}
