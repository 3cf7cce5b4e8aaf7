//! Recursive resolver: split one parenthesized term into its sibling
//! sub-terms.
//!
//! Only the two outermost bracket levels are looked at per call. Deeper
//! nesting stays inside the depth-2 groups and is resolved when the builder
//! recurses into them.
//!
//! ```text
//! ((A)->((B),(C))->(D))   =>   [A, ->, (B),(C), ->, D]
//! ```

use crate::diagnostics;
use crate::expr::span::{SpanCache, SpanId};
use crate::expr::token::{CLOSE, OPEN, check_parenthesis, is_atomic};
use crate::{DagError, Result};

/// Position of a `(` or `)` at depth 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub pos: usize,
    pub depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPair {
    pub open: usize,
    pub close: usize,
}

/// Outer bracket pair plus the depth-2 pairs directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTree {
    pub root: BracketPair,
    pub children: Vec<BracketPair>,
}

/// Record every bracket at depth <= 2.
pub fn group(text: &str) -> Result<Vec<Bracket>> {
    if !check_parenthesis(text) {
        return Err(DagError::malformed(diagnostics::error_message(
            "unbalanced parenthesis",
            text,
        )));
    }
    let mut depth = 0;
    let mut brackets = Vec::new();
    for (pos, b) in text.bytes().enumerate() {
        match b {
            b'(' => {
                depth += 1;
                if depth <= 2 {
                    brackets.push(Bracket { pos, depth });
                }
            }
            b')' => {
                if depth <= 2 {
                    brackets.push(Bracket { pos, depth });
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    Ok(brackets)
}

fn pairs(brackets: &[Bracket], depth: usize) -> Vec<BracketPair> {
    let mut out = Vec::new();
    let mut open = None;
    for b in brackets.iter().filter(|b| b.depth == depth) {
        match open.take() {
            None => open = Some(b.pos),
            Some(o) => out.push(BracketPair { open: o, close: b.pos }),
        }
    }
    out
}

impl BracketTree {
    pub fn build(brackets: &[Bracket]) -> Result<Self> {
        let roots = pairs(brackets, 1);
        let [root] = roots.as_slice() else {
            return Err(DagError::malformed(format!(
                "bracket tree must have a single root, found {}",
                roots.len()
            )));
        };
        Ok(Self {
            root: *root,
            children: pairs(brackets, 2),
        })
    }

    /// root-open, each child's open and close, root-close.
    pub fn boundaries(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.children.len() * 2 + 2);
        out.push(self.root.open);
        for child in &self.children {
            out.push(child.open);
            out.push(child.close);
        }
        out.push(self.root.close);
        out
    }
}

/// Resolve `id` into its ordered sibling sub-terms. An atomic term resolves
/// to itself.
pub fn resolve(cache: &mut SpanCache, mut id: SpanId) -> Result<Vec<SpanId>> {
    loop {
        let text = cache.text(id);
        if is_atomic(text) {
            return Ok(vec![id]);
        }
        if !text.starts_with(OPEN) || !text.ends_with(CLOSE) {
            id = cache.wrap(id);
            continue;
        }

        let len = text.len();
        let brackets = group(text)?;
        match brackets.iter().filter(|b| b.depth == 1).count() {
            2 => {}
            // "(A,B)->(C,D)" => "((A,B)->(C,D))"
            n if n > 2 => {
                id = cache.wrap(id);
                continue;
            }
            n => {
                return Err(DagError::malformed(diagnostics::error_message(
                    format!("expected one outer bracket pair, found {} brackets", n),
                    cache.text(id),
                )));
            }
        }

        let tree = BracketTree::build(&brackets)?;
        if tree.root.open != 0 || tree.root.close != len - 1 {
            return Err(DagError::malformed(diagnostics::error_message(
                "outer brackets must enclose the whole term",
                cache.text(id),
            )));
        }

        let parts = partition(cache, id, &tree.boundaries());
        tracing::trace!(
            term = cache.text(id),
            parts = parts.len(),
            "resolved term"
        );
        return Ok(parts);
    }
}

/// Slice the interior between consecutive boundaries; "((" style adjacent
/// brackets give blank slices, which are dropped.
fn partition(cache: &mut SpanCache, id: SpanId, boundaries: &[usize]) -> Vec<SpanId> {
    let mut parts = Vec::with_capacity(boundaries.len());
    for w in boundaries.windows(2) {
        let part = cache.partition(id, w[0] + 1, w[1]);
        if !cache.text(part).is_empty() {
            parts.push(part);
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(cache: &SpanCache, ids: &[SpanId]) -> Vec<String> {
        ids.iter().map(|&id| cache.text(id).to_string()).collect()
    }

    fn resolve_str(text: &str) -> (SpanCache, Vec<SpanId>) {
        let mut cache = SpanCache::new();
        let root = cache.intern(text);
        let parts = resolve(&mut cache, root).unwrap();
        (cache, parts)
    }

    #[test]
    fn groups_keep_two_levels() {
        assert_eq!(
            group("(A -> B)").unwrap(),
            vec![Bracket { pos: 0, depth: 1 }, Bracket { pos: 7, depth: 1 }]
        );
        let depths: Vec<usize> = group("(A->((B)))").unwrap().iter().map(|b| b.depth).collect();
        assert_eq!(depths, vec![1, 2, 2, 1]);
    }

    #[test]
    fn tree_children() {
        let tree = BracketTree::build(&group("(A->(B->C->D),(A->F)->(G,H,X)->J)").unwrap()).unwrap();
        assert_eq!(tree.children.len(), 3);
        let tree = BracketTree::build(&group("((A->((B->C->D),(E->F))->(G,H)->J))").unwrap()).unwrap();
        assert_eq!(tree.children.len(), 1);
        let tree = BracketTree::build(&group("(A->((B->C->D),(E->F))->(G,H)->J)").unwrap()).unwrap();
        assert_eq!(tree.children.len(), 2);
    }

    #[test]
    fn atomic_resolves_to_itself() {
        let mut cache = SpanCache::new();
        let root = cache.intern("A");
        assert_eq!(resolve(&mut cache, root).unwrap(), vec![root]);
    }

    #[test]
    fn single_group() {
        let (cache, parts) = resolve_str("(A)");
        assert_eq!(texts(&cache, &parts), vec!["A"]);
    }

    #[test]
    fn sibling_groups_get_rewrapped() {
        let (cache, parts) = resolve_str("(A)->(B),(C)");
        assert_eq!(texts(&cache, &parts), vec!["A", "->", "B", ",", "C"]);
    }

    #[test]
    fn nested_groups_stay_whole() {
        let (cache, parts) = resolve_str("((A),(B))->(C)");
        assert_eq!(texts(&cache, &parts), vec!["(A),(B)", "->", "C"]);
    }

    #[test]
    fn resolving_twice_gives_the_same_spans() {
        let mut cache = SpanCache::new();
        let root = cache.intern("(A)->(B)");
        let first = resolve(&mut cache, root).unwrap();
        let second = resolve(&mut cache, root).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unbalanced_is_malformed() {
        let mut cache = SpanCache::new();
        let root = cache.intern("((A)");
        assert!(matches!(
            resolve(&mut cache, root),
            Err(DagError::MalformedExpression(_))
        ));
    }
}
