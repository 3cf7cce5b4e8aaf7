//! Span cache: stable ids for every extracted sub-term.
//!
//! The graph builder has to tell "the same occurrence reached again through
//! another predecessor" apart from "a new occurrence of the same name".
//! Texts alone cannot do that (`A->B->A` holds two equal `A`s), so every
//! sub-term gets a `SpanId` and re-extracting the same slice of the same
//! parent always yields the same id.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanId(usize);

#[derive(Debug)]
pub struct SpanCache {
    texts: Vec<String>,
    wrapped: HashMap<SpanId, SpanId>,
    partitions: HashMap<(SpanId, usize, usize), SpanId>,
    stage: SpanId,
}

impl Default for SpanCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SpanCache {
    pub fn new() -> Self {
        let mut cache = Self {
            texts: Vec::new(),
            wrapped: HashMap::new(),
            partitions: HashMap::new(),
            stage: SpanId(0),
        };
        cache.stage = cache.intern(super::token::STAGE);
        cache
    }

    /// Register a new root text. Always allocates a fresh id, even for a
    /// text seen before.
    pub fn intern(&mut self, text: impl Into<String>) -> SpanId {
        let id = SpanId(self.texts.len());
        self.texts.push(text.into());
        id
    }

    pub fn text(&self, id: SpanId) -> &str {
        &self.texts[id.0]
    }

    /// The shared `->` separator used when splicing term lists.
    pub fn stage(&self) -> SpanId {
        self.stage
    }

    /// `(text)`, one id per source id.
    pub fn wrap(&mut self, id: SpanId) -> SpanId {
        if let Some(&wrapped) = self.wrapped.get(&id) {
            return wrapped;
        }
        let text = format!("({})", self.text(id));
        let wrapped = self.intern(text);
        self.wrapped.insert(id, wrapped);
        wrapped
    }

    /// Trimmed `text[start..end]`, one id per `(id, start, end)`.
    ///
    /// `start` and `end` must sit on char boundaries; callers only cut next
    /// to ASCII brackets.
    pub fn partition(&mut self, id: SpanId, start: usize, end: usize) -> SpanId {
        let key = (id, start, end);
        if let Some(&part) = self.partitions.get(&key) {
            return part;
        }
        let text = self.text(id)[start..end].trim().to_string();
        let part = self.intern(text);
        self.partitions.insert(key, part);
        part
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn same_slice_same_id() {
        let mut cache = SpanCache::new();
        let root = cache.intern("(A)->(A)");
        let first = cache.partition(root, 1, 2);
        let second = cache.partition(root, 6, 7);
        assert_eq!(cache.text(first), cache.text(second));
        assert_ne!(first, second);
        assert_eq!(cache.partition(root, 1, 2), first);
    }

    #[test]
    fn equal_roots_are_distinct() {
        let mut cache = SpanCache::new();
        let a = cache.intern("A");
        let b = cache.intern("A");
        assert_ne!(a, b);
        assert_ne!(cache.partition(a, 0, 1), cache.partition(b, 0, 1));
    }

    #[test]
    fn wrap_is_memoised() {
        let mut cache = SpanCache::new();
        let root = cache.intern("A,B");
        let wrapped = cache.wrap(root);
        assert_eq!(cache.text(wrapped), "(A,B)");
        assert_eq!(cache.wrap(root), wrapped);
    }

    #[test]
    fn partitions_are_trimmed() {
        let mut cache = SpanCache::new();
        let root = cache.intern("( A )");
        let part = cache.partition(root, 1, 4);
        assert_eq!(cache.text(part), "A");
        assert_eq!(cache.text(cache.stage()), "->");
    }
}
