//! Graph builder for the plain expression form.
//!
//! Walks a term list stage by stage (split on `->`), allocating one node per
//! atom occurrence and wiring it between `prev` and `next`. Nested compound
//! terms are spliced back into the stream at the same `prev`/`next`.
//!
//! The walk runs on an explicit frame stack, so long chains do not grow the
//! call stack.
//!
//! Fan-in works because every branch of a union continues into the *same*
//! tail spans: `(A,B)->C` visits the span of `C` once from `A` and once
//! from `B`, and the ordinal allocator hands both visits the same node.

use crate::dag::{GraphBuilder, Node};
use crate::diagnostics;
use crate::expr::resolve::resolve;
use crate::expr::span::{SpanCache, SpanId};
use crate::expr::token::{self, OPEN, STAGE, UNION, is_atomic, is_separator};
use crate::{DagError, Result};

use std::collections::HashMap;
use std::rc::Rc;

/// Per-topology `name -> [(span, ordinal)]`.
#[derive(Debug, Default)]
pub struct OrdinalAllocator {
    occurrences: HashMap<String, Vec<(SpanId, u32)>>,
}

impl OrdinalAllocator {
    /// Reuse the ordinal of a span seen before, otherwise take the next one
    /// for `name`.
    pub fn allocate(&mut self, name: &str, span: SpanId) -> u32 {
        let list = self.occurrences.entry(name.to_string()).or_default();
        if let Some(&(_, ordinal)) = list.iter().find(|(s, _)| *s == span) {
            return ordinal;
        }
        let ordinal = list.len() as u32 + 1;
        list.push((span, ordinal));
        ordinal
    }
}

/// `(head, tail)`: the union of terms before the first `->`, and the index
/// in `terms` where the remaining stages start (`None` when there is no
/// further stage).
pub type Stage = (Vec<SpanId>, Option<usize>);

pub fn divide_first_stage(cache: &SpanCache, terms: &[SpanId]) -> Result<Option<Stage>> {
    let (Some(&first), Some(&last)) = (terms.first(), terms.last()) else {
        return Ok(None);
    };
    let joined = || terms.iter().map(|&t| cache.text(t)).collect::<String>();
    if is_separator(cache.text(first)) || is_separator(cache.text(last)) {
        return Err(DagError::malformed(diagnostics::error_message(
            "expression cannot start or end with a separator",
            &joined(),
        )));
    }

    let mut head = Vec::new();
    let mut i = 0;
    while i < terms.len() {
        head.push(terms[i]);
        i += 1;
        let Some(&sep) = terms.get(i) else {
            break;
        };
        i += 1;
        match cache.text(sep) {
            STAGE => return Ok(Some((head, Some(i)))),
            UNION => {}
            other => {
                return Err(DagError::malformed(diagnostics::error_message(
                    format!("expected '->' or ',' but found {:?}", other),
                    &joined(),
                )));
            }
        }
    }
    Ok(Some((head, None)))
}

/// Suffix of a shared term list. Stages after the first are handed on
/// without copying.
#[derive(Debug, Clone)]
struct Terms {
    ids: Rc<[SpanId]>,
    start: usize,
}

impl Terms {
    fn new(ids: Vec<SpanId>) -> Self {
        Self {
            ids: ids.into(),
            start: 0,
        }
    }

    fn as_slice(&self) -> &[SpanId] {
        &self.ids[self.start..]
    }

    fn skip(&self, n: usize) -> Self {
        Self {
            ids: Rc::clone(&self.ids),
            start: self.start + n,
        }
    }
}

/// Pending work. Popping a `Term` may push the `Stage` that follows it, so
/// each term is finished before its later siblings, as in a depth-first
/// walk.
enum Frame {
    /// A term list wired between `prev` and `next`.
    Stage { terms: Terms, prev: Node, next: Node },
    /// One term of a union, followed by the rest of its list.
    Term {
        term: SpanId,
        tail: Option<Terms>,
        prev: Node,
        next: Node,
    },
}

/// Builds one topology into a shared `GraphBuilder`.
pub struct TopologyBuilder<'a> {
    topology: u32,
    cache: &'a mut SpanCache,
    ordinals: OrdinalAllocator,
    graph: &'a mut GraphBuilder,
}

impl<'a> TopologyBuilder<'a> {
    pub fn new(topology: u32, cache: &'a mut SpanCache, graph: &'a mut GraphBuilder) -> Self {
        Self {
            topology,
            cache,
            ordinals: OrdinalAllocator::default(),
            graph,
        }
    }

    /// Wire the topology rooted at `root` between `Start` and `End`.
    pub fn build(mut self, root: SpanId) -> Result<()> {
        let mut stack = vec![Frame::Stage {
            terms: Terms::new(vec![root]),
            prev: Node::START,
            next: Node::END,
        }];
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Stage { terms, prev, next } => {
                    let Some((head, tail)) = divide_first_stage(self.cache, terms.as_slice())? else {
                        continue;
                    };
                    let tail = tail.map(|i| terms.skip(i));
                    for &term in head.iter().rev() {
                        stack.push(Frame::Term {
                            term,
                            tail: tail.clone(),
                            prev: prev.clone(),
                            next: next.clone(),
                        });
                    }
                }
                Frame::Term {
                    term,
                    tail,
                    prev,
                    next,
                } => {
                    if let Some(frame) = self.build_term(term, tail, prev, next)? {
                        stack.push(frame);
                    }
                }
            }
        }
        Ok(())
    }

    /// Wire one term after `prev`; returns the stage still to be built
    /// behind it.
    fn build_term(
        &mut self,
        term: SpanId,
        tail: Option<Terms>,
        prev: Node,
        next: Node,
    ) -> Result<Option<Frame>> {
        let parts = resolve(self.cache, term)?;
        let atom = match parts.as_slice() {
            [] => {
                return Err(DagError::malformed(diagnostics::error_message(
                    "empty term",
                    self.cache.text(term),
                )));
            }
            &[name] if is_atomic(self.cache.text(name)) => Some(name),
            // only separators left, e.g. "A,(->->),B"
            &[name] if !self.cache.text(name).contains(OPEN) => {
                return Err(DagError::malformed(diagnostics::error_message(
                    "term has no stage name",
                    self.cache.text(name),
                )));
            }
            _ => None,
        };

        let Some(name) = atom else {
            let spliced = self.splice(parts, tail.as_ref());
            return Ok(Some(Frame::Stage {
                terms: spliced,
                prev,
                next,
            }));
        };

        let node = self.node(name)?;
        self.graph.put_edge(prev, node.clone())?;
        match tail {
            None => {
                self.graph.put_edge(node, next)?;
                Ok(None)
            }
            Some(terms) => Ok(Some(Frame::Stage {
                terms,
                prev: node,
                next,
            })),
        }
    }

    fn node(&mut self, span: SpanId) -> Result<Node> {
        let name = self.cache.text(span);
        if name == Node::START.name() || name == Node::END.name() {
            return Err(DagError::malformed(format!(
                "{:?} is a reserved node name (topology {})",
                name, self.topology
            )));
        }
        let ordinal = self.ordinals.allocate(name, span);
        Node::new(self.topology, ordinal, name)
    }

    /// `parts -> tail`, keeping the tail's span ids.
    fn splice(&self, mut parts: Vec<SpanId>, tail: Option<&Terms>) -> Terms {
        if let Some(tail) = tail.map(Terms::as_slice).filter(|t| !t.is_empty()) {
            parts.reserve(tail.len() + 1);
            parts.push(self.cache.stage());
            parts.extend_from_slice(tail);
        }
        Terms::new(parts)
    }
}

/// Split the whole expression into trimmed topologies. Blank segments are
/// rejected.
pub fn split_topologies(expression: &str) -> Result<Vec<&str>> {
    expression
        .split(token::TOPOLOGY)
        .enumerate()
        .map(|(i, section)| {
            let section = section.trim();
            if section.is_empty() {
                Err(DagError::malformed(diagnostics::error_message(
                    format!("topology {} is blank", i + 1),
                    expression,
                )))
            } else {
                Ok(section)
            }
        })
        .collect()
}
