//! Structural checks applied once the whole expression has been built.
//!
//! - at least one real stage between the sentinels (more than 2 nodes)
//! - `Start` never wired straight to `End`
//! - acyclic

use crate::dag::{Graph, Node};
use crate::{DagError, Result};

pub fn validate(graph: &Graph) -> Result<()> {
    if graph.node_count() <= 2 {
        return Err(DagError::invalid(format!(
            "expression has no stage node ({} nodes)",
            graph.node_count()
        )));
    }
    if graph.successors(&Node::START).any(Node::is_end) {
        return Err(DagError::invalid("Start cannot lead directly to End"));
    }
    if graph.predecessors(&Node::END).any(Node::is_start) {
        return Err(DagError::invalid("End cannot follow directly from Start"));
    }
    check_acyclic(graph)
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mark {
    Temp,
    Perm,
}

/// DFS coloring over an explicit `(node, next successor)` stack. Roots are
/// `Start` first, then every node in insertion order so components
/// unreachable from `Start` are still covered.
fn check_acyclic(graph: &Graph) -> Result<()> {
    let mut marks = vec![None; graph.node_count()];
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let roots = graph.index_of(&Node::START).into_iter().chain(0..graph.node_count());
    for root in roots {
        if marks[root].is_some() {
            continue;
        }
        marks[root] = Some(Mark::Temp);
        stack.push((root, 0));

        while let Some(&(v, next)) = stack.last() {
            let Some(&w) = graph.successor_ids(v).get(next) else {
                marks[v] = Some(Mark::Perm);
                stack.pop();
                continue;
            };
            let top = stack.len() - 1;
            stack[top].1 += 1;
            match marks[w] {
                Some(Mark::Perm) => {}
                // w is on the current path
                Some(Mark::Temp) => return Err(cycle(graph, &stack, w)),
                None => {
                    marks[w] = Some(Mark::Temp);
                    stack.push((w, 0));
                }
            }
        }
    }
    Ok(())
}

fn cycle(graph: &Graph, stack: &[(usize, usize)], w: usize) -> DagError {
    let from = stack.iter().position(|&(i, _)| i == w).unwrap_or(0);
    let path: Vec<String> = stack[from..]
        .iter()
        .map(|&(i, _)| i)
        .chain(std::iter::once(w))
        .map(|i| graph.node_at(i).to_string())
        .collect();
    DagError::invalid(format!("cycle detected: {}", path.join(" -> ")))
}
