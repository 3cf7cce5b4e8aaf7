//! Directed stage graph.
//!
//! Nodes keep their first-insertion order (source before target) and every
//! adjacency list keeps edge insertion order, so iteration is deterministic
//! and follows the order the expression was read in.

use crate::dag::{Edge, Node, validate};
use crate::Result;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Immutable, validated DAG produced by [`GraphBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<Node, usize>,
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    /// Edges grouped by source in node order, targets in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.successors.iter().enumerate().flat_map(move |(s, targets)| {
            targets.iter().map(move |&t| Edge {
                source: self.nodes[s].clone(),
                target: self.nodes[t].clone(),
            })
        })
    }

    pub fn contains_node(&self, node: &Node) -> bool {
        self.index.contains_key(node)
    }

    pub fn contains_edge(&self, source: &Node, target: &Node) -> bool {
        match (self.index.get(source), self.index.get(target)) {
            (Some(s), Some(t)) => self.successors[*s].contains(t),
            _ => false,
        }
    }

    /// Direct successors of `node`; empty if the node is unknown.
    pub fn successors<'a>(&'a self, node: &Node) -> impl Iterator<Item = &'a Node> + use<'a> {
        self.adjacent(&self.successors, node)
    }

    /// Direct predecessors of `node`; empty if the node is unknown.
    pub fn predecessors<'a>(&'a self, node: &Node) -> impl Iterator<Item = &'a Node> + use<'a> {
        self.adjacent(&self.predecessors, node)
    }

    fn adjacent<'a>(
        &'a self,
        lists: &'a [Vec<usize>],
        node: &Node,
    ) -> impl Iterator<Item = &'a Node> + use<'a> {
        let ids: &'a [usize] = match self.index.get(node) {
            Some(&i) => &lists[i],
            None => &[],
        };
        ids.iter().map(move |&i| &self.nodes[i])
    }

    /// Distinct topology numbers, ascending. Sentinels are not counted.
    pub fn topologies(&self) -> Vec<u32> {
        let set: BTreeSet<u32> = self
            .nodes
            .iter()
            .filter(|n| !n.is_start_or_end())
            .map(Node::topology)
            .collect();
        set.into_iter().collect()
    }

    /// Kahn's algorithm; ready nodes are released in insertion order.
    pub fn topological_order(&self) -> Vec<&Node> {
        let mut indegree: Vec<usize> = self.predecessors.iter().map(Vec::len).collect();
        let mut ready: VecDeque<usize> = (0..self.nodes.len()).filter(|&i| indegree[i] == 0).collect();
        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(i) = ready.pop_front() {
            order.push(&self.nodes[i]);
            for &t in &self.successors[i] {
                indegree[t] -= 1;
                if indegree[t] == 0 {
                    ready.push_back(t);
                }
            }
        }
        order
    }

    pub(crate) fn successor_ids(&self, i: usize) -> &[usize] {
        &self.successors[i]
    }

    pub(crate) fn node_at(&self, i: usize) -> &Node {
        &self.nodes[i]
    }

    pub(crate) fn index_of(&self, node: &Node) -> Option<usize> {
        self.index.get(node).copied()
    }

    fn edge_set(&self) -> BTreeSet<Edge> {
        self.edges().collect()
    }
}

/// Equal when both graphs hold the same node and edge sets.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.node_count() == other.node_count()
            && self.nodes.iter().all(|n| other.contains_node(n))
            && self.edge_set() == other.edge_set()
    }
}

impl Eq for Graph {}

impl Serialize for Graph {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let edges: Vec<Edge> = self.edges().collect();
        let mut state = serializer.serialize_struct("Graph", 2)?;
        state.serialize_field("nodes", &self.nodes)?;
        state.serialize_field("edges", &edges)?;
        state.end()
    }
}

/// Incremental graph construction. Repeated edges are ignored.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `source -> target`. Returns `false` if the edge already existed.
    pub fn put_edge(&mut self, source: Node, target: Node) -> Result<bool> {
        let edge = Edge::new(source, target)?;
        let s = self.intern(edge.source);
        let t = self.intern(edge.target);
        let g = &mut self.graph;
        if g.successors[s].contains(&t) {
            return Ok(false);
        }
        g.successors[s].push(t);
        g.predecessors[t].push(s);
        Ok(true)
    }

    fn intern(&mut self, node: Node) -> usize {
        let g = &mut self.graph;
        if let Some(&i) = g.index.get(&node) {
            return i;
        }
        let i = g.nodes.len();
        g.index.insert(node.clone(), i);
        g.nodes.push(node);
        g.successors.push(Vec::new());
        g.predecessors.push(Vec::new());
        i
    }

    /// Validate and freeze the graph.
    pub fn build(self) -> Result<Graph> {
        validate::validate(&self.graph)?;
        Ok(self.graph)
    }

    #[cfg(test)]
    pub(crate) fn build_unchecked(self) -> Graph {
        self.graph
    }
}
