use crate::dag::Graph;

/// One `source -> target` line per edge, in graph order.
pub fn render_edges(graph: &Graph) -> String {
    graph.edges().map(|edge| format!("{}\n", edge)).collect()
}

/// One node per line in topological order.
pub fn render_order(graph: &Graph) -> String {
    graph
        .topological_order()
        .into_iter()
        .map(|node| format!("{}\n", node))
        .collect()
}

pub fn render_summary(graph: &Graph) -> String {
    let stages = graph.node_count().saturating_sub(2);
    format!(
        "ok: {} topologies, {} stages, {} edges",
        graph.topologies().len(),
        stages,
        graph.edge_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn edges_and_order() {
        let graph = crate::parse("A->B").unwrap();
        assert_eq!(
            render_edges(&graph),
            "0:0:Start -> 1:1:A\n1:1:A -> 1:1:B\n1:1:B -> 0:0:End\n"
        );
        assert_eq!(render_order(&graph), "0:0:Start\n1:1:A\n1:1:B\n0:0:End\n");
    }

    #[test]
    fn summary() {
        let graph = crate::parse("A->B; C").unwrap();
        assert_eq!(render_summary(&graph), "ok: 2 topologies, 3 stages, 5 edges");
    }
}
