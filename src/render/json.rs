use crate::dag::Graph;

/// Pretty JSON document `{ "nodes": [...], "edges": [...] }`.
pub fn render_json(graph: &Graph) -> serde_json::Result<String> {
    serde_json::to_string_pretty(graph)
}
