//! Graphviz DOT rendering of a compiled graph.
//!
//! The engine has no opinion on layout; it emits DOT source and leaves
//! drawing to whatever consumes it. Output is deterministic: nodes sorted
//! by key, edges by id, so the same graph always renders to the same bytes.

use crate::graph::{CompiledGraph, DirectedEdge, GraphNode};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::fmt::Write;

/// Endpoint that renders DOT source to an SVG.
const CHART_ENDPOINT: &str = "https://quickchart.io/graphviz?format=svg&graph=";

/// Identifier-safe token for a key.
///
/// Graph-node identifiers in most rendering targets cannot contain the key
/// separator, so `PROJ-123` becomes `PROJ_123`. The token is only ever a
/// rendering-layer identifier; lookups against the tracker always use the
/// raw key.
pub fn node_id(key: &str) -> String {
    key.replace('-', "_")
}

/// Render the graph as Graphviz DOT source.
///
/// When `base_url` is known each node carries an href to the item's browse
/// page. Flagged nodes are filled, the highlighted root is drawn with a
/// heavier border, and a non-empty status becomes a second label line.
pub fn dot(graph: &CompiledGraph, base_url: Option<&str>) -> String {
    let mut nodes: Vec<&GraphNode> = graph.nodes.iter().collect();
    nodes.sort_by(|a, b| a.key.cmp(&b.key));

    let mut edges: Vec<&DirectedEdge> = graph.edges.iter().collect();
    edges.sort_by(|a, b| a.id.cmp(&b.id));

    let mut out = String::from("digraph {\n");

    for node in nodes {
        let mut attrs = format!("shape=box,label=\"{}\"", node_label(node));

        if let Some(base) = base_url {
            let _ = write!(
                attrs,
                ",href=\"{}/browse/{}\",target=\"_blank\"",
                escape(base.trim_end_matches('/')),
                escape(&node.key)
            );
        }
        if node.flagged {
            attrs.push_str(",style=filled,fillcolor=mistyrose,color=red");
        }
        if node.root {
            attrs.push_str(",penwidth=2");
        }

        let _ = writeln!(out, "  {} [{}];", node_id(&node.key), attrs);
    }

    for edge in edges {
        let _ = writeln!(
            out,
            "  {} -> {} [label=\"{}\"];",
            node_id(&edge.source),
            node_id(&edge.target),
            escape(&edge.label)
        );
    }

    out.push_str("}\n");
    out
}

/// Build the chart-service URL that renders `dot_source` as an SVG.
pub fn chart_url(dot_source: &str) -> String {
    format!(
        "{}{}",
        CHART_ENDPOINT,
        utf8_percent_encode(dot_source, NON_ALPHANUMERIC)
    )
}

/// Label text for a node, already escaped for a quoted DOT string.
///
/// The `\n` joining key and status is a DOT escape and must survive, so
/// the parts are escaped individually before joining.
fn node_label(node: &GraphNode) -> String {
    if node.status.is_empty() {
        escape(&node.key)
    } else {
        format!("{}\\n{}", escape(&node.key), escape(&node.status))
    }
}

/// Escape a value for use inside a double-quoted DOT string.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CompiledGraph, DirectedEdge, GraphNode};

    fn sample() -> CompiledGraph {
        CompiledGraph {
            nodes: vec![
                GraphNode {
                    key: "PROJ-2".to_string(),
                    status: "Open".to_string(),
                    flagged: true,
                    root: false,
                },
                GraphNode {
                    key: "PROJ-1".to_string(),
                    status: "In Progress".to_string(),
                    flagged: false,
                    root: true,
                },
            ],
            edges: vec![DirectedEdge {
                id: "PROJ-1_PROJ-2".to_string(),
                source: "PROJ-1".to_string(),
                target: "PROJ-2".to_string(),
                label: "Blocks".to_string(),
            }],
        }
    }

    #[test]
    fn normalizes_node_identifiers() {
        assert_eq!(node_id("PROJ-123"), "PROJ_123");
        assert_eq!(node_id("ABC-1-2"), "ABC_1_2");
    }

    #[test]
    fn renders_nodes_sorted_with_raw_key_labels() {
        let out = dot(&sample(), None);

        let p1 = out.find("PROJ_1 [").unwrap();
        let p2 = out.find("PROJ_2 [").unwrap();
        assert!(p1 < p2);

        // The raw key survives in the label even though the id is normalized.
        assert!(out.contains("label=\"PROJ-1\\nIn Progress\""));
        assert!(out.contains("PROJ_1 -> PROJ_2 [label=\"Blocks\"];"));
    }

    #[test]
    fn marks_flagged_and_root_nodes() {
        let out = dot(&sample(), None);
        let flagged_line = out.lines().find(|l| l.contains("PROJ_2 [")).unwrap();
        assert!(flagged_line.contains("fillcolor=mistyrose"));

        let root_line = out.lines().find(|l| l.contains("PROJ_1 [")).unwrap();
        assert!(root_line.contains("penwidth=2"));
        assert!(!root_line.contains("fillcolor"));
    }

    #[test]
    fn adds_browse_hrefs_when_base_url_known() {
        let out = dot(&sample(), Some("https://acme.atlassian.net/"));
        assert!(out.contains("href=\"https://acme.atlassian.net/browse/PROJ-1\""));

        let out = dot(&sample(), None);
        assert!(!out.contains("href"));
    }

    #[test]
    fn dot_output_is_deterministic() {
        assert_eq!(dot(&sample(), None), dot(&sample(), None));
    }

    #[test]
    fn chart_url_escapes_dot_source() {
        let url = chart_url("digraph {\n  A -> B;\n}");
        assert!(url.starts_with(CHART_ENDPOINT));
        assert!(!url.contains(' '));
        assert!(!url.contains('\n'));
        assert!(url.contains("digraph"));
    }
}
