//! The normalized graph model.
//!
//! Raw tracker records come in two shapes (single-item fetches and search
//! pages); everything downstream of discovery works on the types in this
//! module instead. [`CompiledGraph`] is the sole contract handed to
//! rendering: string-keyed nodes, directed labelled edges, no duplicate edge
//! ids, no dangling endpoints.

pub mod compile;

use crate::config::TrellisConfig;
use petgraph::algo;
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use trellis_jira::types::{ItemFields, LinkRecord};
use trellis_jira::ItemRecord;

/// Which half of a relationship a link record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The owning item is the target of the relationship.
    In,

    /// The owning item is the source of the relationship.
    Out,
}

/// A link record normalized against the key of the item that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLink {
    /// Link type name, e.g. `Blocks`.
    pub link_type: String,

    /// Whether the owning item is source or target.
    pub direction: Direction,

    /// Key of the item the link record was attached to.
    pub root: String,

    /// Key of the item on the other end.
    pub other: String,
}

/// Normalize a raw link record owned by `owner`.
///
/// Returns `None` for a record with neither reference populated; such
/// records are malformed remote data and are skipped, not fatal. When both
/// references are present the inward one wins.
pub fn parse_link(owner: &str, link: &LinkRecord) -> Option<ParsedLink> {
    let (direction, other) = match (&link.inward_issue, &link.outward_issue) {
        (Some(inward), _) => (Direction::In, inward.key.clone()),
        (None, Some(outward)) => (Direction::Out, outward.key.clone()),
        (None, None) => return None,
    };

    Some(ParsedLink {
        link_type: link.link_type.name.clone(),
        direction,
        root: owner.to_string(),
        other,
    })
}

/// A discovered item, reduced to what rendering needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Item key, e.g. `PROJ-123`.
    pub key: String,

    /// Workflow status name; empty for placeholder nodes.
    pub status: String,

    /// Impediment signal from the custom-field heuristic.
    pub flagged: bool,

    /// Presentation highlight for the root of a plain-item build.
    pub root: bool,
}

impl GraphNode {
    /// Build a node from a raw record, applying the flag heuristic.
    pub fn from_record(record: &ItemRecord, config: &TrellisConfig) -> Self {
        Self {
            key: record.key.clone(),
            status: record
                .fields
                .status
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            flagged: is_flagged(
                &record.fields,
                &config.custom_field_marker,
                &config.impediment_marker,
            ),
            root: false,
        }
    }

    /// A node standing in for a key the discovery never fetched.
    pub fn placeholder(key: &str) -> Self {
        Self {
            key: key.to_string(),
            status: String::new(),
            flagged: false,
            root: false,
        }
    }
}

/// Best-effort impediment detection over an item's custom fields.
///
/// True iff any field whose name contains `field_marker` serializes to JSON
/// containing `value_marker`. Trackers store flags in tenant-specific
/// `customfield_*` entries whose exact shape varies, so this scans the
/// serialized value rather than assuming one.
pub fn is_flagged(fields: &ItemFields, field_marker: &str, value_marker: &str) -> bool {
    fields.extra.iter().any(|(name, value)| {
        name.contains(field_marker)
            && serde_json::to_string(value)
                .map(|json| json.contains(value_marker))
                .unwrap_or(false)
    })
}

/// A directed, labelled edge between two discovered items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedEdge {
    /// Stable edge identifier, `source_target`.
    pub id: String,

    /// Key of the source node.
    pub source: String,

    /// Key of the target node.
    pub target: String,

    /// Link type name used as the edge label.
    pub label: String,
}

/// The compiled graph handed to rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledGraph {
    /// Discovered items, one node per key.
    pub nodes: Vec<GraphNode>,

    /// Deduplicated directed edges.
    pub edges: Vec<DirectedEdge>,
}

impl CompiledGraph {
    /// True when the graph has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the link structure contains a directed cycle.
    ///
    /// Cycles are legal in tracker data (mutual blocks happen); callers use
    /// this to warn, not to reject.
    pub fn has_cycles(&self) -> bool {
        algo::is_cyclic_directed(&self.to_petgraph())
    }

    /// Adjacency view of the compiled graph.
    ///
    /// Node weights are keys, edge weights are labels. Compilation
    /// guarantees every endpoint has a node, so edge insertion cannot miss.
    pub fn to_petgraph(&self) -> DiGraph<&str, &str> {
        let mut graph = DiGraph::new();
        let mut indices = HashMap::new();

        for node in &self.nodes {
            indices.insert(node.key.as_str(), graph.add_node(node.key.as_str()));
        }

        for edge in &self.edges {
            if let (Some(&source), Some(&target)) = (
                indices.get(edge.source.as_str()),
                indices.get(edge.target.as_str()),
            ) {
                graph.add_edge(source, target, edge.label.as_str());
            }
        }

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_jira::fake::{inward, outward, record};

    fn config() -> TrellisConfig {
        TrellisConfig::default()
    }

    #[test]
    fn parses_outward_link() {
        let link = parse_link("A-1", &outward("Blocks", "B-2")).unwrap();
        assert_eq!(link.direction, Direction::Out);
        assert_eq!(link.root, "A-1");
        assert_eq!(link.other, "B-2");
        assert_eq!(link.link_type, "Blocks");
    }

    #[test]
    fn parses_inward_link() {
        let link = parse_link("B-2", &inward("Blocks", "A-1")).unwrap();
        assert_eq!(link.direction, Direction::In);
        assert_eq!(link.root, "B-2");
        assert_eq!(link.other, "A-1");
    }

    #[test]
    fn rejects_link_with_no_references() {
        let mut link = outward("Blocks", "B-2");
        link.outward_issue = None;
        assert!(parse_link("A-1", &link).is_none());
    }

    #[test]
    fn inward_wins_when_both_references_present() {
        let mut link = outward("Blocks", "B-2");
        link.inward_issue = inward("Blocks", "C-3").inward_issue;
        let parsed = parse_link("A-1", &link).unwrap();
        assert_eq!(parsed.direction, Direction::In);
        assert_eq!(parsed.other, "C-3");
    }

    #[test]
    fn flag_heuristic_matches_marked_custom_field() {
        let mut item = record("A-1", "Open", "Task", vec![]);
        item.fields.extra.insert(
            "customfield_10021".to_string(),
            serde_json::json!([{ "value": "Impediment" }]),
        );

        let node = GraphNode::from_record(&item, &config());
        assert!(node.flagged);
    }

    #[test]
    fn flag_heuristic_ignores_non_custom_fields() {
        let mut item = record("A-1", "Open", "Task", vec![]);
        item.fields.extra.insert(
            "labels".to_string(),
            serde_json::json!(["Impediment"]),
        );

        let node = GraphNode::from_record(&item, &config());
        assert!(!node.flagged);
    }

    #[test]
    fn flag_heuristic_ignores_unmarked_values() {
        let mut item = record("A-1", "Open", "Task", vec![]);
        item.fields.extra.insert(
            "customfield_10021".to_string(),
            serde_json::json!([{ "value": "On Track" }]),
        );

        let node = GraphNode::from_record(&item, &config());
        assert!(!node.flagged);
    }

    #[test]
    fn node_carries_status_name() {
        let item = record("A-1", "In Progress", "Task", vec![]);
        let node = GraphNode::from_record(&item, &config());
        assert_eq!(node.status, "In Progress");
        assert!(!node.root);
    }

    #[test]
    fn detects_cycles() {
        let graph = CompiledGraph {
            nodes: vec![GraphNode::placeholder("A-1"), GraphNode::placeholder("B-2")],
            edges: vec![
                DirectedEdge {
                    id: "A-1_B-2".into(),
                    source: "A-1".into(),
                    target: "B-2".into(),
                    label: "Blocks".into(),
                },
                DirectedEdge {
                    id: "B-2_A-1".into(),
                    source: "B-2".into(),
                    target: "A-1".into(),
                    label: "Blocks".into(),
                },
            ],
        };

        assert!(graph.has_cycles());
    }

    #[test]
    fn acyclic_graph_reports_no_cycles() {
        let graph = CompiledGraph {
            nodes: vec![GraphNode::placeholder("A-1"), GraphNode::placeholder("B-2")],
            edges: vec![DirectedEdge {
                id: "A-1_B-2".into(),
                source: "A-1".into(),
                target: "B-2".into(),
                label: "Blocks".into(),
            }],
        };

        assert!(!graph.has_cycles());
    }
}
