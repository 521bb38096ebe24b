//! Compilation of raw discovery output into a [`CompiledGraph`].
//!
//! Both discovery strategies funnel through here. The compiler enforces the
//! output contract: outward-only edges, unique edge ids, and a node for
//! every edge endpoint.

use super::{CompiledGraph, Direction, DirectedEdge, GraphNode, ParsedLink};
use crate::config::TrellisConfig;
use std::collections::HashSet;
use trellis_jira::ItemRecord;

/// Compile incremental-discovery output.
///
/// Only `Out` links become edges: an `In` link is the mirror of some other
/// item's `Out` link, and keeping both would double-count the relationship.
/// Edge ids carry no link type, so two same-pair links of different types
/// would collide; the first occurrence wins.
pub fn compile(nodes: Vec<GraphNode>, links: &[ParsedLink]) -> CompiledGraph {
    let mut edge_ids = HashSet::new();
    let mut edges = Vec::new();

    for link in links {
        if link.direction != Direction::Out {
            continue;
        }

        let id = format!("{}_{}", link.root, link.other);
        if !edge_ids.insert(id.clone()) {
            continue;
        }

        edges.push(DirectedEdge {
            id,
            source: link.root.clone(),
            target: link.other.clone(),
            label: link.link_type.clone(),
        });
    }

    let mut graph = CompiledGraph { nodes, edges };
    add_missing_endpoints(&mut graph);
    graph
}

/// Compile batch-discovery output.
///
/// Each search hit becomes a node; only its own outward links are
/// considered, since a container's children reference each other
/// outward-only within the batch.
pub fn compile_container(items: &[ItemRecord], config: &TrellisConfig) -> CompiledGraph {
    let mut nodes = Vec::with_capacity(items.len());
    let mut links = Vec::new();

    for item in items {
        nodes.push(GraphNode::from_record(item, config));

        for record in &item.fields.issuelinks {
            let Some(outward) = &record.outward_issue else {
                continue;
            };
            if record.inward_issue.is_some() {
                continue;
            }

            links.push(ParsedLink {
                link_type: record.link_type.name.clone(),
                direction: Direction::Out,
                root: item.key.clone(),
                other: outward.key.clone(),
            });
        }
    }

    compile(nodes, &links)
}

/// Synthesize placeholder nodes for edge endpoints outside the node set.
///
/// A link pointing at a key the discovery never produced is a
/// data-integrity anomaly in the remote data. The edge is kept (it is real
/// information) and the missing endpoint gets a bare node so the rendering
/// contract holds.
fn add_missing_endpoints(graph: &mut CompiledGraph) {
    let mut known: HashSet<String> = graph.nodes.iter().map(|n| n.key.clone()).collect();

    for edge in &graph.edges {
        for key in [&edge.source, &edge.target] {
            if known.insert(key.clone()) {
                tracing::warn!(key = %key, "edge references undiscovered item; adding placeholder node");
                graph.nodes.push(GraphNode::placeholder(key));
            }
        }
    }
}
