//! Incremental discovery: a cycle-safe reachability walk over typed links.

use crate::config::TrellisConfig;
use crate::graph::{parse_link, GraphNode, ParsedLink};
use std::collections::HashMap;
use trellis_jira::ItemClient;

/// Raw output of one traversal: accumulated links (duplicates and mirror
/// halves included; the compiler dedups) and one node per fetched item.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Every valid parsed link, in encounter order.
    pub links: Vec<ParsedLink>,

    /// One node per item fetched exactly once.
    pub nodes: Vec<GraphNode>,
}

/// Walk the link graph reachable from `root_key`.
///
/// Maintains a work stack and a seen-map keyed by item key. Keys are pushed
/// unconditionally when a link is parsed; the seen-check happens on pop, so
/// cycles, self-loops, and diamonds all terminate: the seen-map only grows
/// and the reachable key space is finite.
///
/// Per-item fetch failures are logged and skipped; the failed key simply
/// never appears in the output and the rest of the graph is still produced.
pub async fn traverse(
    client: &dyn ItemClient,
    config: &TrellisConfig,
    root_key: &str,
) -> Discovery {
    let mut queue = vec![root_key.to_string()];
    let mut seen: HashMap<String, GraphNode> = HashMap::new();
    let mut links = Vec::new();

    while let Some(key) = queue.pop() {
        if seen.contains_key(&key) {
            continue;
        }

        let item = match client.fetch_item(&key, &[]).await {
            Ok(item) => item,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "item unreachable; continuing walk");
                continue;
            }
        };

        seen.insert(key.clone(), GraphNode::from_record(&item, config));

        for record in &item.fields.issuelinks {
            let Some(link) = parse_link(&key, record) else {
                tracing::debug!(key = %key, "skipping link record with no references");
                continue;
            };

            queue.push(link.other.clone());
            links.push(link);
        }
    }

    tracing::debug!(
        root_key,
        nodes = seen.len(),
        links = links.len(),
        "traversal complete"
    );

    Discovery {
        links,
        nodes: seen.into_values().collect(),
    }
}
