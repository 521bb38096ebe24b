//! Discovery: root classification, the two fetch strategies, and dispatch.
//!
//! A build is one pass: classify the root, run the strategy the
//! classification selects, compile. All state (queue, seen-map, accumulated
//! links) is local to the single [`build_graph`] call; nothing is cached
//! across invocations.

pub mod batch;
pub mod classify;
pub mod walk;

use crate::config::TrellisConfig;
use crate::error::Result;
use crate::graph::compile;
use crate::graph::CompiledGraph;
use trellis_jira::ItemClient;

/// What the root item turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// An ordinary item; discovery walks its links outward.
    Plain,

    /// A container ("epic"); discovery queries its children in one batch.
    Container,
}

/// Discovery strategy selected once per build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStrategy {
    /// One fetch per item, following links until no new keys remain.
    Incremental,

    /// One search returning all container children and their links.
    Batch,
}

impl From<RootKind> for DiscoveryStrategy {
    fn from(kind: RootKind) -> Self {
        match kind {
            RootKind::Plain => DiscoveryStrategy::Incremental,
            RootKind::Container => DiscoveryStrategy::Batch,
        }
    }
}

/// Build the compiled dependency graph for `root_key`.
///
/// Classifier failures (unknown root, transport errors) abort the build.
/// For a plain root the root's own node is marked for visual emphasis; a
/// container root does not appear in its children's graph.
pub async fn build_graph(
    client: &dyn ItemClient,
    config: &TrellisConfig,
    root_key: &str,
) -> Result<CompiledGraph> {
    let kind = classify::classify_root(client, config, root_key).await?;
    let strategy = DiscoveryStrategy::from(kind);
    tracing::info!(root_key, ?strategy, "building dependency graph");

    match strategy {
        DiscoveryStrategy::Batch => {
            let items = batch::fetch_container_items(client, root_key).await?;
            Ok(compile::compile_container(&items, config))
        }
        DiscoveryStrategy::Incremental => {
            let discovery = walk::traverse(client, config, root_key).await;
            let mut graph = compile::compile(discovery.nodes, &discovery.links);

            if let Some(root) = graph.nodes.iter_mut().find(|n| n.key == root_key) {
                root.root = true;
            }

            Ok(graph)
        }
    }
}
