//! Batch discovery for container roots.

use crate::error::Result;
use trellis_jira::{ItemClient, ItemRecord};

/// Field projection for the container search.
const BATCH_FIELDS: &[&str] = &["key", "issuelinks", "status"];

/// Fetch every child of a container in one search.
///
/// Children are items whose parent is the container directly or through an
/// intermediate grouping relation. No recursive walk follows: the batch is
/// assumed to be self-contained. Zero matches is a valid empty result, not
/// an error.
pub async fn fetch_container_items(
    client: &dyn ItemClient,
    container_key: &str,
) -> Result<Vec<ItemRecord>> {
    let jql = format!("parentEpic = {container_key} OR parent = {container_key}");
    tracing::debug!(container_key, "fetching container children");

    let items = client.search_items(&jql, BATCH_FIELDS).await?;
    tracing::debug!(container_key, children = items.len(), "container search done");
    Ok(items)
}
