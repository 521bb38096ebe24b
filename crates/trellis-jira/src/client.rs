//! The client boundary consumed by the graph engine.

use crate::error::Result;
use crate::types::{ItemRecord, ServerInfo};
use async_trait::async_trait;

/// Operations the graph engine needs from the tracker.
///
/// The trait is object-safe and `Send + Sync` so the engine can hold a
/// `Box<dyn ItemClient>` and tests can substitute a scripted fake. All
/// methods take `&self`; implementations are expected to manage their own
/// connection state internally.
#[async_trait]
pub trait ItemClient: Send + Sync {
    /// Fetch a single item by key.
    ///
    /// `fields` is a projection hint: the names to include in the response
    /// payload. An empty slice requests the full record. Implementations may
    /// return more fields than asked for, never fewer.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` if the key does not exist
    /// - `Error::Http` / `Error::Status` on transport or server failure
    /// - `Error::Decode` if the response body is not valid wire format
    async fn fetch_item(&self, key: &str, fields: &[&str]) -> Result<ItemRecord>;

    /// Run a JQL search, returning all matching items.
    ///
    /// `fields` carries the same projection semantics as [`fetch_item`].
    /// Zero matches is `Ok(vec![])`, not an error.
    ///
    /// [`fetch_item`]: ItemClient::fetch_item
    async fn search_items(&self, jql: &str, fields: &[&str]) -> Result<Vec<ItemRecord>>;

    /// Fetch deployment metadata, primarily the public base URL used to
    /// build browse links for rendered nodes.
    async fn server_info(&self) -> Result<ServerInfo>;
}
