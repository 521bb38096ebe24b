//! Scripted [`ItemClient`] for tests.
//!
//! Available when running this crate's own tests or when the `test-util`
//! feature is enabled. Downstream crates script the tracker once, run the
//! engine against it, and then assert on what was fetched:
//!
//! ```toml
//! [dev-dependencies]
//! trellis-jira = { version = "...", features = ["test-util"] }
//! ```

use crate::client::ItemClient;
use crate::error::{Error, Result};
use crate::types::{ItemFields, ItemRecord, ItemRef, LinkRecord, ServerInfo, StatusRecord, TypeRecord};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// In-memory tracker double with call recording.
///
/// `fetch_item` serves from the scripted item map, `search_items` replays a
/// fixed result list, and every call is recorded so tests can assert on
/// request counts (e.g. that a container build never fetched children
/// individually).
#[derive(Debug, Default)]
pub struct FakeItemClient {
    items: HashMap<String, ItemRecord>,
    failing: HashSet<String>,
    search_results: Vec<ItemRecord>,
    base_url: Option<String>,
    calls: Mutex<Calls>,
}

#[derive(Debug, Default, Clone)]
struct Calls {
    fetched: Vec<String>,
    searches: Vec<String>,
}

impl FakeItemClient {
    /// Create an empty fake; every fetch returns `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script an item, keyed by its record key.
    #[must_use]
    pub fn with_item(mut self, item: ItemRecord) -> Self {
        self.items.insert(item.key.clone(), item);
        self
    }

    /// Make fetches of `key` fail with a synthetic server error.
    #[must_use]
    pub fn with_failing_key(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    /// Script the result list returned by every search.
    #[must_use]
    pub fn with_search_results(mut self, items: Vec<ItemRecord>) -> Self {
        self.search_results = items;
        self
    }

    /// Script the base URL reported by `server_info`.
    #[must_use]
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Keys fetched so far, in call order (revisits included).
    pub fn fetched_keys(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").fetched.clone()
    }

    /// JQL strings searched so far, in call order.
    pub fn search_queries(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").searches.clone()
    }
}

/// Build a minimal item record for scripting.
pub fn record(key: &str, status: &str, issuetype: &str, links: Vec<LinkRecord>) -> ItemRecord {
    ItemRecord {
        key: key.to_string(),
        fields: ItemFields {
            status: Some(StatusRecord {
                name: status.to_string(),
                category: None,
            }),
            issuetype: Some(TypeRecord {
                name: issuetype.to_string(),
            }),
            issuelinks: links,
            extra: Default::default(),
        },
    }
}

/// An outward link of the given type to `other`.
pub fn outward(link_type: &str, other: &str) -> LinkRecord {
    LinkRecord {
        link_type: TypeRecord {
            name: link_type.to_string(),
        },
        inward_issue: None,
        outward_issue: Some(ItemRef {
            key: other.to_string(),
        }),
    }
}

/// An inward link of the given type from `other`.
pub fn inward(link_type: &str, other: &str) -> LinkRecord {
    LinkRecord {
        link_type: TypeRecord {
            name: link_type.to_string(),
        },
        inward_issue: Some(ItemRef {
            key: other.to_string(),
        }),
        outward_issue: None,
    }
}

#[async_trait]
impl ItemClient for FakeItemClient {
    async fn fetch_item(&self, key: &str, _fields: &[&str]) -> Result<ItemRecord> {
        self.calls
            .lock()
            .expect("calls lock")
            .fetched
            .push(key.to_string());

        if self.failing.contains(key) {
            return Err(Error::Status {
                status: 500,
                context: key.to_string(),
            });
        }

        self.items
            .get(key)
            .cloned()
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }

    async fn search_items(&self, jql: &str, _fields: &[&str]) -> Result<Vec<ItemRecord>> {
        self.calls
            .lock()
            .expect("calls lock")
            .searches
            .push(jql.to_string());
        Ok(self.search_results.clone())
    }

    async fn server_info(&self) -> Result<ServerInfo> {
        Ok(ServerInfo {
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| "https://tracker.invalid".to_string()),
        })
    }
}
