//! Wire types and client boundary for the Jira REST API.
//!
//! This crate owns the raw record types returned by the tracker
//! (`/rest/api/3/issue`, `/rest/api/3/search`, `/rest/api/3/serverInfo`) and
//! the [`ItemClient`] trait that the graph engine consumes. The engine never
//! touches a transport directly; it only sees parsed [`ItemRecord`]s.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod http;
pub mod types;

#[cfg(any(test, feature = "test-util"))]
pub mod fake;

pub use client::ItemClient;
pub use error::{Error, Result};
pub use http::HttpItemClient;
pub use types::{ItemFields, ItemRecord, ItemRef, LinkRecord, SearchPage, ServerInfo};

#[cfg(any(test, feature = "test-util"))]
pub use fake::FakeItemClient;
