//! Raw record types for the tracker's JSON wire format.
//!
//! These types mirror the REST payloads as closely as possible and stay
//! deliberately loose: any field the server may omit is an `Option` or a
//! defaulted collection, and custom fields are captured untyped in
//! [`ItemFields::extra`] so callers can inspect them without this crate
//! knowing every tenant's field catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A work item as returned by `/rest/api/3/issue/{key}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Unique item key, e.g. `PROJ-123`.
    pub key: String,

    /// Field payload; contents depend on the requested field projection.
    #[serde(default)]
    pub fields: ItemFields,
}

/// The `fields` object of an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemFields {
    /// Workflow status. Absent when not in the field projection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusRecord>,

    /// Item type. Absent when not in the field projection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuetype: Option<TypeRecord>,

    /// Typed links to other items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issuelinks: Vec<LinkRecord>,

    /// Everything else, including tenant-specific `customfield_*` entries.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Workflow status of an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Status display name, e.g. `In Progress`.
    pub name: String,

    /// Status category (`To Do` / `In Progress` / `Done`).
    #[serde(
        rename = "statusCategory",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<TypeRecord>,
}

/// A named type reference (`issuetype`, link type, status category).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRecord {
    /// Display name of the type.
    pub name: String,
}

/// A typed relationship attached to an item.
///
/// Directionality is encoded by which reference is populated: an outward
/// link on `A` pointing at `B` shows up as `outward_issue: Some(B)` on `A`
/// and as the mirrored `inward_issue: Some(A)` on `B`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Link type, e.g. `Blocks` or `Relates`.
    #[serde(rename = "type")]
    pub link_type: TypeRecord,

    /// The other item, when this is the inward half of the relationship.
    #[serde(
        rename = "inwardIssue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub inward_issue: Option<ItemRef>,

    /// The other item, when this is the outward half of the relationship.
    #[serde(
        rename = "outwardIssue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub outward_issue: Option<ItemRef>,
}

/// A bare reference to another item inside a link record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRef {
    /// Key of the referenced item.
    pub key: String,
}

/// Response envelope for `/rest/api/3/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    /// Items matching the query.
    #[serde(default)]
    pub issues: Vec<ItemRecord>,
}

/// Response of `/rest/api/3/serverInfo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Public base URL of the tracker, used to build browse links.
    #[serde(rename = "baseUrl")]
    pub base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM_JSON: &str = r#"{
        "key": "PROJ-42",
        "fields": {
            "status": {
                "name": "In Progress",
                "statusCategory": { "name": "In Progress" }
            },
            "issuetype": { "name": "Task" },
            "issuelinks": [
                {
                    "type": { "name": "Blocks" },
                    "outwardIssue": { "key": "PROJ-43" }
                },
                {
                    "type": { "name": "Blocks" },
                    "inwardIssue": { "key": "PROJ-41" }
                }
            ],
            "customfield_10021": [ { "value": "Impediment" } ],
            "summary": "Wire up the frobnicator"
        }
    }"#;

    #[test]
    fn deserializes_full_item() {
        let item: ItemRecord = serde_json::from_str(ITEM_JSON).unwrap();
        assert_eq!(item.key, "PROJ-42");
        assert_eq!(item.fields.status.as_ref().unwrap().name, "In Progress");
        assert_eq!(item.fields.issuetype.as_ref().unwrap().name, "Task");
        assert_eq!(item.fields.issuelinks.len(), 2);

        let outward = &item.fields.issuelinks[0];
        assert_eq!(outward.link_type.name, "Blocks");
        assert_eq!(outward.outward_issue.as_ref().unwrap().key, "PROJ-43");
        assert!(outward.inward_issue.is_none());
    }

    #[test]
    fn captures_custom_fields_in_extra() {
        let item: ItemRecord = serde_json::from_str(ITEM_JSON).unwrap();
        assert!(item.fields.extra.contains_key("customfield_10021"));
        assert!(item.fields.extra.contains_key("summary"));
        // Known fields are consumed by their typed slots, not duplicated.
        assert!(!item.fields.extra.contains_key("status"));
        assert!(!item.fields.extra.contains_key("issuelinks"));
    }

    #[test]
    fn deserializes_minimal_projection() {
        // A projection like fields=issuetype returns almost nothing else.
        let item: ItemRecord =
            serde_json::from_str(r#"{"key":"PROJ-1","fields":{"issuetype":{"name":"Epic"}}}"#)
                .unwrap();
        assert_eq!(item.fields.issuetype.as_ref().unwrap().name, "Epic");
        assert!(item.fields.status.is_none());
        assert!(item.fields.issuelinks.is_empty());
    }

    #[test]
    fn deserializes_empty_search_page() {
        let page: SearchPage = serde_json::from_str(r#"{"issues":[]}"#).unwrap();
        assert!(page.issues.is_empty());

        // Some deployments omit the array entirely for zero matches.
        let page: SearchPage = serde_json::from_str("{}").unwrap();
        assert!(page.issues.is_empty());
    }

    #[test]
    fn deserializes_server_info() {
        let info: ServerInfo =
            serde_json::from_str(r#"{"baseUrl":"https://acme.atlassian.net"}"#).unwrap();
        assert_eq!(info.base_url, "https://acme.atlassian.net");
    }
}
