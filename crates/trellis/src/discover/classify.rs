//! Root classification: container or plain item.

use crate::config::TrellisConfig;
use crate::error::Result;
use super::RootKind;
use trellis_jira::ItemClient;

/// Field projection for classification; nothing but the type name is needed.
const CLASSIFY_FIELDS: &[&str] = &["issuetype"];

/// Determine which discovery strategy fits the root item.
///
/// Fetches only the root's type name and compares it against the configured
/// container type. A fetch failure here is fatal for the whole build: there
/// is no partial result for an unknown root.
pub async fn classify_root(
    client: &dyn ItemClient,
    config: &TrellisConfig,
    key: &str,
) -> Result<RootKind> {
    let item = client.fetch_item(key, CLASSIFY_FIELDS).await?;

    let type_name = item
        .fields
        .issuetype
        .map(|t| t.name)
        .unwrap_or_default();

    let kind = if type_name == config.container_type {
        RootKind::Container
    } else {
        RootKind::Plain
    };

    tracing::debug!(key, %type_name, ?kind, "classified root");
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_jira::fake::{record, FakeItemClient};

    #[tokio::test]
    async fn epic_classifies_as_container() {
        let client = FakeItemClient::new().with_item(record("EPIC-1", "Open", "Epic", vec![]));
        let config = TrellisConfig::default();

        let kind = classify_root(&client, &config, "EPIC-1").await.unwrap();
        assert_eq!(kind, RootKind::Container);
    }

    #[tokio::test]
    async fn task_classifies_as_plain() {
        let client = FakeItemClient::new().with_item(record("T-1", "Open", "Task", vec![]));
        let config = TrellisConfig::default();

        let kind = classify_root(&client, &config, "T-1").await.unwrap();
        assert_eq!(kind, RootKind::Plain);
    }

    #[tokio::test]
    async fn container_type_is_configurable() {
        let client =
            FakeItemClient::new().with_item(record("IN-1", "Open", "Initiative", vec![]));
        let config = TrellisConfig {
            container_type: "Initiative".to_string(),
            ..TrellisConfig::default()
        };

        let kind = classify_root(&client, &config, "IN-1").await.unwrap();
        assert_eq!(kind, RootKind::Container);
    }

    #[tokio::test]
    async fn unknown_root_is_fatal() {
        let client = FakeItemClient::new();
        let config = TrellisConfig::default();

        let result = classify_root(&client, &config, "NOPE-1").await;
        assert!(result.is_err());
    }
}
