//! Configuration for trellis.
//!
//! Configuration lives in a `trellis.yaml` file next to where the tool is
//! run. Every field has a default, so the file is optional; a missing file
//! means "defaults for everything" while a malformed file is an error.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "trellis.yaml";

/// Item type name that selects batch discovery
pub const DEFAULT_CONTAINER_TYPE: &str = "Epic";

/// Substring identifying tenant custom fields
pub const DEFAULT_CUSTOM_FIELD_MARKER: &str = "custom";

/// Substring in a custom-field value that marks an impediment
pub const DEFAULT_IMPEDIMENT_MARKER: &str = "Impediment";

/// Configuration file structure for trellis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrellisConfig {
    /// Base URL of the tracker REST API (e.g. "https://acme.atlassian.net")
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    /// Item type treated as a container and discovered via search
    #[serde(rename = "container-type")]
    pub container_type: String,

    /// Field-name substring that marks a custom field
    #[serde(rename = "custom-field-marker")]
    pub custom_field_marker: String,

    /// Value substring that marks an impediment flag
    #[serde(rename = "impediment-marker")]
    pub impediment_marker: String,
}

impl Default for TrellisConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            container_type: DEFAULT_CONTAINER_TYPE.to_string(),
            custom_field_marker: DEFAULT_CUSTOM_FIELD_MARKER.to_string(),
            impediment_marker: DEFAULT_IMPEDIMENT_MARKER.to_string(),
        }
    }
}

impl TrellisConfig {
    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration, falling back to defaults.
    ///
    /// With an explicit `path` the file must exist and parse. With `None`,
    /// `trellis.yaml` in the current directory is used if present, defaults
    /// otherwise.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path).await,
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::load(default_path).await
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// The base URL, or a config error naming the missing field.
    pub fn require_base_url(&self) -> Result<&str> {
        self.base_url.as_deref().ok_or_else(|| {
            Error::Config(format!(
                "base-url is not set; add it to {} or pass --base-url",
                CONFIG_FILE_NAME
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn loads_full_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "base-url: https://acme.atlassian.net\ncontainer-type: Initiative\n",
        )
        .unwrap();

        let config = TrellisConfig::load(&path).await.unwrap();
        assert_eq!(
            config.base_url.as_deref(),
            Some("https://acme.atlassian.net")
        );
        assert_eq!(config.container_type, "Initiative");
        // Unspecified fields keep their defaults.
        assert_eq!(config.impediment_marker, DEFAULT_IMPEDIMENT_MARKER);
    }

    #[tokio::test]
    async fn malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "base-url: [unclosed").unwrap();

        let result = TrellisConfig::load(&path).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn missing_explicit_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.yaml");
        assert!(TrellisConfig::load_or_default(Some(&path)).await.is_err());
    }

    #[test]
    fn require_base_url_reports_missing_field() {
        let config = TrellisConfig::default();
        let err = config.require_base_url().unwrap_err();
        assert!(err.to_string().contains("base-url"));
    }
}
