//! Client configuration file handling.
//!
//! The config names the backend, the endpoint paths, and optionally the
//! bearer token. Every field has a default, so a partial file (or no file at
//! all) is valid; CLI flags override file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Endpoint paths, relative to `api_base_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub subscriptions: String,
    pub countries: String,
    pub create_school: String,
    pub create_admin: String,
    pub schools: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            subscriptions: "subscriptions-list".to_string(),
            countries: "countries-list".to_string(),
            create_school: "create-school".to_string(),
            create_admin: "create-admin".to_string(),
            schools: "schools-list".to_string(),
        }
    }
}

impl Endpoints {
    fn all(&self) -> [(&'static str, &str); 5] {
        [
            ("subscriptions", &self.subscriptions),
            ("countries", &self.countries),
            ("create_school", &self.create_school),
            ("create_admin", &self.create_admin),
            ("schools", &self.schools),
        ]
    }
}

/// Backend connection settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Bearer credential from the session collaborator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub endpoints: Endpoints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            token: None,
            timeout_secs: 30,
            endpoints: Endpoints::default(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

impl ClientConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Apply command-line overrides. `None` keeps the file value.
    pub fn with_overrides(mut self, api_url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.token = Some(token);
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join an endpoint path onto the base URL with exactly one slash.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            anyhow::bail!("api_base_url must be specified");
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("api_base_url must start with http:// or https://");
        }

        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }

        for (name, path) in self.endpoints.all() {
            if path.trim().is_empty() {
                anyhow::bail!("Endpoint path '{}' must not be empty", name);
            }
        }

        if let Some(token) = &self.token {
            if token.contains(char::is_whitespace) {
                anyhow::bail!("Token cannot contain whitespace");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_base_url": "https://api.example.org/v1"}"#).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.org/v1");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.endpoints.create_school, "create-school");
        assert!(config.token.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ClientConfig::default();
        config.api_base_url = "https://api.example.org".to_string();
        config.endpoints.schools = "schools".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = ClientConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_scheme() {
        let mut config = ClientConfig::default();
        config.api_base_url = "ftp://example.org".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ClientConfig::default();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let mut config = ClientConfig::default();
        config.endpoints.create_admin = " ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("create_admin"));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::default()
            .with_overrides(Some("https://x.test".to_string()), Some("tok".to_string()));
        assert_eq!(config.api_base_url, "https://x.test");
        assert_eq!(config.token.as_deref(), Some("tok"));

        let kept = config.clone().with_overrides(None, Some(String::new()));
        assert_eq!(kept.token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_endpoint_url_joins_single_slash() {
        let mut config = ClientConfig::default();
        config.api_base_url = "https://x.test/api/".to_string();
        assert_eq!(
            config.endpoint_url("/create-school"),
            "https://x.test/api/create-school"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::default().with_overrides(None, Some("s3cr3t".to_string()));
        assert!(!format!("{:?}", config).contains("s3cr3t"));
    }
}
