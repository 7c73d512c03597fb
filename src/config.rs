//! Provider configuration.
//!
//! Remote segmentation services are injected as configuration — identity,
//! endpoint, and credential never appear in core logic and are not read
//! from the environment here. The host loads a `providers.toml` (or
//! builds the structs directly) and turns it into a
//! [`ProviderRegistry`].
//!
//! ## Configuration Options
//!
//! ```toml
//! # Providers are tried in listed order (subject to rotation affinity).
//!
//! [[providers]]
//! name = "Clipdrop #1"
//! endpoint = "https://clipdrop.co/api/remove-background/v1"
//! credential = "ck_..."
//!
//! [[providers]]
//! name = "Remove.bg #1"
//! endpoint = "https://api.remove.bg/v1.0/removebg"
//! credential = "rb_..."
//! header = "X-Api-Key"   # credential header, default "x-api-key"
//! size_option = true     # endpoint accepts a `size` field
//! ```
//!
//! `size_option` is a declared capability: an endpoint either documents
//! the option or it doesn't. There is no try-with/retry-without probing.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::removal::{HttpProvider, ProviderRegistry};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Provider setup failed: {0}")]
    Provider(String),
}

/// The full provider configuration document.
///
/// An empty provider list is valid — the pipeline degrades to the local
/// chroma-key fallback — but gets a warning because it is usually a
/// deployment mistake.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvidersConfig {
    pub providers: Vec<ProviderConfig>,
}

/// One remote segmentation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Display label, used in progress and error messages.
    pub name: String,
    /// Full endpoint URL.
    pub endpoint: String,
    /// Opaque auth token sent in the credential header.
    pub credential: String,
    /// Header carrying the credential.
    #[serde(default = "default_header")]
    pub header: String,
    /// Whether the endpoint accepts a `size` option.
    #[serde(default)]
    pub size_option: bool,
}

fn default_header() -> String {
    "x-api-key".to_string()
}

impl ProvidersConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Check that every provider is fully specified.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for provider in &self.providers {
            if provider.name.is_empty() {
                return Err(ConfigError::Validation(
                    "provider name must not be empty".into(),
                ));
            }
            if provider.endpoint.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "provider {:?} has an empty endpoint",
                    provider.name
                )));
            }
            if provider.credential.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "provider {:?} has an empty credential",
                    provider.name
                )));
            }
        }
        Ok(())
    }

    /// Build the provider registry this configuration describes.
    pub fn build_registry(&self) -> Result<ProviderRegistry, ConfigError> {
        if self.providers.is_empty() {
            log::warn!("no background removal providers configured; only the local fallback is available");
        }

        let mut registry = ProviderRegistry::new();
        for provider in &self.providers {
            let http = HttpProvider::new(
                provider.name.as_str(),
                provider.endpoint.as_str(),
                provider.credential.as_str(),
            )
            .map_err(|e| ConfigError::Provider(e.to_string()))?
            .with_header(provider.header.as_str())
            .with_size_option(provider.size_option);
            registry.push(Box::new(http));
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[providers]]
        name = "Clipdrop #1"
        endpoint = "https://clipdrop.example/v1"
        credential = "key-1"

        [[providers]]
        name = "Remove.bg #1"
        endpoint = "https://removebg.example/v1.0"
        credential = "key-2"
        header = "X-Api-Key"
        size_option = true
    "#;

    #[test]
    fn parses_a_full_document() {
        let config = ProvidersConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.providers[0].name, "Clipdrop #1");
        assert_eq!(config.providers[1].header, "X-Api-Key");
        assert!(config.providers[1].size_option);
    }

    #[test]
    fn header_and_size_option_have_defaults() {
        let config = ProvidersConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.providers[0].header, "x-api-key");
        assert!(!config.providers[0].size_option);
    }

    #[test]
    fn empty_document_is_valid() {
        let config = ProvidersConfig::from_toml_str("").unwrap();
        assert!(config.providers.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let raw = r#"
            [[providers]]
            name = "A"
            endpoint = "https://a.example"
            credential = "k"
            api_key = "typo"
        "#;
        assert!(matches!(
            ProvidersConfig::from_toml_str(raw),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn empty_credential_fails_validation() {
        let raw = r#"
            [[providers]]
            name = "A"
            endpoint = "https://a.example"
            credential = ""
        "#;
        let err = ProvidersConfig::from_toml_str(raw).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("credential"));
    }

    #[test]
    fn empty_name_fails_validation() {
        let raw = r#"
            [[providers]]
            name = ""
            endpoint = "https://a.example"
            credential = "k"
        "#;
        assert!(matches!(
            ProvidersConfig::from_toml_str(raw),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn registry_preserves_declaration_order() {
        let config = ProvidersConfig::from_toml_str(SAMPLE).unwrap();
        let registry = config.build_registry().unwrap();
        assert_eq!(registry.names(), vec!["Clipdrop #1", "Remove.bg #1"]);
        assert_eq!(registry.cursor(), 0);
    }

    #[test]
    fn empty_config_builds_an_empty_registry() {
        let registry = ProvidersConfig::default().build_registry().unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("providers.toml");
        fs::write(&path, SAMPLE).unwrap();

        let config = ProvidersConfig::load(&path).unwrap();
        assert_eq!(config.providers.len(), 2);
    }

    #[test]
    fn load_missing_file_is_an_io_error() {
        let result = ProvidersConfig::load(Path::new("/nonexistent/providers.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
