//! Generator configuration.
//!
//! Loaded from TOML by whichever front end drives the generator:
//!
//! ```toml
//! adapters = ["rpc", "tanstack-query", "swr"]
//! types_module = "./types"
//! docs = true
//!
//! [client]
//! module = "./client"
//! name = "client"
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Target consumption convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdapterKind {
    /// Plain async call per route
    Rpc,
    /// TanStack Query for React
    TanstackQuery,
    /// TanStack Query for Svelte
    SvelteQuery,
    /// TanStack Query for Vue
    VueQuery,
    /// SWR
    Swr,
}

impl AdapterKind {
    /// Every adapter, in canonical order.
    pub const ALL: [AdapterKind; 5] = [
        AdapterKind::Rpc,
        AdapterKind::TanstackQuery,
        AdapterKind::SvelteQuery,
        AdapterKind::VueQuery,
        AdapterKind::Swr,
    ];

    /// Config / diagnostic name.
    pub const fn as_str(self) -> &'static str {
        match self {
            AdapterKind::Rpc => "rpc",
            AdapterKind::TanstackQuery => "tanstack-query",
            AdapterKind::SvelteQuery => "svelte-query",
            AdapterKind::VueQuery => "vue-query",
            AdapterKind::Swr => "swr",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the transport client lives and what it is called
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Module the client is imported from
    pub module: String,
    /// Exported identifier of the client instance
    pub name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            module: "./client".into(),
            name: "client".into(),
        }
    }
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML could not be parsed into a config.
    #[error("Invalid generator config: {0}")]
    Toml(#[from] toml::de::Error),

    /// No adapter enabled.
    #[error("Generator config enables no adapters")]
    NoAdapters,
}

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Enabled adapters; output follows this order
    pub adapters: Vec<AdapterKind>,
    /// Transport client location
    pub client: ClientConfig,
    /// Module the shared declarations are imported from
    pub types_module: String,
    /// Emit JSDoc blocks on calls and hooks
    pub docs: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            adapters: AdapterKind::ALL.to_vec(),
            client: ClientConfig::default(),
            types_module: "./types".into(),
            docs: true,
        }
    }
}

impl GeneratorConfig {
    /// Parse and validate a TOML config.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(s)?;
        if config.adapters.is_empty() {
            return Err(ConfigError::NoAdapters);
        }
        config.adapters = unique_adapters(config.adapters);
        Ok(config)
    }

    /// Config with only the given adapters enabled.
    pub fn with_adapters(adapters: impl IntoIterator<Item = AdapterKind>) -> Self {
        Self {
            adapters: unique_adapters(adapters),
            ..Self::default()
        }
    }
}

/// First occurrence of each adapter, in order. Listing an adapter twice
/// would emit its unit twice.
fn unique_adapters(adapters: impl IntoIterator<Item = AdapterKind>) -> Vec<AdapterKind> {
    let mut unique = Vec::new();
    for adapter in adapters {
        if !unique.contains(&adapter) {
            unique.push(adapter);
        }
    }
    unique
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let config = GeneratorConfig::default();
        assert_eq!(config.adapters, AdapterKind::ALL.to_vec());
        assert_eq!(config.client.module, "./client");
        assert!(config.docs);
    }

    #[test]
    fn test_from_toml() {
        let config = GeneratorConfig::from_toml_str(
            r#"
adapters = ["swr", "rpc", "swr"]
docs = false

[client]
module = "@/lib/api-client"
"#,
        )
        .unwrap();
        assert_eq!(config.adapters, vec![AdapterKind::Swr, AdapterKind::Rpc]);
        assert_eq!(config.client.module, "@/lib/api-client");
        assert_eq!(config.client.name, "client");
        assert_eq!(config.types_module, "./types");
        assert!(!config.docs);
    }

    #[test]
    fn test_with_adapters_drops_repeats() {
        let config =
            GeneratorConfig::with_adapters([AdapterKind::Swr, AdapterKind::Rpc, AdapterKind::Swr]);
        assert_eq!(config.adapters, vec![AdapterKind::Swr, AdapterKind::Rpc]);
    }

    #[test]
    fn test_empty_adapter_list_rejected() {
        let err = GeneratorConfig::from_toml_str("adapters = []").unwrap_err();
        assert!(matches!(err, ConfigError::NoAdapters));
    }

    #[test]
    fn test_unknown_adapter_rejected() {
        let err = GeneratorConfig::from_toml_str(r#"adapters = ["react-query"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().starts_with("Invalid generator config"));
    }
}
