//! Cart configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::remote::{ServiceTag, TimeoutConfig};

/// Storage key the cart snapshot lives under.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Runtime configuration for a [`CartManager`](crate::cart::CartManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Key of the persisted snapshot.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Timeout for catalog lookups, in milliseconds.
    #[serde(default = "default_catalog_timeout_ms")]
    pub catalog_timeout_ms: u64,

    /// Timeout for stock lookups, in milliseconds.
    #[serde(default = "default_stock_timeout_ms")]
    pub stock_timeout_ms: u64,

    /// Start with an empty cart instead of failing when the stored snapshot
    /// cannot be parsed. The stored value is only replaced by the next
    /// successful mutation.
    #[serde(default)]
    pub reset_corrupt_snapshot: bool,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_catalog_timeout_ms() -> u64 {
    ServiceTag::Catalog.default_timeout().as_millis() as u64
}

fn default_stock_timeout_ms() -> u64 {
    ServiceTag::Stock.default_timeout().as_millis() as u64
}

impl CartConfig {
    /// Override the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Timeout applied to calls to `service`.
    pub fn timeout_for(&self, service: ServiceTag) -> TimeoutConfig {
        let ms = match service {
            ServiceTag::Catalog => self.catalog_timeout_ms,
            ServiceTag::Stock => self.stock_timeout_ms,
        };
        TimeoutConfig::from_total(Duration::from_millis(ms))
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            catalog_timeout_ms: default_catalog_timeout_ms(),
            stock_timeout_ms: default_stock_timeout_ms(),
            reset_corrupt_snapshot: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, "@RocketShoes:cart");
        assert_eq!(
            config.timeout_for(ServiceTag::Catalog).total,
            Duration::from_millis(3000)
        );
        assert_eq!(
            config.timeout_for(ServiceTag::Stock).total,
            Duration::from_millis(2000)
        );
        assert!(!config.reset_corrupt_snapshot);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config: CartConfig = serde_json::from_str(r#"{"stock_timeout_ms": 250}"#).unwrap();
        assert_eq!(config.stock_timeout_ms, 250);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.catalog_timeout_ms, 3000);
    }
}
