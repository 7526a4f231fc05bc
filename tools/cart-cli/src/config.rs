//! CLI configuration.

use anyhow::{Context, Result};
use cart_commerce::CartConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart manager settings.
    #[serde(default)]
    pub cart: CartConfig,

    /// Where product and stock data come from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Where the cart snapshot is kept.
    #[serde(default)]
    pub store: StoreConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// json-server database with `products` and `stock` tables.
    #[serde(default = "default_fixture")]
    pub fixture: String,
}

fn default_fixture() -> String {
    "server.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            fixture: default_fixture(),
        }
    }
}

/// Snapshot storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one file per storage key.
    #[serde(default = "default_store_dir")]
    pub dir: String,
}

fn default_store_dir() -> String {
    ".cart".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

/// Generate a default cart.toml config file.
pub fn generate_default_config() -> String {
    r#"# Cart configuration

[cart]
storage_key = "@RocketShoes:cart"
catalog_timeout_ms = 3000
stock_timeout_ms = 2000
# Start empty instead of failing when the stored cart cannot be read.
reset_corrupt_snapshot = false

[catalog]
# json-server database: { "products": [...], "stock": [...] }
fixture = "server.json"

[store]
dir = ".cart"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let parsed: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, CliConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let parsed: CliConfig = toml::from_str(
            r#"
            [cart]
            stock_timeout_ms = 500

            [store]
            dir = "/var/lib/cart"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.cart.stock_timeout_ms, 500);
        assert_eq!(parsed.cart.storage_key, "@RocketShoes:cart");
        assert_eq!(parsed.store.dir, "/var/lib/cart");
        assert_eq!(parsed.catalog.fixture, "server.json");
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("cart.toml");
        std::fs::write(&toml_path, "[catalog]\nfixture = \"db.json\"\n").unwrap();
        let json_path = dir.path().join("cart.json");
        std::fs::write(&json_path, r#"{"catalog": {"fixture": "db.json"}}"#).unwrap();

        for path in [toml_path, json_path] {
            let config = CliConfig::load(path.to_str().unwrap()).unwrap();
            assert_eq!(config.catalog.fixture, "db.json");
            assert_eq!(config.store, StoreConfig::default());
        }

        assert!(CliConfig::load(dir.path().join("missing.toml").to_str().unwrap()).is_err());
    }
}
