//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use cart_commerce::prelude::*;
use cart_store::FileBackend;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["cart.toml", ".cart.toml", "cart.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Load the fixture catalog.
    pub fn catalog(&self) -> Result<Arc<StaticCatalog>> {
        let path = self.resolve_path(&self.config.catalog.fixture);
        self.output.debug(&format!("Catalog: {}", path.display()));
        let catalog = StaticCatalog::load(&path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
        Ok(Arc::new(catalog))
    }

    /// Open the cart manager over the configured store and catalog.
    pub fn manager(&self) -> Result<CartManager> {
        self.manager_with(self.catalog()?)
    }

    /// Open the cart manager over the configured store and an already
    /// loaded catalog.
    pub fn manager_with(&self, catalog: Arc<StaticCatalog>) -> Result<CartManager> {
        let dir = self.resolve_path(&self.config.store.dir);
        self.output.debug(&format!("Store: {}", dir.display()));
        let backend = FileBackend::open(&dir)?;

        CartManager::load(self.config.cart.clone(), backend, catalog.clone(), catalog)
            .context("Failed to load cart")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(dir: &Path) -> Context {
        let mut config = CliConfig::default();
        config.catalog.fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/server.json").to_string();
        Context {
            config,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("cart.toml"), "[store]\ndir = \"carts\"\n").unwrap();

        let config = Context::find_config(&nested).unwrap();
        assert_eq!(config.store.dir, "carts");
    }

    #[test]
    fn test_resolve_path() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        assert_eq!(ctx.resolve_path(".cart"), dir.path().join(".cart"));
        assert_eq!(ctx.resolve_path("/tmp/x"), PathBuf::from("/tmp/x"));
    }

    #[tokio::test]
    async fn test_manager_persists_between_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let mut manager = ctx.manager().unwrap();
        manager.add_product(ProductId::new(42)).await.unwrap();
        manager.add_product(ProductId::new(1)).await.unwrap();
        drop(manager);

        let reopened = ctx.manager().unwrap();
        let ids: Vec<u64> = reopened.cart().iter().map(|i| i.product_id.get()).collect();
        assert_eq!(ids, vec![42, 1]);
        assert!(dir.path().join(".cart").join("%40RocketShoes%3Acart.json").is_file());
    }

    #[tokio::test]
    async fn test_manager_with_uses_given_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        ctx.config.catalog.fixture = "missing.json".to_string();
        assert!(ctx.catalog().is_err());

        let catalog = StaticCatalog::new().with_product(
            ProductInfo::new(ProductId::new(7), "Sock", Money::new(990), "sock.png"),
            2,
        );
        let mut manager = ctx.manager_with(Arc::new(catalog)).unwrap();
        manager.add_product(ProductId::new(7)).await.unwrap();
        assert_eq!(manager.cart().get(ProductId::new(7)).unwrap().title, "Sock");
    }

    #[test]
    fn test_sample_catalog_loads() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = context(dir.path()).catalog().unwrap();
        assert_eq!(catalog.len(), 4);
    }
}
