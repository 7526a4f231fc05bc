//! Fixture-backed catalog and stock service.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::catalog::{ProductInfo, StockInfo};
use crate::ids::ProductId;
use crate::remote::{CatalogService, ServiceError, StockService};

/// On-disk layout: a json-server database with `products` and `stock` tables.
#[derive(Debug, Default, Deserialize)]
struct Database {
    #[serde(default)]
    products: Vec<ProductInfo>,
    #[serde(default)]
    stock: Vec<StockInfo>,
}

/// Catalog and stock service answering from fixed data.
///
/// Used by the CLI against a local `server.json` and by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: HashMap<ProductId, ProductInfo>,
    stock: HashMap<ProductId, u32>,
}

impl StaticCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product with its available stock.
    pub fn with_product(mut self, product: ProductInfo, available: u32) -> Self {
        self.stock.insert(product.id, available);
        self.products.insert(product.id, product);
        self
    }

    /// Set the stock level of a product, listed in the catalog or not.
    pub fn with_stock(mut self, product_id: ProductId, available: u32) -> Self {
        self.stock.insert(product_id, available);
        self
    }

    /// Parse a json-server database document.
    pub fn from_json_str(json: &str) -> Result<Self, ServiceError> {
        let db: Database =
            serde_json::from_str(json).map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;
        Ok(Self {
            products: db.products.into_iter().map(|p| (p.id, p)).collect(),
            stock: db
                .stock
                .into_iter()
                .map(|s| (s.product_id, s.available))
                .collect(),
        })
    }

    /// Load a json-server database file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::Unavailable(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Number of products listed.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if no products are listed.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All listed products, ordered by id.
    pub fn products(&self) -> Vec<&ProductInfo> {
        let mut products: Vec<_> = self.products.values().collect();
        products.sort_by_key(|p| p.id);
        products
    }
}

#[async_trait]
impl CatalogService for StaticCatalog {
    async fn product(&self, product_id: ProductId) -> Result<ProductInfo, ServiceError> {
        self.products
            .get(&product_id)
            .cloned()
            .ok_or(ServiceError::NotFound(product_id))
    }
}

#[async_trait]
impl StockService for StaticCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, ServiceError> {
        self.stock
            .get(&product_id)
            .map(|&available| StockInfo::new(product_id, available))
            .ok_or(ServiceError::NotFound(product_id))
    }
}
