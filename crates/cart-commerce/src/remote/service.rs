//! Service traits for product and stock lookups.

use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::{ProductInfo, StockInfo};
use crate::ids::ProductId;

/// Error type for remote lookups.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Unknown product: {0}")]
    NotFound(ProductId),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Product metadata source.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch title, image and price for a product.
    async fn product(&self, product_id: ProductId) -> Result<ProductInfo, ServiceError>;
}

/// Live stock source. Never cached by the cart.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Fetch the currently available quantity of a product.
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, ServiceError>;
}
