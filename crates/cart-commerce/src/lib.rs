//! Stock-checked shopping cart state with durable snapshots.
//!
//! This crate provides the cart side of a storefront client:
//!
//! - **Catalog**: product metadata and stock levels, fetched from remote services
//! - **Cart**: line items keyed by product, with quantities and totals
//! - **Manager**: the single owner of a cart, validating every mutation against
//!   live stock and persisting a full snapshot after each success
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_commerce::prelude::*;
//! use cart_store::MemoryBackend;
//!
//! let catalog = Arc::new(StaticCatalog::load("server.json")?);
//! let mut manager = CartManager::load(
//!     CartConfig::default(),
//!     MemoryBackend::new(),
//!     catalog.clone(),
//!     catalog,
//! )?;
//!
//! manager.add_product(ProductId::new(42)).await?;
//! manager.update_amount(ProductId::new(42), 3).await?;
//! println!("Total: {}", manager.cart().total()?.display());
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod remote;

pub use config::CartConfig;
pub use error::CartError;
pub use ids::ProductId;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::CartConfig;
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{ProductInfo, StaticCatalog, StockInfo};

    // Remote services
    pub use crate::remote::{CatalogService, ServiceError, ServiceTag, StockService, TimeoutConfig};

    // Cart
    pub use crate::cart::{
        Cart, CartCommand, CartItem, CartManager, CartOperation, Notice, NoticeKind,
        SharedCartManager, UpdateProductAmount,
    };
}
