//! Cart error types.

use cart_store::StoreError;
use thiserror::Error;

use crate::ids::ProductId;
use crate::remote::{ServiceError, ServiceTag};

/// Errors that can occur in cart operations.
///
/// Every variant leaves both the in-memory cart and the stored snapshot as
/// they were before the failed operation.
#[derive(Error, Debug)]
pub enum CartError {
    /// Requested total exceeds the available stock.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: u32,
    },

    /// Removal requested for a product that is not in the cart.
    #[error("Product not in cart: {0}")]
    ProductNotInCart(ProductId),

    /// Catalog or stock lookup failed, timed out, or did not know the product.
    #[error("{service} service failed: {source}")]
    RemoteService {
        service: ServiceTag,
        #[source]
        source: ServiceError,
    },

    /// Durable storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// The stored snapshot could not be turned back into a cart.
    #[error("Corrupt cart snapshot: {0}")]
    CorruptSnapshot(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

impl CartError {
    pub(crate) fn remote(service: ServiceTag, source: ServiceError) -> Self {
        CartError::RemoteService { service, source }
    }

    /// Whether this failure is a stock shortfall.
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, CartError::InsufficientStock { .. })
    }
}
