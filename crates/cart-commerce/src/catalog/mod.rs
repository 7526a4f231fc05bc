//! Product catalog module.
//!
//! Contains the read-only views of products and stock that the cart fetches
//! from remote services, plus a fixture-backed implementation of both.

mod fixture;
mod inventory;
mod product;

pub use fixture::StaticCatalog;
pub use inventory::StockInfo;
pub use product::ProductInfo;
