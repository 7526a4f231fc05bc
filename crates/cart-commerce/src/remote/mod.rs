//! Remote collaborators: the catalog and stock services.
//!
//! This module provides:
//! - `CatalogService` / `StockService` - the two read-only lookups the cart needs
//! - `ServiceTag` - which service a call went to, with its default timeout
//! - `TimeoutConfig` - bounded waiting on a remote call

mod dependency;
mod service;
mod timeout;

pub use dependency::ServiceTag;
pub use service::{CatalogService, ServiceError, StockService};
pub use timeout::TimeoutConfig;
