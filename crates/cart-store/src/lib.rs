//! Durable key-value storage for cart snapshots.
//!
//! Provides a small, typed API over a byte-oriented key-value backend with
//! automatic JSON serialization. Every write replaces the whole value stored
//! under a key.
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_store::{MemoryBackend, Store};
//!
//! let store = Store::new(MemoryBackend::new());
//!
//! // Store a value
//! store.set("@RocketShoes:cart", &items)?;
//!
//! // Retrieve a value
//! let items: Option<Vec<Item>> = store.get("@RocketShoes:cart")?;
//!
//! // Delete a value
//! store.delete("@RocketShoes:cart")?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
#[cfg(target_arch = "wasm32")]
pub use backend::SpinBackend;
pub use error::StoreError;
pub use kv::Store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileBackend, KeyValueBackend, MemoryBackend, Store, StoreError};
}
