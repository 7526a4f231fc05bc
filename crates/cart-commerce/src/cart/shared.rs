//! A cart manager shared between tasks.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::cart::{Cart, CartCommand, CartItem, CartManager, Notice};
use crate::error::CartError;
use crate::ids::ProductId;

/// Cloneable handle that serializes mutations of one [`CartManager`].
///
/// Each mutation holds the lock across its remote lookups, so two requests
/// for the same product cannot both pass validation against the same
/// starting cart. Reads go through the published snapshot and never wait.
#[derive(Clone)]
pub struct SharedCartManager {
    inner: Arc<Mutex<CartManager>>,
    updates: watch::Receiver<Cart>,
}

impl SharedCartManager {
    /// Wrap a manager.
    pub fn new(manager: CartManager) -> Self {
        let updates = manager.subscribe();
        Self {
            inner: Arc::new(Mutex::new(manager)),
            updates,
        }
    }

    /// Latest published cart.
    pub fn cart(&self) -> Cart {
        self.updates.borrow().clone()
    }

    /// Receive every published cart snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.updates.clone()
    }

    /// See [`CartManager::add_product`].
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        self.inner.lock().await.add_product(product_id).await
    }

    /// See [`CartManager::remove_product`].
    pub async fn remove_product(&self, product_id: ProductId) -> Result<CartItem, CartError> {
        self.inner.lock().await.remove_product(product_id).await
    }

    /// See [`CartManager::update_amount`].
    pub async fn update_amount(&self, product_id: ProductId, amount: i64) -> Result<bool, CartError> {
        self.inner.lock().await.update_amount(product_id, amount).await
    }

    /// See [`CartManager::dispatch`].
    pub async fn dispatch(&self, command: CartCommand) -> Option<Notice> {
        self.inner.lock().await.dispatch(command).await
    }
}
