//! The cart owner: stock-checked mutations with durable snapshots.

use std::sync::Arc;

use cart_store::{KeyValueBackend, Store, StoreError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::cart::{Cart, CartCommand, CartItem, Notice, UpdateProductAmount};
use crate::catalog::{ProductInfo, StockInfo};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::remote::{CatalogService, ServiceTag, StockService};

/// Owns one cart, its storage handle and its remote collaborators.
///
/// The cart is read from storage once, at construction. Each successful
/// mutation writes the full snapshot and only then replaces the in-memory
/// cart, so a failed operation never leaves memory and storage apart.
/// Mutations take `&mut self`; share a manager between tasks through
/// [`SharedCartManager`](crate::cart::SharedCartManager).
pub struct CartManager {
    cart: Cart,
    store: Store<Arc<dyn KeyValueBackend>>,
    catalog: Arc<dyn CatalogService>,
    stock: Arc<dyn StockService>,
    config: CartConfig,
    published: watch::Sender<Cart>,
}

impl CartManager {
    /// Load the cart stored under `config.storage_key`, or start empty when
    /// nothing is stored.
    ///
    /// Fails with [`CartError::CorruptSnapshot`] when the stored value cannot
    /// be parsed, unless `config.reset_corrupt_snapshot` is set.
    pub fn load(
        config: CartConfig,
        backend: impl KeyValueBackend + 'static,
        catalog: Arc<dyn CatalogService>,
        stock: Arc<dyn StockService>,
    ) -> Result<Self, CartError> {
        let backend: Arc<dyn KeyValueBackend> = Arc::new(backend);
        let store = Store::new(backend);
        let cart = read_snapshot(&store, &config)?;
        info!(key = %config.storage_key, items = cart.len(), "cart loaded");

        let (published, _) = watch::channel(cart.clone());
        Ok(Self {
            cart,
            store,
            catalog,
            stock,
            config,
            published,
        })
    }

    /// Current cart. Read-only; mutate through the operations below.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Receive every published cart snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.published.subscribe()
    }

    /// Active configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart goes through the same stock-checked
    /// quantity change as [`update_amount`](Self::update_amount) with its
    /// amount plus one. A new product needs at least one unit in stock; its
    /// metadata is then fetched once and it is appended with amount 1.
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        if let Some(current) = self.cart.get(product_id).map(|i| i.amount) {
            self.set_amount_checked(product_id, i64::from(current) + 1)
                .await?;
            return Ok(());
        }

        let stock = self.fetch_stock(product_id).await?;
        ensure_stock(&stock, 1)?;
        let product = self.fetch_product(product_id).await?;

        let mut next = self.cart.clone();
        next.push(CartItem::from_product(product_id, product, 1));
        self.commit(next)?;
        debug!(%product_id, "product added");
        Ok(())
    }

    /// Remove a product entirely.
    ///
    /// Returns the removed line, or [`CartError::ProductNotInCart`] without
    /// touching storage when nothing matched.
    pub async fn remove_product(&mut self, product_id: ProductId) -> Result<CartItem, CartError> {
        let mut next = self.cart.clone();
        let removed = next.remove(product_id).ok_or_else(|| {
            warn!(%product_id, "remove requested for product not in cart");
            CartError::ProductNotInCart(product_id)
        })?;
        self.commit(next)?;
        debug!(%product_id, "product removed");
        Ok(removed)
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// Amounts of zero or less are ignored; use
    /// [`remove_product`](Self::remove_product) to drop a line. Otherwise
    /// the amount is checked against live stock first; a product that
    /// passes the check but is not in the cart is left alone. Returns
    /// whether the cart changed.
    pub async fn update_amount(
        &mut self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<bool, CartError> {
        self.set_amount_checked(product_id, amount).await
    }

    /// Run a presentation command, turning any failure into a [`Notice`].
    ///
    /// Nothing is propagated past this point; `None` means success.
    pub async fn dispatch(&mut self, command: CartCommand) -> Option<Notice> {
        let operation = command.operation();
        let result = match command {
            CartCommand::Add { product_id } => self.add_product(product_id).await,
            CartCommand::Remove { product_id } => self.remove_product(product_id).await.map(|_| ()),
            CartCommand::UpdateAmount(UpdateProductAmount { product_id, amount }) => {
                self.update_amount(product_id, amount).await.map(|_| ())
            }
        };

        match result {
            Ok(()) => None,
            Err(e) => {
                warn!(?operation, error = %e, "cart operation failed");
                Some(Notice::for_error(operation, &e))
            }
        }
    }

    /// Shared by `add_product` and `update_amount`: check `amount` against
    /// live stock, then replace the line's amount.
    async fn set_amount_checked(
        &mut self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<bool, CartError> {
        if amount <= 0 {
            debug!(%product_id, amount, "ignoring non-positive amount");
            return Ok(false);
        }

        let stock = self.fetch_stock(product_id).await?;
        ensure_stock(&stock, amount)?;
        let amount = u32::try_from(amount).map_err(|_| CartError::Overflow)?;

        let mut next = self.cart.clone();
        if !next.set_amount(product_id, amount) {
            // Nothing to replace. Kept as a no-op rather than ProductNotInCart.
            warn!(%product_id, amount, "amount change for product not in cart");
            return Ok(false);
        }
        self.commit(next)?;
        debug!(%product_id, amount, "amount updated");
        Ok(true)
    }

    async fn fetch_stock(&self, product_id: ProductId) -> Result<StockInfo, CartError> {
        self.config
            .timeout_for(ServiceTag::Stock)
            .run(self.stock.stock(product_id))
            .await
            .map_err(|e| CartError::remote(ServiceTag::Stock, e))
    }

    async fn fetch_product(&self, product_id: ProductId) -> Result<ProductInfo, CartError> {
        self.config
            .timeout_for(ServiceTag::Catalog)
            .run(self.catalog.product(product_id))
            .await
            .map_err(|e| CartError::remote(ServiceTag::Catalog, e))
    }

    /// Persist `next`, then make it current and publish it.
    fn commit(&mut self, next: Cart) -> Result<(), CartError> {
        self.store.set(&self.config.storage_key, &next)?;
        self.cart = next;
        self.published.send_replace(self.cart.clone());
        Ok(())
    }
}

fn read_snapshot(
    store: &Store<Arc<dyn KeyValueBackend>>,
    config: &CartConfig,
) -> Result<Cart, CartError> {
    match store.get::<Cart>(&config.storage_key) {
        Ok(Some(cart)) => Ok(cart),
        Ok(None) => Ok(Cart::new()),
        Err(StoreError::SerializeError(e)) if config.reset_corrupt_snapshot => {
            warn!(key = %config.storage_key, error = %e, "discarding unreadable cart snapshot");
            Ok(Cart::new())
        }
        Err(StoreError::SerializeError(e)) => Err(CartError::CorruptSnapshot(e.to_string())),
        Err(e) => Err(e.into()),
    }
}

fn ensure_stock(stock: &StockInfo, requested: i64) -> Result<(), CartError> {
    if stock.can_fulfill(requested) {
        return Ok(());
    }
    warn!(
        product_id = %stock.product_id,
        requested,
        available = stock.available,
        "insufficient stock"
    );
    Err(CartError::InsufficientStock {
        product_id: stock.product_id,
        requested,
        available: stock.available,
    })
}
