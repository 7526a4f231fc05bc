//! Cart and line item types.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::catalog::ProductInfo;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Money;

/// A line item in the cart.
///
/// Serialized with the snapshot field names `id, title, price, image, amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product being purchased.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Unit price at the time the product was added.
    #[serde(rename = "price")]
    pub unit_price: Money,
    /// Image URL.
    pub image: String,
    /// Quantity, always at least 1.
    pub amount: u32,
}

impl CartItem {
    /// Create a line item from catalog metadata.
    pub fn from_product(product_id: ProductId, product: ProductInfo, amount: u32) -> Self {
        Self {
            product_id,
            title: product.title,
            unit_price: product.price,
            image: product.image,
            amount,
        }
    }

    /// Unit price times amount.
    pub fn subtotal(&self) -> Result<Money, CartError> {
        self.unit_price
            .try_multiply(i64::from(self.amount))
            .ok_or(CartError::Overflow)
    }
}

/// A snapshot violating the cart invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCart {
    #[error("product {0} has amount 0")]
    ZeroAmount(ProductId),
    #[error("product {0} appears more than once")]
    DuplicateProduct(ProductId),
}

/// The ordered collection of line items.
///
/// At most one item per product; every amount is at least 1. Items keep the
/// order in which they were first added. Mutation is reserved to
/// [`CartManager`](crate::cart::CartManager).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from items, checking the invariants.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, InvalidCart> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.amount == 0 {
                return Err(InvalidCart::ZeroAmount(item.product_id));
            }
            if !seen.insert(item.product_id) {
                return Err(InvalidCart::DuplicateProduct(item.product_id));
            }
        }
        Ok(Self { items })
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Get the item for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of amounts).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.amount)).sum()
    }

    /// Amount held per product, for catalog listings.
    pub fn amounts_by_product(&self) -> HashMap<ProductId, u32> {
        self.items.iter().map(|i| (i.product_id, i.amount)).collect()
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> Result<Money, CartError> {
        let subtotals = self
            .items
            .iter()
            .map(CartItem::subtotal)
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(subtotals.iter()).ok_or(CartError::Overflow)
    }

    /// Append a new item. The caller guarantees the product is absent and
    /// the amount is positive.
    pub(crate) fn push(&mut self, item: CartItem) {
        debug_assert!(item.amount > 0 && !self.contains(item.product_id));
        self.items.push(item);
    }

    /// Replace the amount of an existing item. Returns whether an item matched.
    pub(crate) fn set_amount(&mut self, product_id: ProductId, amount: u32) -> bool {
        debug_assert!(amount > 0);
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Remove the item for a product.
    pub(crate) fn remove(&mut self, product_id: ProductId) -> Option<CartItem> {
        let index = self.items.iter().position(|i| i.product_id == product_id)?;
        Some(self.items.remove(index))
    }
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = InvalidCart;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        Cart::from_items(items)
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, price_cents: i64, amount: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(id),
            title: format!("Product {}", id),
            unit_price: Money::new(price_cents),
            image: format!("{}.png", id),
            amount,
        }
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total().unwrap(), Money::zero());
    }

    #[test]
    fn test_counts_and_total() {
        let cart = Cart::from_items(vec![item(1, 1000, 2), item(2, 2000, 1)]).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total().unwrap().amount_cents, 4000); // 2*1000 + 1*2000
        assert_eq!(cart.get(ProductId::new(1)).unwrap().subtotal().unwrap(), Money::new(2000));

        let amounts = cart.amounts_by_product();
        assert_eq!(amounts[&ProductId::new(1)], 2);
        assert_eq!(amounts[&ProductId::new(2)], 1);
    }

    #[test]
    fn test_total_overflow() {
        let cart = Cart::from_items(vec![item(1, i64::MAX, 2)]).unwrap();
        assert!(matches!(cart.total(), Err(CartError::Overflow)));
    }

    #[test]
    fn test_invariants_enforced() {
        assert_eq!(
            Cart::from_items(vec![item(1, 100, 0)]),
            Err(InvalidCart::ZeroAmount(ProductId::new(1)))
        );
        assert_eq!(
            Cart::from_items(vec![item(1, 100, 1), item(1, 100, 2)]),
            Err(InvalidCart::DuplicateProduct(ProductId::new(1)))
        );
    }

    #[test]
    fn test_mutations_keep_order() {
        let mut cart = Cart::new();
        cart.push(item(3, 100, 1));
        cart.push(item(1, 100, 1));
        cart.push(item(2, 100, 1));

        assert!(cart.set_amount(ProductId::new(1), 4));
        assert!(!cart.set_amount(ProductId::new(9), 4));
        assert_eq!(cart.remove(ProductId::new(3)).unwrap().product_id, ProductId::new(3));
        assert!(cart.remove(ProductId::new(3)).is_none());

        let ids: Vec<u64> = cart.iter().map(|i| i.product_id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 4);
    }

    #[test]
    fn test_snapshot_format() {
        let cart = Cart::from_items(vec![item(42, 10000, 1)]).unwrap();
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"id": 42, "title": "Product 42", "price": 100, "image": "42.png", "amount": 1}
            ])
        );
    }

    #[test]
    fn test_snapshot_rejects_invalid_items() {
        let json = r#"[{"id": 1, "title": "A", "price": 1.5, "image": "a.png", "amount": 0}]"#;
        let err = serde_json::from_str::<Cart>(json).unwrap_err();
        assert!(err.to_string().contains("amount 0"));
    }
}
