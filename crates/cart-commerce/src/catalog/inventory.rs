//! Stock levels.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Available stock for a product, as reported by the stock service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockInfo {
    /// Product identifier.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Quantity currently available.
    #[serde(rename = "amount")]
    pub available: u32,
}

impl StockInfo {
    /// Create a stock level.
    pub fn new(product_id: ProductId, available: u32) -> Self {
        Self {
            product_id,
            available,
        }
    }

    /// Check if a specific total quantity can be held in a cart.
    pub fn can_fulfill(&self, requested: i64) -> bool {
        i64::from(self.available) >= requested
    }

    /// Check if out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.available == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_fulfill() {
        let stock = StockInfo::new(ProductId::new(1), 3);
        assert!(stock.can_fulfill(1));
        assert!(stock.can_fulfill(3));
        assert!(!stock.can_fulfill(4));
        assert!(!stock.can_fulfill(i64::MAX));
        assert!(!stock.is_out_of_stock());
    }

    #[test]
    fn test_out_of_stock() {
        let stock = StockInfo::new(ProductId::new(1), 0);
        assert!(stock.is_out_of_stock());
        assert!(!stock.can_fulfill(1));
    }

    #[test]
    fn test_wire_format() {
        let stock: StockInfo = serde_json::from_str(r#"{"id": 4, "amount": 7}"#).unwrap();
        assert_eq!(stock, StockInfo::new(ProductId::new(4), 7));
    }
}
