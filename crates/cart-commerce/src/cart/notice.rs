//! Presentation-facing commands and notices.

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::ids::ProductId;

/// Payload of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    /// Requested total. Zero or less is ignored.
    pub amount: i64,
}

/// A mutation requested by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum CartCommand {
    Add { product_id: ProductId },
    Remove { product_id: ProductId },
    UpdateAmount(UpdateProductAmount),
}

impl CartCommand {
    /// Which operation this command performs.
    pub fn operation(&self) -> CartOperation {
        match self {
            CartCommand::Add { .. } => CartOperation::Add,
            CartCommand::Remove { .. } => CartOperation::Remove,
            CartCommand::UpdateAmount(_) => CartOperation::UpdateAmount,
        }
    }
}

/// The three cart mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    /// Generic failure message for this operation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            CartOperation::Add => "Could not add the product",
            CartOperation::Remove => "Could not remove the product",
            CartOperation::UpdateAmount => "Could not change the product quantity",
        }
    }
}

/// Category of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// The requested quantity is not in stock.
    OutOfStock,
    /// Any other failure of the operation.
    Failure,
}

/// A user-visible notification for a failed cart operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub operation: CartOperation,
    pub message: String,
}

/// Message shown for stock shortfalls, whatever the operation.
pub const OUT_OF_STOCK_MESSAGE: &str = "Requested quantity is out of stock";

impl Notice {
    /// Build the notice for a failed operation.
    ///
    /// Stock shortfalls get the out-of-stock message; every other failure,
    /// remote or local, gets the operation's generic message.
    pub fn for_error(operation: CartOperation, error: &CartError) -> Self {
        if error.is_out_of_stock() {
            Self {
                kind: NoticeKind::OutOfStock,
                operation,
                message: OUT_OF_STOCK_MESSAGE.to_string(),
            }
        } else {
            Self {
                kind: NoticeKind::Failure,
                operation,
                message: operation.failure_message().to_string(),
            }
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{ServiceError, ServiceTag};

    #[test]
    fn test_stock_notice() {
        let err = CartError::InsufficientStock {
            product_id: ProductId::new(1),
            requested: 2,
            available: 1,
        };
        let notice = Notice::for_error(CartOperation::Add, &err);
        assert_eq!(notice.kind, NoticeKind::OutOfStock);
        assert_eq!(notice.message, OUT_OF_STOCK_MESSAGE);
    }

    #[test]
    fn test_remote_failure_uses_operation_message() {
        let err = CartError::RemoteService {
            service: ServiceTag::Catalog,
            source: ServiceError::NotFound(ProductId::new(3)),
        };
        let notice = Notice::for_error(CartOperation::UpdateAmount, &err);
        assert_eq!(notice.kind, NoticeKind::Failure);
        assert_eq!(notice.message, "Could not change the product quantity");
    }

    #[test]
    fn test_command_wire_format() {
        let cmd: CartCommand = serde_json::from_str(
            r#"{"type": "update_amount", "productId": 7, "amount": 2}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            CartCommand::UpdateAmount(UpdateProductAmount {
                product_id: ProductId::new(7),
                amount: 2,
            })
        );
        assert_eq!(cmd.operation(), CartOperation::UpdateAmount);

        let cmd: CartCommand = serde_json::from_str(r#"{"type": "remove", "productId": 9}"#).unwrap();
        assert_eq!(cmd.operation(), CartOperation::Remove);
    }
}
