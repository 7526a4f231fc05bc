//! Shopping cart module.
//!
//! Contains the cart and its line items, the manager that owns and persists
//! a cart, and the presentation-facing commands and notices.

mod cart;
mod manager;
mod notice;
mod shared;

pub use cart::{Cart, CartItem, InvalidCart};
pub use manager::CartManager;
pub use notice::{CartCommand, CartOperation, Notice, NoticeKind, UpdateProductAmount};
pub use shared::SharedCartManager;
