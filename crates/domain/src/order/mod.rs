//! Order aggregate and related types.

mod aggregate;
mod item;
mod status;
mod value_objects;

pub use aggregate::Order;
pub use item::OrderItem;
pub use status::OrderStatus;
pub use value_objects::Money;

use thiserror::Error;

/// Maximum length of a customer name.
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;

/// Maximum length of an item name.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Customer name is blank.
    #[error("Customer name cannot be empty")]
    EmptyCustomerName,

    /// Customer name exceeds the maximum length.
    #[error("Customer name cannot exceed {MAX_CUSTOMER_NAME_LEN} characters (got {len})")]
    CustomerNameTooLong { len: usize },

    /// Item name is blank.
    #[error("Item name cannot be empty")]
    EmptyItemName,

    /// Item name exceeds the maximum length.
    #[error("Item name cannot exceed {MAX_ITEM_NAME_LEN} characters (got {len})")]
    ItemNameTooLong { len: usize },

    /// Quantity must be greater than zero.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: i64 },

    /// Unit price must be greater than zero.
    #[error("Invalid unit price: {price} cents (must be greater than 0)")]
    InvalidPrice { price: i64 },

    /// Items can only be modified while the order is pending.
    #[error("Cannot modify items of a {status} order")]
    NotPending { status: OrderStatus },

    /// Completed and cancelled orders accept no further status changes.
    #[error("Cannot change status of a {status} order")]
    TerminalStatus { status: OrderStatus },
}

impl OrderError {
    /// Returns true if the error is a state-machine violation rather than
    /// a field validation failure.
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            OrderError::NotPending { .. } | OrderError::TerminalStatus { .. }
        )
    }
}
