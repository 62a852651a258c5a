//! Order commands.

use common::OrderId;

use crate::dto::CreateItemRequest;

/// Command to create a new order with its initial items.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    /// The customer placing the order.
    pub customer_name: String,

    /// Items to add, in input order.
    pub items: Vec<CreateItemRequest>,
}

impl CreateOrder {
    /// Creates a new CreateOrder command.
    pub fn new(customer_name: impl Into<String>, items: Vec<CreateItemRequest>) -> Self {
        Self {
            customer_name: customer_name.into(),
            items,
        }
    }
}

/// Command to update an existing order.
///
/// Carries the full target state; the handler reconciles it through the
/// aggregate's incremental operations.
#[derive(Debug, Clone)]
pub struct UpdateOrder {
    /// The order to update.
    pub id: OrderId,

    /// The new customer name.
    pub customer_name: String,

    /// The target item set.
    pub items: Vec<CreateItemRequest>,
}

impl UpdateOrder {
    /// Creates a new UpdateOrder command.
    pub fn new(
        id: OrderId,
        customer_name: impl Into<String>,
        items: Vec<CreateItemRequest>,
    ) -> Self {
        Self {
            id,
            customer_name: customer_name.into(),
            items,
        }
    }
}

/// Command to delete an order.
#[derive(Debug, Clone)]
pub struct DeleteOrder {
    /// The order to delete.
    pub id: OrderId,
}

impl DeleteOrder {
    /// Creates a new DeleteOrder command.
    pub fn new(id: OrderId) -> Self {
        Self { id }
    }
}
