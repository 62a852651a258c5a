//! Transfer objects at the application boundary.
//!
//! Input and output shapes are deliberately distinct: a
//! [`CreateItemRequest`] carries no identifier (the aggregate assigns
//! one), while the views expose persisted state only.

use chrono::{DateTime, Utc};
use common::{ItemId, OrderId};
use domain::{Order, OrderItem};
use serde::{Deserialize, Serialize};

/// An item as submitted by a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

/// Read-only projection of a line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemView {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            id: item.id(),
            name: item.name().to_string(),
            quantity: item.quantity(),
            unit_price_cents: item.unit_price().cents(),
        }
    }
}

/// Read-only projection of an order aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub id: OrderId,
    pub customer_name: String,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub items: Vec<OrderItemView>,
    pub total_cents: i64,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            customer_name: order.customer_name().to_string(),
            order_date: order.order_date(),
            status: order.status().to_string(),
            items: order.items().iter().map(OrderItemView::from).collect(),
            total_cents: order.total_value().cents(),
        }
    }
}
