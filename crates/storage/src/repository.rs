//! Repository contract for order aggregates.

use async_trait::async_trait;
use common::OrderId;
use domain::Order;

use crate::{OrderFilter, Result};

/// Persistence contract for the Order aggregate.
///
/// Implementations must persist an order together with its items and
/// commit each write atomically. Callers receive the aggregate fully
/// loaded; there is no lazy item loading.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Loads an order with its items, or `None` if it does not exist.
    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>>;

    /// Returns all orders matching the filter.
    ///
    /// See [`OrderFilter`] for the matching semantics. An empty filter
    /// returns every order.
    async fn get_all(&self, filter: &OrderFilter) -> Result<Vec<Order>>;

    /// Persists a new order in full, including its items.
    async fn add(&self, order: &Order) -> Result<()>;

    /// Persists the full current state of an existing order, replacing
    /// prior item membership.
    async fn update(&self, order: &Order) -> Result<()>;

    /// Removes the order and all owned items. No-op if absent.
    async fn delete(&self, id: OrderId) -> Result<()>;
}
