//! Command and query handlers.

use common::OrderId;
use domain::{Money, Order};
use storage::OrderRepository;

use crate::commands::{CreateOrder, DeleteOrder, UpdateOrder};
use crate::dto::OrderView;
use crate::error::AppError;
use crate::queries::{GetOrderById, GetOrders};
use crate::validation;

/// Dispatches commands and queries against the order repository.
///
/// Each command performs at most one persistence round trip: the
/// aggregate is fully validated and mutated in memory before anything is
/// written, so a failed command never partially persists.
pub struct OrderHandlers<R: OrderRepository> {
    repository: R,
}

impl<R: OrderRepository> OrderHandlers<R> {
    /// Creates handlers backed by the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Creates a new order with its items and returns the assigned ID.
    ///
    /// Items are added in input order; the first invalid item aborts the
    /// whole command and nothing is persisted.
    #[tracing::instrument(skip(self, cmd), fields(customer_name = %cmd.customer_name))]
    pub async fn create_order(&self, cmd: CreateOrder) -> Result<OrderId, AppError> {
        validation::validate_create_order(&cmd)?;

        let mut order = Order::new(cmd.customer_name)?;
        for item in cmd.items {
            order.add_item(
                item.name,
                item.quantity,
                Money::from_cents(item.unit_price_cents),
            )?;
        }

        self.repository.add(&order).await?;
        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %order.id(), "order created");
        Ok(order.id())
    }

    /// Replaces an order's customer name and item set.
    ///
    /// Reconciliation runs through the aggregate's own operations: every
    /// existing item is removed and the requested items are re-added, so
    /// the state machine rules apply unchanged (item replacement requires
    /// a pending order). An update that carries no items and finds none
    /// amounts to a rename and is allowed in any status.
    #[tracing::instrument(skip(self, cmd), fields(order_id = %cmd.id))]
    pub async fn update_order(&self, cmd: UpdateOrder) -> Result<(), AppError> {
        validation::validate_update_order(&cmd)?;

        let mut order = self
            .repository
            .get_by_id(cmd.id)
            .await?
            .ok_or(AppError::NotFound(cmd.id))?;

        order.update_customer_name(cmd.customer_name)?;

        if !cmd.items.is_empty() || order.item_count() > 0 {
            let existing: Vec<_> = order.items().iter().map(|i| i.id()).collect();
            for item_id in existing {
                order.remove_item(item_id)?;
            }
            for item in cmd.items {
                order.add_item(
                    item.name,
                    item.quantity,
                    Money::from_cents(item.unit_price_cents),
                )?;
            }
        }

        self.repository.update(&order).await?;
        metrics::counter!("orders_updated_total").increment(1);
        Ok(())
    }

    /// Deletes an order. Deleting an absent order is a no-op.
    #[tracing::instrument(skip(self, cmd), fields(order_id = %cmd.id))]
    pub async fn delete_order(&self, cmd: DeleteOrder) -> Result<(), AppError> {
        self.repository.delete(cmd.id).await?;
        metrics::counter!("orders_deleted_total").increment(1);
        Ok(())
    }

    /// Loads a single order projection.
    #[tracing::instrument(skip(self, query), fields(order_id = %query.id))]
    pub async fn get_order_by_id(&self, query: GetOrderById) -> Result<OrderView, AppError> {
        let order = self
            .repository
            .get_by_id(query.id)
            .await?
            .ok_or(AppError::NotFound(query.id))?;
        Ok(OrderView::from(&order))
    }

    /// Loads all order projections matching the query.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_orders(&self, query: GetOrders) -> Result<Vec<OrderView>, AppError> {
        let orders = self.repository.get_all(&query.into_filter()).await?;
        Ok(orders.iter().map(OrderView::from).collect())
    }
}
