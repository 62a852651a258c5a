use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use domain::Order;
use tokio::sync::RwLock;

use crate::{OrderFilter, OrderRepository, Result};

/// In-memory order repository for tests and local development.
///
/// Stores full aggregates behind an `RwLock` and provides the same
/// interface as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Clears all orders.
    pub async fn clear(&self) {
        self.orders.write().await.clear();
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn get_all(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        // Stable output order regardless of map iteration
        matching.sort_by(|a, b| {
            a.order_date()
                .cmp(&b.order_date())
                .then(a.id().as_uuid().cmp(&b.id().as_uuid()))
        });
        Ok(matching)
    }

    async fn add(&self, order: &Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn delete(&self, id: OrderId) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use domain::Money;

    fn order_for(customer: &str) -> Order {
        let mut order = Order::new(customer).unwrap();
        order.add_item("Widget", 2, Money::from_cents(1000)).unwrap();
        order
    }

    #[tokio::test]
    async fn add_and_get_by_id() {
        let repo = InMemoryOrderRepository::new();
        let order = order_for("John Doe");

        repo.add(&order).await.unwrap();

        let loaded = repo.get_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(loaded.customer_name(), "John Doe");
        assert_eq!(loaded.item_count(), 1);
        assert_eq!(loaded.total_value().cents(), 2000);
    }

    #[tokio::test]
    async fn get_by_id_missing_returns_none() {
        let repo = InMemoryOrderRepository::new();
        let result = repo.get_by_id(OrderId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn get_all_without_filter_returns_everything() {
        let repo = InMemoryOrderRepository::new();
        repo.add(&order_for("John Doe")).await.unwrap();
        repo.add(&order_for("Jane Smith")).await.unwrap();

        let all = repo.get_all(&OrderFilter::new()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn get_all_filters_by_customer_name_substring() {
        let repo = InMemoryOrderRepository::new();
        repo.add(&order_for("John Doe")).await.unwrap();
        repo.add(&order_for("Jane Doe")).await.unwrap();
        repo.add(&order_for("Bob Smith")).await.unwrap();

        let does = repo
            .get_all(&OrderFilter::new().with_customer_name("Doe"))
            .await
            .unwrap();
        assert_eq!(does.len(), 2);
        assert!(does.iter().all(|o| o.customer_name().contains("Doe")));
    }

    #[tokio::test]
    async fn get_all_filters_by_date_range() {
        let repo = InMemoryOrderRepository::new();
        let order = order_for("John Doe");
        let date = order.order_date();
        repo.add(&order).await.unwrap();

        let hit = repo
            .get_all(
                &OrderFilter::new()
                    .with_start_date(date - Duration::hours(1))
                    .with_end_date(date + Duration::hours(1)),
            )
            .await
            .unwrap();
        assert_eq!(hit.len(), 1);

        let miss = repo
            .get_all(&OrderFilter::new().with_start_date(date + Duration::hours(1)))
            .await
            .unwrap();
        assert!(miss.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_stored_state() {
        let repo = InMemoryOrderRepository::new();
        let mut order = order_for("John Doe");
        repo.add(&order).await.unwrap();

        order.update_customer_name("Jane Doe").unwrap();
        let item_id = order.items()[0].id();
        order.remove_item(item_id).unwrap();
        repo.update(&order).await.unwrap();

        let loaded = repo.get_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(loaded.customer_name(), "Jane Doe");
        assert_eq!(loaded.item_count(), 0);
    }

    #[tokio::test]
    async fn delete_is_noop_when_absent() {
        let repo = InMemoryOrderRepository::new();
        repo.delete(OrderId::new()).await.unwrap();

        let order = order_for("John Doe");
        repo.add(&order).await.unwrap();
        repo.delete(order.id()).await.unwrap();
        assert_eq!(repo.order_count().await, 0);
    }
}
