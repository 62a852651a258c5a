//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::{ItemId, OrderId};
use serde::{Deserialize, Serialize};

use super::{MAX_CUSTOMER_NAME_LEN, Money, OrderError, OrderItem, OrderStatus};

/// Order aggregate root.
///
/// Exclusively owns its line items and enforces all invariants on
/// mutation: items can only change while the order is `Pending`, and the
/// status state machine is terminal at `Completed`/`Cancelled`. The total
/// value is derived from the live item set and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_name: String,
    order_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    last_modified_at: Option<DateTime<Utc>>,
    items: Vec<OrderItem>,
    status: OrderStatus,
}

impl Order {
    /// Creates a new pending order with an empty item set.
    pub fn new(customer_name: impl Into<String>) -> Result<Self, OrderError> {
        let customer_name = customer_name.into();
        validate_customer_name(&customer_name)?;

        let now = Utc::now();
        Ok(Self {
            id: OrderId::new(),
            customer_name,
            order_date: now,
            created_at: now,
            last_modified_at: None,
            items: Vec::new(),
            status: OrderStatus::Pending,
        })
    }

    /// Reconstructs an order from persisted state.
    ///
    /// Intended for repository implementations; does not re-run
    /// construction validation.
    #[allow(clippy::too_many_arguments)]
    pub fn hydrate(
        id: OrderId,
        customer_name: String,
        order_date: DateTime<Utc>,
        created_at: DateTime<Utc>,
        last_modified_at: Option<DateTime<Utc>>,
        items: Vec<OrderItem>,
        status: OrderStatus,
    ) -> Self {
        Self {
            id,
            customer_name,
            order_date,
            created_at,
            last_modified_at,
            items,
            status,
        }
    }
}

// Query methods
impl Order {
    /// Returns the order ID.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the customer name.
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Returns the order date.
    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp, if any.
    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        self.last_modified_at
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns an item by ID.
    pub fn find_item(&self, item_id: ItemId) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.id() == item_id)
    }

    /// Returns the total value of the order.
    ///
    /// Recomputed on every access as the sum of quantity * unit price over
    /// the current items.
    pub fn total_value(&self) -> Money {
        self.items.iter().map(OrderItem::total_price).sum()
    }

    /// Returns true if the order is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

// Mutation methods
impl Order {
    /// Adds an item to the order and returns its newly assigned ID.
    ///
    /// Fails if the order is not pending, or if the item fields are
    /// invalid.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Result<ItemId, OrderError> {
        if !self.status.can_modify_items() {
            return Err(OrderError::NotPending {
                status: self.status,
            });
        }

        let mut item = OrderItem::new(name, quantity, unit_price)?;
        item.assign_order(self.id);
        let item_id = item.id();
        self.items.push(item);
        self.touch();
        Ok(item_id)
    }

    /// Removes an item by ID.
    ///
    /// Removing an item that does not exist is a no-op, not an error. The
    /// status check still applies either way.
    pub fn remove_item(&mut self, item_id: ItemId) -> Result<(), OrderError> {
        if !self.status.can_modify_items() {
            return Err(OrderError::NotPending {
                status: self.status,
            });
        }

        if let Some(pos) = self.items.iter().position(|i| i.id() == item_id) {
            self.items.remove(pos);
            self.touch();
        }
        Ok(())
    }

    /// Updates the customer name. Allowed in any status.
    pub fn update_customer_name(&mut self, customer_name: impl Into<String>) -> Result<(), OrderError> {
        let customer_name = customer_name.into();
        validate_customer_name(&customer_name)?;
        self.customer_name = customer_name;
        self.touch();
        Ok(())
    }

    /// Transitions the order to a new status.
    ///
    /// A transition to the current status is a no-op success. Terminal
    /// orders reject every other transition.
    pub fn update_status(&mut self, new_status: OrderStatus) -> Result<(), OrderError> {
        if self.status == new_status {
            return Ok(());
        }

        if self.status.is_terminal() {
            return Err(OrderError::TerminalStatus {
                status: self.status,
            });
        }

        self.status = new_status;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.last_modified_at = Some(Utc::now());
    }
}

fn validate_customer_name(name: &str) -> Result<(), OrderError> {
    if name.trim().is_empty() {
        return Err(OrderError::EmptyCustomerName);
    }
    if name.chars().count() > MAX_CUSTOMER_NAME_LEN {
        return Err(OrderError::CustomerNameTooLong {
            len: name.chars().count(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with_item() -> (Order, ItemId) {
        let mut order = Order::new("John Doe").unwrap();
        let item_id = order
            .add_item("Test Item", 2, Money::from_cents(1000))
            .unwrap();
        (order, item_id)
    }

    #[test]
    fn test_new_order() {
        let order = Order::new("John Doe").unwrap();
        assert_eq!(order.customer_name(), "John Doe");
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.item_count(), 0);
        assert_eq!(order.total_value(), Money::zero());
        assert!(order.last_modified_at().is_none());
        assert_eq!(order.order_date(), order.created_at());
    }

    #[test]
    fn test_new_order_blank_name_fails() {
        assert!(matches!(
            Order::new(""),
            Err(OrderError::EmptyCustomerName)
        ));
        assert!(matches!(
            Order::new("   "),
            Err(OrderError::EmptyCustomerName)
        ));
    }

    #[test]
    fn test_new_order_name_too_long_fails() {
        let name = "x".repeat(MAX_CUSTOMER_NAME_LEN + 1);
        assert!(matches!(
            Order::new(name),
            Err(OrderError::CustomerNameTooLong { .. })
        ));
    }

    #[test]
    fn test_add_item() {
        let (order, item_id) = order_with_item();
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.total_value().cents(), 2000);

        let item = order.find_item(item_id).unwrap();
        assert_eq!(item.name(), "Test Item");
        assert_eq!(item.order_id(), Some(order.id()));
        assert!(order.last_modified_at().is_some());
    }

    #[test]
    fn test_add_item_invalid_fields_fail() {
        let mut order = Order::new("John Doe").unwrap();

        assert!(matches!(
            order.add_item("", 1, Money::from_cents(100)),
            Err(OrderError::EmptyItemName)
        ));
        assert!(matches!(
            order.add_item("Widget", 0, Money::from_cents(100)),
            Err(OrderError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            order.add_item("Widget", 1, Money::zero()),
            Err(OrderError::InvalidPrice { .. })
        ));
        assert_eq!(order.item_count(), 0);
    }

    #[test]
    fn test_add_item_non_pending_fails() {
        let mut order = Order::new("John Doe").unwrap();
        order.update_status(OrderStatus::Completed).unwrap();

        let result = order.add_item("Widget", 1, Money::from_cents(100));
        assert!(matches!(
            result,
            Err(OrderError::NotPending {
                status: OrderStatus::Completed
            })
        ));
    }

    #[test]
    fn test_remove_item() {
        let (mut order, item_id) = order_with_item();

        order.remove_item(item_id).unwrap();
        assert_eq!(order.item_count(), 0);
        assert_eq!(order.total_value(), Money::zero());
    }

    #[test]
    fn test_remove_missing_item_is_noop() {
        let mut order = Order::new("John Doe").unwrap();
        order.remove_item(ItemId::new()).unwrap();
        assert!(order.last_modified_at().is_none());
    }

    #[test]
    fn test_remove_item_non_pending_fails() {
        let (mut order, item_id) = order_with_item();
        order.update_status(OrderStatus::Processing).unwrap();

        let result = order.remove_item(item_id);
        assert!(matches!(result, Err(OrderError::NotPending { .. })));
        assert_eq!(order.item_count(), 1);
    }

    #[test]
    fn test_total_value_tracks_item_set() {
        let mut order = Order::new("John Doe").unwrap();
        let first = order.add_item("Widget", 2, Money::from_cents(1000)).unwrap();
        order.add_item("Gadget", 3, Money::from_cents(550)).unwrap();
        assert_eq!(order.total_value().cents(), 3650);

        order.remove_item(first).unwrap();
        assert_eq!(order.total_value().cents(), 1650);
    }

    #[test]
    fn test_update_customer_name() {
        let mut order = Order::new("John Doe").unwrap();
        order.update_customer_name("Jane Doe").unwrap();
        assert_eq!(order.customer_name(), "Jane Doe");
        assert!(order.last_modified_at().is_some());
    }

    #[test]
    fn test_update_customer_name_blank_fails() {
        let mut order = Order::new("John Doe").unwrap();
        let result = order.update_customer_name(" ");
        assert!(matches!(result, Err(OrderError::EmptyCustomerName)));
        assert_eq!(order.customer_name(), "John Doe");
    }

    #[test]
    fn test_update_customer_name_allowed_on_terminal_order() {
        let mut order = Order::new("John Doe").unwrap();
        order.update_status(OrderStatus::Cancelled).unwrap();
        order.update_customer_name("Jane Doe").unwrap();
        assert_eq!(order.customer_name(), "Jane Doe");
    }

    #[test]
    fn test_update_status_transitions() {
        let mut order = Order::new("John Doe").unwrap();
        order.update_status(OrderStatus::Processing).unwrap();
        assert_eq!(order.status(), OrderStatus::Processing);

        order.update_status(OrderStatus::Completed).unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);
        assert!(order.is_terminal());
    }

    #[test]
    fn test_update_status_same_status_is_noop() {
        let mut order = Order::new("John Doe").unwrap();
        order.update_status(OrderStatus::Pending).unwrap();
        assert!(order.last_modified_at().is_none());

        // Also a no-op from a terminal status
        order.update_status(OrderStatus::Completed).unwrap();
        order.update_status(OrderStatus::Completed).unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);
    }

    #[test]
    fn test_update_status_from_terminal_fails() {
        let mut order = Order::new("John Doe").unwrap();
        order.update_status(OrderStatus::Completed).unwrap();

        let result = order.update_status(OrderStatus::Processing);
        assert!(matches!(
            result,
            Err(OrderError::TerminalStatus {
                status: OrderStatus::Completed
            })
        ));

        let mut order = Order::new("John Doe").unwrap();
        order.update_status(OrderStatus::Cancelled).unwrap();
        let result = order.update_status(OrderStatus::Completed);
        assert!(matches!(result, Err(OrderError::TerminalStatus { .. })));
    }

    #[test]
    fn test_items_preserve_insertion_order() {
        let mut order = Order::new("John Doe").unwrap();
        order.add_item("First", 1, Money::from_cents(100)).unwrap();
        order.add_item("Second", 1, Money::from_cents(200)).unwrap();
        order.add_item("Third", 1, Money::from_cents(300)).unwrap();

        let names: Vec<_> = order.items().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_hydrate_roundtrip() {
        let (order, _) = order_with_item();
        let rebuilt = Order::hydrate(
            order.id(),
            order.customer_name().to_string(),
            order.order_date(),
            order.created_at(),
            order.last_modified_at(),
            order.items().to_vec(),
            order.status(),
        );
        assert_eq!(rebuilt.id(), order.id());
        assert_eq!(rebuilt.total_value(), order.total_value());
        assert_eq!(rebuilt.item_count(), 1);
    }

    #[test]
    fn test_serialization() {
        let (order, _) = order_with_item();
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id(), order.id());
        assert_eq!(deserialized.item_count(), 1);
        assert_eq!(deserialized.total_value().cents(), 2000);
    }
}
