//! Order line item entity.

use chrono::{DateTime, Utc};
use common::{ItemId, OrderId};
use serde::{Deserialize, Serialize};

use super::{MAX_ITEM_NAME_LEN, Money, OrderError};

/// A line item owned by exactly one order.
///
/// The `order_id` back-reference is metadata only; membership is
/// controlled by the owning [`Order`](super::Order), which sets it when
/// the item is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    id: ItemId,
    name: String,
    quantity: u32,
    unit_price: Money,
    order_id: Option<OrderId>,
    created_at: DateTime<Utc>,
    last_modified_at: Option<DateTime<Utc>>,
}

impl OrderItem {
    /// Creates a new order item with a freshly assigned ID and no owner.
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Result<Self, OrderError> {
        let name = name.into();
        validate_item_name(&name)?;
        validate_quantity(quantity)?;
        validate_unit_price(unit_price)?;

        Ok(Self {
            id: ItemId::new(),
            name,
            quantity,
            unit_price,
            order_id: None,
            created_at: Utc::now(),
            last_modified_at: None,
        })
    }

    /// Reconstructs an item from persisted state.
    ///
    /// Intended for repository implementations; does not re-run
    /// construction validation.
    #[allow(clippy::too_many_arguments)]
    pub fn hydrate(
        id: ItemId,
        name: String,
        quantity: u32,
        unit_price: Money,
        order_id: Option<OrderId>,
        created_at: DateTime<Utc>,
        last_modified_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            quantity,
            unit_price,
            order_id,
            created_at,
            last_modified_at,
        }
    }

    /// Returns the item ID.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the unit price.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Returns the owning order ID, if assigned.
    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp, if any.
    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        self.last_modified_at
    }

    /// Returns the total price for this item (quantity * unit_price).
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }

    /// Updates the quantity.
    pub fn update_quantity(&mut self, quantity: u32) -> Result<(), OrderError> {
        validate_quantity(quantity)?;
        self.quantity = quantity;
        self.touch();
        Ok(())
    }

    /// Updates the unit price.
    pub fn update_unit_price(&mut self, unit_price: Money) -> Result<(), OrderError> {
        validate_unit_price(unit_price)?;
        self.unit_price = unit_price;
        self.touch();
        Ok(())
    }

    /// Sets the back-reference to the owning order.
    pub fn assign_order(&mut self, order_id: OrderId) {
        self.order_id = Some(order_id);
        self.touch();
    }

    fn touch(&mut self) {
        self.last_modified_at = Some(Utc::now());
    }
}

fn validate_item_name(name: &str) -> Result<(), OrderError> {
    if name.trim().is_empty() {
        return Err(OrderError::EmptyItemName);
    }
    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(OrderError::ItemNameTooLong {
            len: name.chars().count(),
        });
    }
    Ok(())
}

fn validate_quantity(quantity: u32) -> Result<(), OrderError> {
    if quantity == 0 {
        return Err(OrderError::InvalidQuantity {
            quantity: i64::from(quantity),
        });
    }
    Ok(())
}

fn validate_unit_price(unit_price: Money) -> Result<(), OrderError> {
    if !unit_price.is_positive() {
        return Err(OrderError::InvalidPrice {
            price: unit_price.cents(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item() {
        let item = OrderItem::new("Widget", 2, Money::from_cents(1000)).unwrap();
        assert_eq!(item.name(), "Widget");
        assert_eq!(item.quantity(), 2);
        assert_eq!(item.unit_price().cents(), 1000);
        assert!(item.order_id().is_none());
        assert!(item.last_modified_at().is_none());
    }

    #[test]
    fn test_new_item_blank_name_fails() {
        let result = OrderItem::new("   ", 1, Money::from_cents(100));
        assert!(matches!(result, Err(OrderError::EmptyItemName)));
    }

    #[test]
    fn test_new_item_name_too_long_fails() {
        let name = "x".repeat(MAX_ITEM_NAME_LEN + 1);
        let result = OrderItem::new(name, 1, Money::from_cents(100));
        assert!(matches!(result, Err(OrderError::ItemNameTooLong { .. })));
    }

    #[test]
    fn test_new_item_zero_quantity_fails() {
        let result = OrderItem::new("Widget", 0, Money::from_cents(100));
        assert!(matches!(
            result,
            Err(OrderError::InvalidQuantity { quantity: 0 })
        ));
    }

    #[test]
    fn test_new_item_non_positive_price_fails() {
        let result = OrderItem::new("Widget", 1, Money::zero());
        assert!(matches!(result, Err(OrderError::InvalidPrice { price: 0 })));

        let result = OrderItem::new("Widget", 1, Money::from_cents(-100));
        assert!(matches!(result, Err(OrderError::InvalidPrice { .. })));
    }

    #[test]
    fn test_total_price_is_exact() {
        let item = OrderItem::new("Widget", 3, Money::from_cents(1099)).unwrap();
        assert_eq!(item.total_price().cents(), 3297);
    }

    #[test]
    fn test_update_quantity() {
        let mut item = OrderItem::new("Widget", 2, Money::from_cents(1000)).unwrap();
        item.update_quantity(5).unwrap();
        assert_eq!(item.quantity(), 5);
        assert!(item.last_modified_at().is_some());
    }

    #[test]
    fn test_update_quantity_zero_fails() {
        let mut item = OrderItem::new("Widget", 2, Money::from_cents(1000)).unwrap();
        let result = item.update_quantity(0);
        assert!(matches!(result, Err(OrderError::InvalidQuantity { .. })));
        assert_eq!(item.quantity(), 2);
    }

    #[test]
    fn test_update_unit_price() {
        let mut item = OrderItem::new("Widget", 2, Money::from_cents(1000)).unwrap();
        item.update_unit_price(Money::from_cents(1500)).unwrap();
        assert_eq!(item.unit_price().cents(), 1500);
        assert!(item.last_modified_at().is_some());
    }

    #[test]
    fn test_update_unit_price_non_positive_fails() {
        let mut item = OrderItem::new("Widget", 2, Money::from_cents(1000)).unwrap();
        let result = item.update_unit_price(Money::zero());
        assert!(matches!(result, Err(OrderError::InvalidPrice { .. })));
        assert_eq!(item.unit_price().cents(), 1000);
    }

    #[test]
    fn test_assign_order() {
        let mut item = OrderItem::new("Widget", 1, Money::from_cents(100)).unwrap();
        let order_id = OrderId::new();
        item.assign_order(order_id);
        assert_eq!(item.order_id(), Some(order_id));
        assert!(item.last_modified_at().is_some());
    }

    #[test]
    fn test_serialization() {
        let item = OrderItem::new("Widget", 2, Money::from_cents(999)).unwrap();
        let json = serde_json::to_string(&item).unwrap();
        let deserialized: OrderItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, deserialized);
    }
}
