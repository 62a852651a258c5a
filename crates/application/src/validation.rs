//! Boundary validation for incoming commands.
//!
//! Rejects malformed input with structured, field-level errors before the
//! aggregate is constructed. The aggregate re-validates on its own; this
//! layer exists for fast rejection and complete error reporting (every
//! failing field is listed, not just the first).

use domain::order::{MAX_CUSTOMER_NAME_LEN, MAX_ITEM_NAME_LEN};

use crate::commands::{CreateOrder, UpdateOrder};
use crate::dto::CreateItemRequest;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All validation failures for a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

/// Validates a CreateOrder command.
///
/// A new order must carry at least one item.
pub fn validate_create_order(cmd: &CreateOrder) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    validate_customer_name(&cmd.customer_name, &mut errors);

    if cmd.items.is_empty() {
        errors.push(ValidationError::new(
            "items",
            "Order must contain at least one item",
        ));
    }
    validate_items(&cmd.items, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Validates an UpdateOrder command.
///
/// Unlike creation, an update may carry an empty item list (the order is
/// emptied).
pub fn validate_update_order(cmd: &UpdateOrder) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    validate_customer_name(&cmd.customer_name, &mut errors);
    validate_items(&cmd.items, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

fn validate_customer_name(name: &str, errors: &mut Vec<ValidationError>) {
    if name.trim().is_empty() {
        errors.push(ValidationError::new(
            "customer_name",
            "Customer name is required",
        ));
    } else if name.chars().count() > MAX_CUSTOMER_NAME_LEN {
        errors.push(ValidationError::new(
            "customer_name",
            format!("Customer name cannot exceed {MAX_CUSTOMER_NAME_LEN} characters"),
        ));
    }
}

fn validate_items(items: &[CreateItemRequest], errors: &mut Vec<ValidationError>) {
    for (idx, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("items[{idx}].name"),
                "Item name is required",
            ));
        } else if item.name.chars().count() > MAX_ITEM_NAME_LEN {
            errors.push(ValidationError::new(
                format!("items[{idx}].name"),
                format!("Item name cannot exceed {MAX_ITEM_NAME_LEN} characters"),
            ));
        }
        if item.quantity == 0 {
            errors.push(ValidationError::new(
                format!("items[{idx}].quantity"),
                "Quantity must be greater than zero",
            ));
        }
        if item.unit_price_cents <= 0 {
            errors.push(ValidationError::new(
                format!("items[{idx}].unit_price_cents"),
                "Unit price must be greater than zero",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: u32, unit_price_cents: i64) -> CreateItemRequest {
        CreateItemRequest {
            name: name.to_string(),
            quantity,
            unit_price_cents,
        }
    }

    #[test]
    fn test_valid_create_order_passes() {
        let cmd = CreateOrder::new("Ann", vec![item("Widget", 2, 1000)]);
        assert!(validate_create_order(&cmd).is_ok());
    }

    #[test]
    fn test_blank_customer_name_rejected() {
        let cmd = CreateOrder::new("  ", vec![item("Widget", 1, 100)]);
        let errors = validate_create_order(&cmd).unwrap_err();
        assert_eq!(errors.0.len(), 1);
        assert_eq!(errors.0[0].field, "customer_name");
    }

    #[test]
    fn test_customer_name_too_long_rejected() {
        let cmd = CreateOrder::new("x".repeat(101), vec![item("Widget", 1, 100)]);
        let errors = validate_create_order(&cmd).unwrap_err();
        assert_eq!(errors.0[0].field, "customer_name");
    }

    #[test]
    fn test_create_requires_at_least_one_item() {
        let cmd = CreateOrder::new("Ann", vec![]);
        let errors = validate_create_order(&cmd).unwrap_err();
        assert_eq!(errors.0[0].field, "items");
    }

    #[test]
    fn test_all_failing_fields_are_reported() {
        let cmd = CreateOrder::new(" ", vec![item("", 0, 0)]);
        let errors = validate_create_order(&cmd).unwrap_err();
        let fields: Vec<_> = errors.0.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "customer_name",
                "items[0].name",
                "items[0].quantity",
                "items[0].unit_price_cents"
            ]
        );
    }

    #[test]
    fn test_item_name_too_long_rejected() {
        let cmd = CreateOrder::new("Ann", vec![item(&"x".repeat(201), 1, 100)]);
        let errors = validate_create_order(&cmd).unwrap_err();
        assert_eq!(errors.0[0].field, "items[0].name");
    }

    #[test]
    fn test_update_allows_empty_item_list() {
        let cmd = UpdateOrder::new(common::OrderId::new(), "Ann", vec![]);
        assert!(validate_update_order(&cmd).is_ok());
    }

    #[test]
    fn test_update_still_validates_item_fields() {
        let cmd = UpdateOrder::new(common::OrderId::new(), "Ann", vec![item("Widget", 0, 100)]);
        let errors = validate_update_order(&cmd).unwrap_err();
        assert_eq!(errors.0[0].field, "items[0].quantity");
    }
}
