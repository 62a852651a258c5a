//! Filtering criteria for order scans.

use chrono::{DateTime, Utc};
use domain::Order;

/// Criteria for [`OrderRepository::get_all`](crate::OrderRepository::get_all).
///
/// - `customer_name`: case-sensitive substring match when present.
/// - `start_date` / `end_date`: inclusive bounds on the order date; either,
///   both, or neither may be supplied. No combination is invalid.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub customer_name: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl OrderFilter {
    /// Creates an empty filter that matches every order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to orders whose customer name contains the given substring.
    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    /// Restricts to orders placed at or after the given date.
    pub fn with_start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Restricts to orders placed at or before the given date.
    pub fn with_end_date(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Returns true if no criteria are set.
    pub fn is_empty(&self) -> bool {
        self.customer_name.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    /// Evaluates the filter against a single order.
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(ref name) = self.customer_name
            && !order.customer_name().contains(name.as_str())
        {
            return false;
        }
        if let Some(start) = self.start_date
            && order.order_date() < start
        {
            return false;
        }
        if let Some(end) = self.end_date
            && order.order_date() > end
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use domain::Order;

    #[test]
    fn test_empty_filter_matches_everything() {
        let order = Order::new("John Doe").unwrap();
        assert!(OrderFilter::new().is_empty());
        assert!(OrderFilter::new().matches(&order));
    }

    #[test]
    fn test_customer_name_substring_match() {
        let order = Order::new("John Doe").unwrap();

        assert!(OrderFilter::new().with_customer_name("Doe").matches(&order));
        assert!(OrderFilter::new().with_customer_name("John").matches(&order));
        assert!(
            !OrderFilter::new()
                .with_customer_name("Smith")
                .matches(&order)
        );
        // Case-sensitive
        assert!(
            !OrderFilter::new()
                .with_customer_name("doe")
                .matches(&order)
        );
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let order = Order::new("John Doe").unwrap();
        let date = order.order_date();

        assert!(OrderFilter::new().with_start_date(date).matches(&order));
        assert!(OrderFilter::new().with_end_date(date).matches(&order));
        assert!(
            !OrderFilter::new()
                .with_start_date(date + Duration::seconds(1))
                .matches(&order)
        );
        assert!(
            !OrderFilter::new()
                .with_end_date(date - Duration::seconds(1))
                .matches(&order)
        );
    }

    #[test]
    fn test_combined_criteria() {
        let order = Order::new("John Doe").unwrap();
        let date = order.order_date();

        let filter = OrderFilter::new()
            .with_customer_name("Doe")
            .with_start_date(date - Duration::days(1))
            .with_end_date(date + Duration::days(1));
        assert!(filter.matches(&order));

        let filter = filter.with_customer_name("Smith");
        assert!(!filter.matches(&order));
    }
}
