//! Order queries.

use chrono::{DateTime, Utc};
use common::OrderId;
use storage::OrderFilter;

/// Query for a single order by ID.
#[derive(Debug, Clone)]
pub struct GetOrderById {
    /// The order to load.
    pub id: OrderId,
}

impl GetOrderById {
    /// Creates a new GetOrderById query.
    pub fn new(id: OrderId) -> Self {
        Self { id }
    }
}

/// Query for orders matching optional criteria.
///
/// All criteria are optional; an empty query returns every order.
#[derive(Debug, Clone, Default)]
pub struct GetOrders {
    /// Substring filter on customer name.
    pub customer_name: Option<String>,

    /// Inclusive lower bound on the order date.
    pub start_date: Option<DateTime<Utc>>,

    /// Inclusive upper bound on the order date.
    pub end_date: Option<DateTime<Utc>>,
}

impl GetOrders {
    /// Creates an unfiltered query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts the query into the repository filter.
    pub fn into_filter(self) -> OrderFilter {
        OrderFilter {
            customer_name: self.customer_name,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
