//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Transitions:
/// ```text
/// Pending ──┬──► Processing ──┬──► Completed
///           │                 └──► Cancelled
///           ├──► Completed
///           └──► Cancelled
/// ```
///
/// `Completed` and `Cancelled` are terminal. A transition from any status
/// to itself is always a no-op success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order is being assembled, items can be added/removed.
    #[default]
    Pending,

    /// Order is being fulfilled.
    Processing,

    /// Order has been completed (terminal).
    Completed,

    /// Order was cancelled (terminal).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if items can be added or removed in this status.
    pub fn can_modify_items(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Returns true if this is a terminal status (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Parses a status from its string name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(OrderStatus::Pending),
            "Processing" => Some(OrderStatus::Processing),
            "Completed" => Some(OrderStatus::Completed),
            "Cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
