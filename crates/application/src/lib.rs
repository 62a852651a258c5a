//! Application layer for the order management system.
//!
//! Implements the CQRS split around the Order aggregate:
//! - command objects ([`CreateOrder`], [`UpdateOrder`], [`DeleteOrder`])
//! - query objects ([`GetOrderById`], [`GetOrders`])
//! - boundary validation applied before the aggregate is touched
//! - [`OrderHandlers`] translating commands/queries into aggregate
//!   mutations and repository calls
//!
//! Input and output shapes are kept distinct: [`CreateItemRequest`] is
//! what callers send in, [`OrderItemView`]/[`OrderView`] is what they get
//! back.

mod commands;
mod dto;
mod error;
mod handlers;
mod queries;
pub mod validation;

pub use commands::{CreateOrder, DeleteOrder, UpdateOrder};
pub use dto::{CreateItemRequest, OrderItemView, OrderView};
pub use error::AppError;
pub use handlers::OrderHandlers;
pub use queries::{GetOrderById, GetOrders};
pub use validation::{ValidationError, ValidationErrors};
