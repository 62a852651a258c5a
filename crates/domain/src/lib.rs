//! Domain layer for the order management system.
//!
//! This crate provides the core domain model:
//! - Order aggregate root with its status state machine
//! - OrderItem entity owned by the aggregate
//! - Money fixed-point value object for monetary amounts

pub mod order;

pub use order::{Money, Order, OrderError, OrderItem, OrderStatus};
