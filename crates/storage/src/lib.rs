//! Persistence layer for order aggregates.
//!
//! Defines the [`OrderRepository`] contract consumed by the application
//! layer, together with two implementations:
//! - [`InMemoryOrderRepository`] for tests and local development
//! - [`PostgresOrderRepository`] backed by sqlx
//!
//! Writes are atomic per aggregate: an order and its items are persisted
//! in a single transaction, and `update` replaces item membership in full.

mod error;
mod filter;
mod memory;
mod postgres;
mod repository;

pub use error::{Result, StorageError};
pub use filter::OrderFilter;
pub use memory::InMemoryOrderRepository;
pub use postgres::PostgresOrderRepository;
pub use repository::OrderRepository;
