use common::OrderId;
use thiserror::Error;

/// Errors that can occur when interacting with order storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage backend could not complete the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A persisted record could not be mapped back to the domain model.
    #[error("Corrupt record for order {order_id}: {detail}")]
    Corrupt { order_id: OrderId, detail: String },
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
