use thiserror::Error;
use crate::domain::ProductId;

/// Errors produced by cart operations.
///
/// Every variant is turned into a user-facing [`Notification`](crate::notification::Notification)
/// by the cart service, except `InvalidInput`, which is swallowed silently.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    StockExceeded { requested: i64, available: i64 },
    #[error("Inventory service failure: {0}")]
    ServiceFailure(String),
    #[error("Invalid amount: {0}")]
    InvalidInput(i64),
    #[error("Cart storage error: {0}")]
    Storage(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Errors returned by an [`Inventory`](crate::inventory::Inventory) lookup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),
    #[error("Inventory transport error: {0}")]
    Transport(String),
    #[error("Malformed inventory response: {0}")]
    Malformed(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Errors raised by durable cart storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cart serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
    #[error("Unsupported configuration: {0}")]
    Unsupported(String),
}

impl From<InventoryError> for CartError {
    fn from(e: InventoryError) -> Self {
        CartError::ServiceFailure(e.to_string())
    }
}

impl From<StorageError> for CartError {
    fn from(e: StorageError) -> Self {
        CartError::Storage(e.to_string())
    }
}
