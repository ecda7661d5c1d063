//! Product and stock lookups consumed by the cart.

#[cfg(feature = "http")]
mod http;
mod service;

#[cfg(feature = "http")]
pub use http::HttpInventory;
pub use service::{InventoryClient, InventoryService};

use async_trait::async_trait;
use crate::domain::{Product, ProductId, Stock};
use crate::error::InventoryError;

/// The inventory the cart validates against.
///
/// Both lookups fail for unknown ids as well as for transport problems; the
/// cart does not distinguish between the two.
#[async_trait]
pub trait Inventory: Send + Sync + 'static {
    async fn product(&self, id: ProductId) -> Result<Product, InventoryError>;
    async fn stock(&self, id: ProductId) -> Result<Stock, InventoryError>;
}
