//! # Cart Store
//!
//! A client-side shopping cart that respects remote stock limits and persists
//! itself across sessions.
//!
//! ## Layout
//!
//! - **Domain** - [`Product`], [`Stock`] and the ordered [`Cart`] with its pure transitions
//! - **Cart actor** - [`CartService`] owns the cart and serializes every mutation;
//!   [`CartClient`] is the cloneable handle UI code talks to
//! - **Collaborators** - the [`Inventory`] trait (in-process [`InventoryService`], or
//!   `HttpInventory` behind the `http` feature) and the [`CartStorage`] trait
//!   ([`MemoryStorage`], [`FileStorage`])
//! - **Notifications** - failed operations publish a [`Notification`] for the UI to show
//! - **System** - [`CartSystem`] wires everything from a [`CartConfig`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use cart_store::{CartConfig, CartSystem, Product, UpdateProductAmount};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let system = CartSystem::start(CartConfig::default())?;
//! let inventory = system.inventory_client.clone().expect("in-process inventory");
//! inventory.put_product(Product::new(1, "Runner", 179.9, "runner.png"), 3).await?;
//!
//! let mut toasts = system.notifications();
//! system.cart_client.add_product(1).await?;
//! let _ = system.cart_client.update_product_amount(UpdateProductAmount::new(1, 5)).await;
//! assert_eq!(toasts.recv().await?.message, "requested quantity exceeds stock");
//!
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod app_system;
pub mod cart_actor;
pub mod config;
pub mod domain;
pub mod error;
pub mod inventory;
pub mod messages;
pub mod notification;
pub mod storage;

#[cfg(test)]
mod mock_framework;

pub use app_system::{setup_tracing, CartSystem};
pub use cart_actor::{CartClient, CartService};
pub use config::CartConfig;
pub use domain::{Cart, Product, ProductId, Stock, UpdateProductAmount};
pub use error::{CartError, ConfigError, InventoryError, StorageError};
pub use inventory::{Inventory, InventoryClient, InventoryService};
#[cfg(feature = "http")]
pub use inventory::HttpInventory;
pub use notification::{CartOperation, Notification, Notifier};
pub use storage::{CartStorage, FileStorage, MemoryStorage};
