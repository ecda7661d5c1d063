//! # Mock Framework
//!
//! Utilities for testing the cart against a scripted inventory.
//!
//! Use [`create_mock_inventory`] to get an [`InventoryClient`] and the receiver
//! its requests land on. Then use [`expect_get_product`] or
//! [`expect_check_stock`] to assert each lookup and decide its reply, which
//! makes inventory failures and stock levels deterministic per test.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use crate::cart_actor::{CartClient, CartService};
use crate::config::CartConfig;
use crate::domain::{Product, ProductId, Stock};
use crate::error::InventoryError;
use crate::inventory::InventoryClient;
use crate::messages::InventoryRequest;
use crate::notification::{Notification, Notifier};
use crate::storage::MemoryStorage;

pub type Responder<T> = oneshot::Sender<Result<T, InventoryError>>;

/// Creates an inventory client whose requests are delivered to the returned receiver.
pub fn create_mock_inventory(buffer_size: usize) -> (InventoryClient, mpsc::Receiver<InventoryRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (InventoryClient::new(sender), receiver)
}

/// Helper to verify that the next message is a GetProduct request
pub async fn expect_get_product(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(ProductId, Responder<Product>)> {
    match receiver.recv().await {
        Some(InventoryRequest::GetProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a CheckStock request
pub async fn expect_check_stock(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(ProductId, Responder<Stock>)> {
    match receiver.recv().await {
        Some(InventoryRequest::CheckStock { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// A cart service running against a mock inventory and shared memory storage.
pub struct MockCart {
    pub client: CartClient,
    pub inventory_rx: mpsc::Receiver<InventoryRequest>,
    pub storage: MemoryStorage,
    pub notifications: tokio::sync::broadcast::Receiver<Notification>,
    pub config: CartConfig,
}

/// Spawns a cart service. `storage` may already hold a cart.
pub fn spawn_mock_cart(config: CartConfig, storage: MemoryStorage) -> MockCart {
    let (inventory, inventory_rx) = create_mock_inventory(10);
    let notifier = Notifier::new(16);
    let notifications = notifier.subscribe();
    let (service, client) = CartService::new(&config, Arc::new(inventory), Arc::new(storage.clone()), notifier);
    tokio::spawn(service.run());

    MockCart {
        client,
        inventory_rx,
        storage,
        notifications,
        config,
    }
}

pub fn shoe(id: ProductId) -> Product {
    Product::new(id, format!("Shoe {}", id), 100.0 + id as f64, format!("https://img.example.com/{}.jpg", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Inventory;

    #[tokio::test]
    async fn test_mock_inventory() {
        let (client, mut receiver) = create_mock_inventory(10);

        let lookup = tokio::spawn(async move { client.stock(4).await });

        let (id, responder) = expect_check_stock(&mut receiver).await.expect("Expected CheckStock request");
        assert_eq!(id, 4);
        responder.send(Ok(Stock::new(4, 9))).unwrap();

        let result = lookup.await.unwrap();
        assert_eq!(result, Ok(Stock::new(4, 9)));
    }
}
