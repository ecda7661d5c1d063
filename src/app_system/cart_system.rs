use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, instrument};
use crate::cart_actor::{CartClient, CartService};
use crate::config::CartConfig;
use crate::error::ConfigError;
use crate::inventory::{Inventory, InventoryClient, InventoryService};
use crate::notification::{Notification, Notifier};
use crate::storage::{CartStorage, FileStorage, MemoryStorage};

const NOTIFICATION_CAPACITY: usize = 64;

/// Starts the cart and its collaborators and owns their tasks.
///
/// **Startup order:**
/// 1. Inventory (in-process actor, or the HTTP client when a URL is configured)
/// 2. Storage backend
/// 3. `CartService`, which loads the stored cart before taking requests
pub struct CartSystem {
    pub cart_client: CartClient,
    /// Present when the in-process inventory is running, for seeding the catalog.
    pub inventory_client: Option<InventoryClient>,
    notifier: Notifier,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CartSystem {
    /// Builds the backends described by `config` and starts the system.
    #[instrument(name = "cart_system", skip(config))]
    pub fn start(config: CartConfig) -> Result<Self, ConfigError> {
        let mut handles = Vec::new();
        info!("Starting cart system");

        let (inventory, inventory_client): (Arc<dyn Inventory>, Option<InventoryClient>) =
            match &config.inventory_url {
                Some(url) => (remote_inventory(url)?, None),
                None => {
                    let (service, client) = InventoryService::new(config.buffer_size);
                    handles.push(tokio::spawn(service.run()));
                    let inventory: Arc<dyn Inventory> = Arc::new(client.clone());
                    (inventory, Some(client))
                }
            };

        let storage: Arc<dyn CartStorage> = match &config.storage_dir {
            Some(dir) => {
                let storage = FileStorage::open(dir).map_err(|e| ConfigError::Invalid {
                    key: "CART_STORAGE_DIR".to_string(),
                    value: format!("{} ({})", dir.display(), e),
                })?;
                info!(dir = %storage.dir().display(), "Using file storage");
                Arc::new(storage)
            }
            None => Arc::new(MemoryStorage::new()),
        };

        let mut system = Self::with_backends(&config, inventory, storage);
        system.inventory_client = inventory_client;
        system.handles.append(&mut handles);

        info!("Cart system started successfully");
        Ok(system)
    }

    /// Starts the cart against caller-supplied backends.
    pub fn with_backends(
        config: &CartConfig,
        inventory: Arc<dyn Inventory>,
        storage: Arc<dyn CartStorage>,
    ) -> Self {
        let notifier = Notifier::new(NOTIFICATION_CAPACITY);
        let (cart_service, cart_client) = CartService::new(config, inventory, storage, notifier.clone());
        let handles = vec![tokio::spawn(cart_service.run())];

        Self {
            cart_client,
            inventory_client: None,
            notifier,
            handles,
        }
    }

    /// Subscribes to user-facing notifications raised by failed operations.
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    /// Shuts the cart down first, then the inventory, and waits for all tasks.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart system");

        let _ = self.cart_client.shutdown().await;
        if let Some(inventory) = &self.inventory_client {
            let _ = inventory.shutdown().await;
        }

        let mut failed = false;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                failed = true;
            }
        }

        if failed {
            return Err("one or more services failed during shutdown".to_string());
        }
        info!("Cart system shutdown complete");
        Ok(())
    }
}

#[cfg(feature = "http")]
fn remote_inventory(url: &str) -> Result<Arc<dyn Inventory>, ConfigError> {
    Ok(Arc::new(crate::inventory::HttpInventory::new(url)))
}

#[cfg(not(feature = "http"))]
fn remote_inventory(url: &str) -> Result<Arc<dyn Inventory>, ConfigError> {
    Err(ConfigError::Unsupported(format!(
        "inventory URL {} requires the `http` feature",
        url
    )))
}
