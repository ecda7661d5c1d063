use tracing::{error, info, warn, Instrument};
use cart_store::{setup_tracing, Cart, CartConfig, CartSystem, Product, UpdateProductAmount};

/// Demo driver: seeds the in-process inventory, runs a short shopping session
/// and prints the resulting cart.
#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = CartConfig::from_env().map_err(|e| e.to_string())?;
    info!(storage_key = %config.storage_key, "Starting cart demo");

    let system = CartSystem::start(config).map_err(|e| e.to_string())?;

    if let Some(inventory) = &system.inventory_client {
        let catalog = [
            (Product::new(1, "Trail Runner", 179.9, "https://cdn.example.com/1.jpg"), 3),
            (Product::new(2, "City Walker", 139.9, "https://cdn.example.com/2.jpg"), 5),
            (Product::new(3, "Court Classic", 219.9, "https://cdn.example.com/3.jpg"), 2),
        ];
        for (product, stock) in catalog {
            inventory.put_product(product, stock).await.map_err(|e| e.to_string())?;
        }
    }

    let mut notifications = system.notifications();
    let toast_task = tokio::spawn(async move {
        while let Ok(notification) = notifications.recv().await {
            warn!(operation = %notification.operation, "{}", notification.message);
        }
    });

    let cart = &system.cart_client;
    let span = tracing::info_span!("shopping_session");
    async {
        let _ = cart.add_product(1).await;
        let _ = cart.add_product(1).await;
        let _ = cart.add_product(2).await;
        let _ = cart.update_product_amount(UpdateProductAmount::new(2, 9)).await;
        let _ = cart.update_product_amount(UpdateProductAmount::new(2, 4)).await;
        let _ = cart.remove_product(3).await;
    }
    .instrument(span)
    .await;

    match cart.get_cart().await {
        Ok(lines) => {
            for line in &lines {
                info!(id = line.id, name = %line.name, amount = line.amount, price = line.price, "Cart line");
            }
            let cart = Cart::from_products(lines);
            info!(items = cart.item_count(), subtotal = cart.subtotal(), "Cart total");
        }
        Err(e) => error!(error = %e, "Could not read cart"),
    }

    system.shutdown().await?;
    toast_task.abort();

    info!("Cart demo completed");
    Ok(())
}
