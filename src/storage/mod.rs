//! Durable key-value storage for the cart.
//!
//! The cart is stored as one opaque JSON blob under a fixed key. Backends only
//! move strings around; (de)serialization lives in [`load_cart`] and
//! [`save_cart`].

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use tracing::{debug, warn};
use crate::domain::{Cart, Product};
use crate::error::StorageError;

/// Synchronous key-value store. Writes are full overwrites.
pub trait CartStorage: Send + Sync + 'static {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Reads the cart stored under `key`.
///
/// Never fails: an absent, unreadable, or malformed value yields an empty
/// cart so startup can proceed.
pub fn load_cart(storage: &dyn CartStorage, key: &str) -> Cart {
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No stored cart, starting empty");
            return Cart::new();
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored cart, starting empty");
            return Cart::new();
        }
    };

    match serde_json::from_str::<Vec<Product>>(&raw) {
        Ok(products) => {
            let stored = products.len();
            let cart = Cart::from_products(products);
            if cart.len() != stored {
                warn!(key, stored, kept = cart.len(), "Dropped invalid stored cart lines");
            }
            debug!(key, lines = cart.len(), "Loaded stored cart");
            cart
        }
        Err(e) => {
            warn!(key, error = %e, "Stored cart is malformed, starting empty");
            Cart::new()
        }
    }
}

pub fn save_cart(storage: &dyn CartStorage, key: &str, cart: &Cart) -> Result<(), StorageError> {
    let raw = serde_json::to_string(cart)?;
    storage.save(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "@test:cart";

    #[test]
    fn test_absent_value_loads_empty() {
        let storage = MemoryStorage::new();
        assert!(load_cart(&storage, KEY).is_empty());
    }

    #[test]
    fn test_malformed_value_loads_empty() {
        let storage = MemoryStorage::new();
        storage.save(KEY, "{not json").unwrap();
        assert!(load_cart(&storage, KEY).is_empty());

        storage.save(KEY, r#"{"id":1}"#).unwrap();
        assert!(load_cart(&storage, KEY).is_empty());
    }

    #[test]
    fn test_save_then_load_restores_lines() {
        let storage = MemoryStorage::new();
        let cart = Cart::from_products(vec![
            Product::new(2, "Runner", 120.0, "r.png").with_amount(3),
            Product::new(1, "Walker", 80.0, "w.png").with_amount(1),
        ]);

        save_cart(&storage, KEY, &cart).unwrap();
        assert_eq!(load_cart(&storage, KEY), cart);
    }
}
