use tokio::sync::oneshot;
use crate::domain::{Product, ProductId, Stock, UpdateProductAmount};
use crate::error::{CartError, InventoryError};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests handled by [`InventoryService`](crate::inventory::InventoryService).
#[derive(Debug)]
pub enum InventoryRequest {
    GetProduct {
        id: ProductId,
        respond_to: ServiceResponse<Product, InventoryError>,
    },
    CheckStock {
        id: ProductId,
        respond_to: ServiceResponse<Stock, InventoryError>,
    },
    PutProduct {
        product: Product,
        stock: i64,
        respond_to: ServiceResponse<(), InventoryError>,
    },
    SetStock {
        id: ProductId,
        amount: i64,
        respond_to: ServiceResponse<(), InventoryError>,
    },
    Shutdown,
}

/// Requests handled by [`CartService`](crate::cart_actor::CartService).
///
/// Mutating requests reply with the cart lines as they stand after the
/// request was processed.
#[derive(Debug)]
pub enum CartRequest {
    AddProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<Vec<Product>, CartError>,
    },
    RemoveProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<Vec<Product>, CartError>,
    },
    UpdateProductAmount {
        update: UpdateProductAmount,
        respond_to: ServiceResponse<Vec<Product>, CartError>,
    },
    GetCart {
        respond_to: ServiceResponse<Vec<Product>, CartError>,
    },
    Shutdown,
}
