use tokio::sync::mpsc;
use tracing::{debug, instrument};
use crate::domain::{Product, ProductId, UpdateProductAmount};
use crate::error::CartError;
use crate::messages::CartRequest;

/// Handle to a [`CartService`](super::CartService), handed to UI collaborators.
///
/// Mutating methods return the cart lines after the request. On failure the
/// user has already been notified; the error is returned for callers that
/// want to branch on it.
#[derive(Debug, Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|e| CartError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(CartClient => fn add_product(product_id: ProductId) -> Vec<Product> as CartRequest::AddProduct, Error = CartError);
client_method!(CartClient => fn remove_product(product_id: ProductId) -> Vec<Product> as CartRequest::RemoveProduct, Error = CartError);
client_method!(CartClient => fn update_product_amount(update: UpdateProductAmount) -> Vec<Product> as CartRequest::UpdateProductAmount, Error = CartError);
client_method!(CartClient => fn get_cart() -> Vec<Product> as CartRequest::GetCart, Error = CartError);
