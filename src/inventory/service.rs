use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};
use crate::domain::{Product, ProductId, Stock};
use crate::error::InventoryError;
use crate::messages::{InventoryRequest, ServiceResponse};
use super::Inventory;

/// In-process catalog and stock levels, run as an actor.
///
/// Stands in for a remote inventory in demos and tests, and is the default
/// backend when no inventory URL is configured.
pub struct InventoryService {
    receiver: mpsc::Receiver<InventoryRequest>,
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, i64>,
}

impl InventoryService {
    pub fn new(buffer_size: usize) -> (Self, InventoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            products: HashMap::new(),
            stock: HashMap::new(),
        };
        let client = InventoryClient::new(sender);
        (service, client)
    }

    #[instrument(name = "inventory_service", skip(self))]
    pub async fn run(mut self) {
        info!("InventoryService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                InventoryRequest::GetProduct { id, respond_to } => {
                    self.handle_get_product(id, respond_to);
                }
                InventoryRequest::CheckStock { id, respond_to } => {
                    self.handle_check_stock(id, respond_to);
                }
                InventoryRequest::PutProduct { product, stock, respond_to } => {
                    self.handle_put_product(product, stock, respond_to);
                }
                InventoryRequest::SetStock { id, amount, respond_to } => {
                    self.handle_set_stock(id, amount, respond_to);
                }
                InventoryRequest::Shutdown => {
                    info!("InventoryService shutting down");
                    break;
                }
            }
        }

        info!("InventoryService stopped");
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_get_product(&self, id: ProductId, respond_to: ServiceResponse<Product, InventoryError>) {
        debug!("Processing get_product request");

        let result = match self.products.get(&id) {
            Some(product) => {
                info!(product_name = %product.name, price = %product.price, "Product found");
                Ok(product.clone())
            }
            None => {
                debug!("Product not found");
                Err(InventoryError::NotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_check_stock(&self, id: ProductId, respond_to: ServiceResponse<Stock, InventoryError>) {
        debug!("Processing check_stock request");

        let result = match self.stock.get(&id) {
            Some(&amount) => {
                info!(stock_level = amount, "Stock checked");
                Ok(Stock::new(id, amount))
            }
            None => {
                debug!("No stock entry");
                Err(InventoryError::NotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %product.id, stock = %stock), skip(self, product, respond_to))]
    fn handle_put_product(&mut self, product: Product, stock: i64, respond_to: ServiceResponse<(), InventoryError>) {
        debug!("Processing put_product request");

        if stock < 0 {
            error!("Negative stock level");
            send_error!(respond_to, InventoryError::Malformed(format!("negative stock: {}", stock)));
        }

        let id = product.id;
        self.products.insert(id, product.with_amount(0));
        self.stock.insert(id, stock);
        info!("Product registered");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(product_id = %id, amount = %amount), skip(self, respond_to))]
    fn handle_set_stock(&mut self, id: ProductId, amount: i64, respond_to: ServiceResponse<(), InventoryError>) {
        debug!("Processing set_stock request");

        if amount < 0 {
            error!("Negative stock level");
            send_error!(respond_to, InventoryError::Malformed(format!("negative stock: {}", amount)));
        }

        let result = match self.stock.get_mut(&id) {
            Some(level) => {
                *level = amount;
                info!("Stock level updated");
                Ok(())
            }
            None => {
                error!("Product not found");
                Err(InventoryError::NotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }
}

/// Handle to an [`InventoryService`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    sender: mpsc::Sender<InventoryRequest>,
}

impl InventoryClient {
    pub fn new(sender: mpsc::Sender<InventoryRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), InventoryError> {
        debug!("Sending shutdown request");
        self.sender
            .send(InventoryRequest::Shutdown)
            .await
            .map_err(|e| InventoryError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(InventoryClient => fn get_product(id: ProductId) -> Product as InventoryRequest::GetProduct, Error = InventoryError);
client_method!(InventoryClient => fn check_stock(id: ProductId) -> Stock as InventoryRequest::CheckStock, Error = InventoryError);
client_method!(InventoryClient => fn put_product(product: Product, stock: i64) -> () as InventoryRequest::PutProduct, Error = InventoryError);
client_method!(InventoryClient => fn set_stock(id: ProductId, amount: i64) -> () as InventoryRequest::SetStock, Error = InventoryError);

#[async_trait]
impl Inventory for InventoryClient {
    async fn product(&self, id: ProductId) -> Result<Product, InventoryError> {
        self.get_product(id).await
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, InventoryError> {
        self.check_stock(id).await
    }
}
