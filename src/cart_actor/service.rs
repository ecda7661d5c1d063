use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};
use crate::config::CartConfig;
use crate::domain::{Cart, Product, ProductId, Stock, UpdateProductAmount};
use crate::error::CartError;
use crate::inventory::Inventory;
use crate::messages::{CartRequest, ServiceResponse};
use crate::notification::{CartOperation, Notification, Notifier};
use crate::storage::{load_cart, save_cart, CartStorage};
use super::CartClient;

/// Owns the cart and processes requests one at a time.
///
/// Each mutating request runs read-validate-mutate-persist to completion,
/// including any inventory round-trip, before the next request is taken off
/// the mailbox. Two overlapping `add_product` calls for the same product
/// therefore never read the same stale amount.
///
/// Changes are applied to a candidate copy, written to storage, and only then
/// swapped in, so memory and storage agree after every request, failed or not.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
    inventory: Arc<dyn Inventory>,
    storage: Arc<dyn CartStorage>,
    storage_key: String,
    notifier: Notifier,
    check_stock_on_first_add: bool,
}

impl CartService {
    /// Creates the service, loading the cart stored under the configured key.
    pub fn new(
        config: &CartConfig,
        inventory: Arc<dyn Inventory>,
        storage: Arc<dyn CartStorage>,
        notifier: Notifier,
    ) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(config.buffer_size);
        let cart = load_cart(storage.as_ref(), &config.storage_key);
        let service = Self {
            receiver,
            cart,
            inventory,
            storage,
            storage_key: config.storage_key.clone(),
            notifier,
            check_stock_on_first_add: config.check_stock_on_first_add,
        };
        let client = CartClient::new(sender);
        (service, client)
    }

    #[instrument(name = "cart_service", skip(self), fields(key = %self.storage_key))]
    pub async fn run(mut self) {
        info!(lines = self.cart.len(), "CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddProduct { product_id, respond_to } => {
                    let result = self.handle_add_product(product_id).await;
                    self.reply(CartOperation::AddProduct, result, respond_to);
                }
                CartRequest::RemoveProduct { product_id, respond_to } => {
                    let result = self.handle_remove_product(product_id);
                    self.reply(CartOperation::RemoveProduct, result, respond_to);
                }
                CartRequest::UpdateProductAmount { update, respond_to } => {
                    let result = self.handle_update_product_amount(update).await;
                    self.reply(CartOperation::UpdateProductAmount, result, respond_to);
                }
                CartRequest::GetCart { respond_to } => {
                    let _ = respond_to.send(Ok(self.cart.lines().to_vec()));
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!("CartService stopped");
    }

    #[instrument(fields(product_id = %product_id), skip(self))]
    async fn handle_add_product(&mut self, product_id: ProductId) -> Result<Cart, CartError> {
        debug!("Processing add_product request");
        let mut candidate = self.cart.clone();

        match self.cart.get(product_id).map(|line| line.amount) {
            None => {
                if self.check_stock_on_first_add {
                    let stock = self.fetch_stock(product_id).await?;
                    if stock.amount < 1 {
                        return Err(CartError::StockExceeded { requested: 1, available: stock.amount });
                    }
                }

                let product = self.inventory.product(product_id).await?;
                ensure_same_id("product", product_id, product.id)?;
                candidate.push_line(product);
            }
            Some(current) => {
                let stock = self.fetch_stock(product_id).await?;
                let requested = match current.checked_add(1) {
                    Some(requested) if requested <= stock.amount => requested,
                    _ => {
                        return Err(CartError::StockExceeded {
                            requested: current.saturating_add(1),
                            available: stock.amount,
                        })
                    }
                };
                candidate.set_amount(product_id, requested)?;
            }
        }

        self.commit(candidate)
    }

    #[instrument(fields(product_id = %product_id), skip(self))]
    fn handle_remove_product(&mut self, product_id: ProductId) -> Result<Cart, CartError> {
        debug!("Processing remove_product request");
        let mut candidate = self.cart.clone();
        candidate.remove(product_id)?;
        self.commit(candidate)
    }

    #[instrument(fields(product_id = %update.product_id, amount = %update.amount), skip(self))]
    async fn handle_update_product_amount(&mut self, update: UpdateProductAmount) -> Result<Cart, CartError> {
        debug!("Processing update_product_amount request");

        if update.amount < 1 {
            debug!("Ignoring non-positive amount");
            return Ok(self.cart.clone());
        }
        if !self.cart.contains(update.product_id) {
            return Err(CartError::NotInCart(update.product_id));
        }

        let stock = self.fetch_stock(update.product_id).await?;
        if update.amount > stock.amount {
            return Err(CartError::StockExceeded { requested: update.amount, available: stock.amount });
        }

        let mut candidate = self.cart.clone();
        candidate.set_amount(update.product_id, update.amount)?;
        self.commit(candidate)
    }

    async fn fetch_stock(&self, product_id: ProductId) -> Result<Stock, CartError> {
        let stock = self.inventory.stock(product_id).await?;
        ensure_same_id("stock", product_id, stock.id)?;
        Ok(stock)
    }

    /// Persists `candidate` and makes it the current cart.
    fn commit(&mut self, candidate: Cart) -> Result<Cart, CartError> {
        save_cart(self.storage.as_ref(), &self.storage_key, &candidate)?;
        self.cart = candidate;
        info!(lines = self.cart.len(), items = self.cart.item_count(), "Cart updated");
        Ok(self.cart.clone())
    }

    fn reply(
        &self,
        operation: CartOperation,
        result: Result<Cart, CartError>,
        respond_to: ServiceResponse<Vec<Product>, CartError>,
    ) {
        let result = result.map(Cart::into_products).map_err(|e| {
            match &e {
                CartError::NotInCart(_) | CartError::StockExceeded { .. } | CartError::InvalidInput(_) => {
                    warn!(%operation, error = %e, "Cart request rejected")
                }
                _ => error!(%operation, error = %e, "Cart request failed"),
            }
            if let Some(notification) = Notification::for_error(operation, &e) {
                self.notifier.publish(notification);
            }
            e
        });

        let _ = respond_to.send(result);
    }
}

/// Inventory replies must describe the product that was asked for.
fn ensure_same_id(lookup: &str, requested: ProductId, returned: ProductId) -> Result<(), CartError> {
    if requested == returned {
        return Ok(());
    }
    Err(CartError::ServiceFailure(format!(
        "inventory returned {} for {} when asked for {}",
        lookup, returned, requested
    )))
}
