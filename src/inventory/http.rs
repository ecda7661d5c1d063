use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};
use crate::domain::{Product, ProductId, Stock};
use crate::error::InventoryError;
use super::Inventory;

/// Inventory backed by a REST API exposing `/products/{id}` and `/stock/{id}`.
#[derive(Debug, Clone)]
pub struct HttpInventory {
    base_url: String,
    client: reqwest::Client,
}

impl HttpInventory {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch<T: DeserializeOwned>(&self, id: ProductId, path: &str) -> Result<T, InventoryError> {
        let url = format!("{}/{}/{}", self.base_url, path, id);
        debug!(%url, "Fetching");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| InventoryError::Transport(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(InventoryError::NotFound(id));
        }
        if !resp.status().is_success() {
            error!(status = resp.status().as_u16(), "Inventory request failed");
            return Err(InventoryError::Transport(format!("HTTP {}", resp.status())));
        }

        resp.json::<T>()
            .await
            .map_err(|e| InventoryError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl Inventory for HttpInventory {
    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<Product, InventoryError> {
        self.fetch(id, "products").await
    }

    #[instrument(skip(self))]
    async fn stock(&self, id: ProductId) -> Result<Stock, InventoryError> {
        self.fetch(id, "stock").await
    }
}
