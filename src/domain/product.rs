use serde::{Deserialize, Serialize};

/// Catalog identifier of a product.
pub type ProductId = u64;

/// A product as served by the catalog, or as a line in the cart.
///
/// `amount` only carries meaning on a cart line. Catalog payloads usually
/// omit it, in which case it deserializes as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    #[serde(default)]
    pub amount: i64,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: f64, image_url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image_url: image_url.into(),
            amount: 0,
        }
    }

    /// Returns a copy of this product carrying the given cart quantity.
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }
}

/// Available quantity of a product, fetched fresh for every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: i64,
}

impl Stock {
    pub fn new(id: ProductId, amount: i64) -> Self {
        Self { id, amount }
    }
}

/// Payload for `update_product_amount`: the new absolute quantity of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serializes_with_camel_case_keys() {
        let product = Product::new(3, "Sneaker", 139.9, "https://img/3.jpg").with_amount(2);
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["imageUrl"], "https://img/3.jpg");
        assert_eq!(json["amount"], 2);
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_catalog_payload_without_amount_defaults_to_zero() {
        let json = r#"{"id":7,"name":"Boot","price":99.5,"imageUrl":"x.png"}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, 7);
        assert_eq!(product.amount, 0);
    }
}
