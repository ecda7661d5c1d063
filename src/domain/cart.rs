//! The cart itself: an ordered list of product lines.
//!
//! All transitions here are pure and synchronous. Stock checks and
//! persistence belong to [`CartService`](crate::cart_actor::CartService),
//! which applies these transitions to a candidate copy before committing.

use serde::{Deserialize, Serialize};
use crate::domain::{Product, ProductId};
use crate::error::CartError;

/// Ordered cart lines, at most one per product id, each with `amount >= 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from stored lines, dropping entries that would break the
    /// cart invariants (non-positive amounts, repeated ids). The first line
    /// for a given id wins.
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut lines: Vec<Product> = Vec::with_capacity(products.len());
        for product in products {
            if product.amount < 1 || lines.iter().any(|p| p.id == product.id) {
                continue;
            }
            lines.push(product);
        }
        Self { lines }
    }

    pub fn lines(&self) -> &[Product] {
        &self.lines
    }

    pub fn into_products(self) -> Vec<Product> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.lines.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Appends a new line with amount 1. Returns false, leaving the cart
    /// untouched, if the product already has a line.
    pub fn push_line(&mut self, product: Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.lines.push(product.with_amount(1));
        true
    }

    /// Sets the absolute amount of an existing line.
    pub fn set_amount(&mut self, id: ProductId, amount: i64) -> Result<(), CartError> {
        if amount < 1 {
            return Err(CartError::InvalidInput(amount));
        }
        let line = self
            .lines
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CartError::NotInCart(id))?;
        line.amount = amount;
        Ok(())
    }

    /// Removes a line, keeping the order of the others.
    pub fn remove(&mut self, id: ProductId) -> Result<Product, CartError> {
        let index = self
            .lines
            .iter()
            .position(|p| p.id == id)
            .ok_or(CartError::NotInCart(id))?;
        Ok(self.lines.remove(index))
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|p| p.amount).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(|p| p.price * p.amount as f64).sum()
    }
}
