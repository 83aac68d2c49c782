//! Inventory and product catalog access.
//!
//! # Architecture
//!
//! - [`InventorySource`] is the seam the cart store consumes: stock and
//!   product lookups, both fallible. The store treats every failure
//!   uniformly as "unavailable" and never retries.
//! - [`InventoryClient`] is the production implementation over a JSON
//!   REST API, with product records cached in-memory.

mod client;

pub use client::InventoryClient;

use async_trait::async_trait;
use shopcart_core::ProductId;
use thiserror::Error;

use crate::types::{Product, StockRecord};

/// Read access to the remote product catalog and its stock levels.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Fetch the available quantity for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the lookup fails.
    async fn fetch_stock(&self, product_id: ProductId) -> Result<StockRecord, InventoryError>;

    /// Fetch the full product record.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the lookup fails.
    async fn fetch_product(&self, product_id: ProductId) -> Result<Product, InventoryError>;
}

/// Errors that can occur when querying the inventory API.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("not found: product {0}")]
    NotFound(ProductId),

    /// API returned a non-success status.
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
}
