//! Inventory API client implementation.
//!
//! Uses `reqwest` for HTTP and caches product records using `moka`
//! (5-minute TTL). Stock is never cached.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use shopcart_core::ProductId;
use tracing::{debug, instrument};

use crate::config::InventoryConfig;
use crate::types::{Product, StockRecord};

use super::{InventoryError, InventorySource};

/// Client for the inventory API.
///
/// Serves product records and stock levels from a JSON REST API.
/// Products are cached for 5 minutes; stock is fetched fresh on every
/// call.
#[derive(Clone)]
pub struct InventoryClient {
    inner: Arc<InventoryClientInner>,
}

struct InventoryClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<ProductId, Product>,
}

impl InventoryClient {
    /// Create a new inventory API client.
    #[must_use]
    pub fn new(config: &InventoryConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(InventoryClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        product_id: ProductId,
    ) -> Result<T, InventoryError> {
        let url = format!("{}/{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(InventoryError::NotFound(product_id));
        }

        // Get the response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(200).collect::<String>(),
                "inventory API returned non-success status"
            );
            return Err(InventoryError::Status(status));
        }

        match serde_json::from_str(&response_text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(200).collect::<String>(),
                    "failed to parse inventory API response"
                );
                Err(InventoryError::Parse(e))
            }
        }
    }
}

#[async_trait]
impl InventorySource for InventoryClient {
    // Stock is mutable state; never cached.
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn fetch_stock(&self, product_id: ProductId) -> Result<StockRecord, InventoryError> {
        self.get_json(&format!("stock/{product_id}"), product_id)
            .await
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn fetch_product(&self, product_id: ProductId) -> Result<Product, InventoryError> {
        // Check cache
        if let Some(product) = self.inner.cache.get(&product_id).await {
            debug!("cache hit for product");
            return Ok(product);
        }

        let product: Product = self
            .get_json(&format!("products/{product_id}"), product_id)
            .await?;

        // Cache the result
        self.inner.cache.insert(product_id, product.clone()).await;

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_strips_trailing_slash() {
        let client = InventoryClient::new(&InventoryConfig {
            base_url: "http://localhost:3333/".to_string(),
        });
        assert_eq!(client.inner.base_url, "http://localhost:3333");
    }
}
