//! The cart store: canonical cart state and its mutation operations.
//!
//! # Architecture
//!
//! - State lives in a `tokio::sync::watch` channel; the channel value is
//!   the current [`CartSnapshot`] and [`CartStore::subscribe`] hands out
//!   receivers.
//! - Every mutation follows the same path: read the current snapshot,
//!   gate the change against stock, build a new snapshot, persist it,
//!   publish it.
//! - Failures are terminal at the operation boundary: the snapshot stays
//!   unchanged, the notifier receives one fixed message, and the call
//!   returns normally.
//!
//! Operations are designed for serial invocation. Two interleaved calls
//! for the same product can both read the same pre-update snapshot and
//! commit last-writer-wins; nothing in the store serializes callers.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{instrument, warn};

use shopcart_core::ProductId;

use crate::config::CartConfig;
use crate::error::CartError;
use crate::inventory::{InventoryClient, InventorySource};
use crate::notify::{Notifier, TracingNotifier, messages};
use crate::persistence::{FsSlot, PersistenceBridge};
use crate::types::{CartLine, CartSnapshot};

/// Requested quantity change for a product already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateAmount {
    /// Product whose line should change.
    pub product_id: ProductId,
    /// Requested quantity. Zero and negative values are ignored.
    pub amount: i64,
}

/// Client-side shopping cart state manager.
///
/// Owns the canonical in-memory list of cart lines and the three
/// mutation operations. Collaborators are injected: an
/// [`InventorySource`] gates quantity changes against stock, a
/// [`PersistenceBridge`] makes every committed snapshot durable before it
/// is published, and a [`Notifier`] surfaces declined and failed
/// operations to a human.
pub struct CartStore {
    inventory: Arc<dyn InventorySource>,
    notifier: Arc<dyn Notifier>,
    bridge: PersistenceBridge,
    snapshot_tx: watch::Sender<CartSnapshot>,
}

impl CartStore {
    /// Create a store, rehydrating the cart from the bridge's slot.
    ///
    /// An absent or unreadable slot yields an empty cart.
    #[must_use]
    pub fn new(
        inventory: Arc<dyn InventorySource>,
        bridge: PersistenceBridge,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let initial = bridge.load();
        let (snapshot_tx, _) = watch::channel(initial);

        Self {
            inventory,
            notifier,
            bridge,
            snapshot_tx,
        }
    }

    /// Wire a store from configuration: HTTP inventory client, filesystem
    /// slot, and tracing notifier.
    #[must_use]
    pub fn from_config(config: &CartConfig) -> Self {
        let inventory = Arc::new(InventoryClient::new(&config.inventory));
        let slot = Arc::new(FsSlot::new(config.storage_dir.clone()));
        let bridge = PersistenceBridge::new(slot, config.storage_key.clone());

        Self::new(inventory, bridge, Arc::new(TracingNotifier))
    }

    /// The current cart snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver starts at the current snapshot and observes every
    /// published one after it.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.snapshot_tx.subscribe()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Add one unit of a product to the cart.
    ///
    /// A product not yet in the cart gains a line with quantity 1; an
    /// existing line is merged by incrementing its quantity. Declined and
    /// failed attempts leave the cart unchanged and surface a fixed
    /// notification instead of an error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) {
        if let Err(e) = self.try_add(product_id).await {
            warn!(error = %e, "add to cart did not commit");
            let message = match e {
                CartError::OutOfStock { .. } => messages::OUT_OF_STOCK,
                _ => messages::ADD_FAILED,
            };
            self.notifier.notify(message);
        }
    }

    /// Remove a product's line from the cart.
    ///
    /// Removing a product that has no line surfaces a failure
    /// notification and leaves the cart unchanged.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&self, product_id: ProductId) {
        if let Err(e) = self.try_remove(product_id) {
            warn!(error = %e, "remove from cart did not commit");
            self.notifier.notify(messages::REMOVE_FAILED);
        }
    }

    /// Set a product's line to an exact quantity (not additive).
    ///
    /// Quantities of zero or less are ignored without notifying; callers
    /// use [`CartStore::remove_product`] for removal intents. An update
    /// for a product with no line is also ignored once the stock gate
    /// passes.
    #[instrument(skip(self), fields(product_id = %update.product_id, amount = update.amount))]
    pub async fn update_product_amount(&self, update: UpdateAmount) {
        if let Err(e) = self.try_update(update).await {
            warn!(error = %e, "quantity update did not commit");
            let message = match e {
                CartError::OutOfStock { .. } => messages::OUT_OF_STOCK,
                _ => messages::UPDATE_FAILED,
            };
            self.notifier.notify(message);
        }
    }

    // =========================================================================
    // Mutation internals
    // =========================================================================

    async fn try_add(&self, product_id: ProductId) -> Result<(), CartError> {
        let stock = self.inventory.fetch_stock(product_id).await?;
        let snapshot = self.snapshot();

        let target = snapshot.line(product_id).map_or(1, |line| line.amount + 1);
        if stock.amount < target {
            return Err(CartError::OutOfStock {
                product_id,
                requested: target,
                available: stock.amount,
            });
        }

        let next = if snapshot.contains(product_id) {
            snapshot.with_amount(product_id, target)
        } else {
            let product = self.inventory.fetch_product(product_id).await?;
            snapshot.with_line(CartLine::new(product, target))
        };

        self.commit(next)
    }

    fn try_remove(&self, product_id: ProductId) -> Result<(), CartError> {
        let next = self
            .snapshot()
            .without(product_id)
            .ok_or(CartError::NotInCart(product_id))?;

        self.commit(next)
    }

    async fn try_update(&self, update: UpdateAmount) -> Result<(), CartError> {
        // Zero and negative quantities are removals in disguise; callers
        // use remove_product for those.
        if update.amount <= 0 {
            return Ok(());
        }

        let stock = self.inventory.fetch_stock(update.product_id).await?;
        if stock.amount < update.amount {
            return Err(CartError::OutOfStock {
                product_id: update.product_id,
                requested: update.amount,
                available: stock.amount,
            });
        }

        let snapshot = self.snapshot();
        if !snapshot.contains(update.product_id) {
            // The UI asked to resize a line that no longer exists.
            return Ok(());
        }

        self.commit(snapshot.with_amount(update.product_id, update.amount))
    }

    /// Persist `next`, then publish it.
    ///
    /// The durable write happens first so an observer reading storage
    /// after seeing a published snapshot always sees consistent data.
    fn commit(&self, next: CartSnapshot) -> Result<(), CartError> {
        self.bridge.save(&next)?;
        self.snapshot_tx.send_replace(next);
        Ok(())
    }
}
