//! Shopcart - client-side shopping cart state manager.
//!
//! Maintains an in-memory and persisted list of purchasable items with
//! quantities, validates quantity changes against a remote inventory
//! source, and exposes add/remove/update operations to a UI layer.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the canonical cart and its three mutation
//!   operations; subscribers observe published snapshots through a watch
//!   channel.
//! - [`persistence::PersistenceBridge`] writes every committed snapshot to
//!   a durable key-value slot before it is published, and rehydrates the
//!   cart at startup.
//! - Collaborators are trait seams, replaceable in tests:
//!   [`inventory::InventorySource`] for stock and product lookups,
//!   [`notify::Notifier`] for user-facing messages, and
//!   [`persistence::StorageSlot`] for the durable slot.
//!
//! Failures never propagate to the caller: a declined or failed operation
//! leaves the cart unchanged and surfaces one fixed notification string.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopcart::config::CartConfig;
//! use shopcart::store::{CartStore, UpdateAmount};
//! use shopcart_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let store = CartStore::from_config(&config);
//! let mut cart_updates = store.subscribe();
//!
//! store.add_product(ProductId::new(1)).await;
//! store
//!     .update_product_amount(UpdateAmount {
//!         product_id: ProductId::new(1),
//!         amount: 3,
//!     })
//!     .await;
//!
//! let cart = store.snapshot();
//! println!("{} items, subtotal {}", cart.total_items(), cart.subtotal());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod inventory;
pub mod notify;
pub mod persistence;
pub mod store;
pub mod types;

pub use config::CartConfig;
pub use error::CartError;
pub use inventory::{InventoryClient, InventoryError, InventorySource};
pub use notify::{Notifier, RecordingNotifier, TracingNotifier};
pub use persistence::{FsSlot, MemorySlot, PersistenceBridge, StorageSlot};
pub use store::{CartStore, UpdateAmount};
pub use types::{CartLine, CartSnapshot, Product, StockRecord};
