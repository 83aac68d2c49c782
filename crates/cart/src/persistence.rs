//! Durable persistence for the cart snapshot.
//!
//! The cart is serialized as JSON and stored under a single fixed key in a
//! [`StorageSlot`]. Reads fail open: an absent, empty, or undecodable slot
//! rehydrates as an empty cart, so a corrupt value never takes the cart
//! down. Writes replace the whole value.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::warn;

use crate::types::CartSnapshot;

/// Errors that can occur while persisting the cart.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Encoding the snapshot failed.
    #[error("cart encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A durable key-value slot holding one string value per key.
pub trait StorageSlot: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// =============================================================================
// Slot Implementations
// =============================================================================

/// Filesystem-backed slot: one file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FsSlot {
    dir: PathBuf,
}

impl FsSlot {
    /// Create a slot rooted at `dir`. The directory is created on first
    /// write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl StorageSlot for FsSlot {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        // Write a sibling temp file and rename it into place so a reader
        // never observes a torn value.
        let path = self.key_path(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory slot for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: Mutex<HashMap<String, String>>,
    writes: AtomicU64,
}

impl MemorySlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot seeded with one stored value.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let slot = Self::default();
        slot.values
            .lock()
            .insert(key.to_string(), value.to_string());
        slot
    }

    /// The raw value currently stored under `key`, if any.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    /// Number of writes accepted since creation.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

// =============================================================================
// PersistenceBridge
// =============================================================================

/// Synchronizes the durable slot with the in-memory cart.
///
/// [`PersistenceBridge::save`] must complete before a new snapshot is
/// published, so an observer reading storage immediately after seeing a
/// snapshot always sees consistent data.
#[derive(Clone)]
pub struct PersistenceBridge {
    slot: Arc<dyn StorageSlot>,
    key: String,
}

impl PersistenceBridge {
    /// Create a bridge writing to `slot` under `key`.
    pub fn new(slot: Arc<dyn StorageSlot>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    /// Rehydrate the cart from the slot.
    ///
    /// An absent, empty, or undecodable value yields an empty snapshot;
    /// decode failures are logged and swallowed.
    #[must_use]
    pub fn load(&self) -> CartSnapshot {
        let raw = match self.slot.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return CartSnapshot::empty(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read stored cart, starting empty");
                return CartSnapshot::empty();
            }
        };

        if raw.trim().is_empty() {
            return CartSnapshot::empty();
        }

        match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored cart is undecodable, starting empty");
                CartSnapshot::empty()
            }
        }
    }

    /// Encode `snapshot` and write it to the slot, replacing any prior
    /// value.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the slot rejects the write.
    pub fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(snapshot)?;
        self.slot.write(&self.key, &encoded)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{CartLine, Product};
    use shopcart_core::ProductId;

    const KEY: &str = "shopcart:cart";

    fn product(id: i32, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Sneaker {id}"),
            price: price.parse().unwrap(),
            image: Some(format!("https://cdn.example.com/{id}.jpg")),
        }
    }

    fn bridge(slot: Arc<dyn StorageSlot>) -> PersistenceBridge {
        PersistenceBridge::new(slot, KEY)
    }

    #[test]
    fn test_load_absent_slot_is_empty() {
        let bridge = bridge(Arc::new(MemorySlot::new()));
        assert!(bridge.load().is_empty());
    }

    #[test]
    fn test_load_empty_value_is_empty() {
        let bridge = bridge(Arc::new(MemorySlot::with_value(KEY, "  ")));
        assert!(bridge.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_value_is_empty() {
        let bridge = bridge(Arc::new(MemorySlot::with_value(KEY, "{not json")));
        assert!(bridge.load().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_lines_and_order() {
        let cart = CartSnapshot::empty()
            .with_line(CartLine::new(product(2, "139.90"), 1))
            .with_line(CartLine::new(product(1, "19.90"), 999_999));

        let bridge = bridge(Arc::new(MemorySlot::new()));
        bridge.save(&cart).unwrap();

        assert_eq!(bridge.load(), cart);
    }

    #[test]
    fn test_save_replaces_prior_value() {
        let bridge = bridge(Arc::new(MemorySlot::new()));

        let first = CartSnapshot::empty().with_line(CartLine::new(product(1, "10.00"), 1));
        bridge.save(&first).unwrap();

        let second = first.without(ProductId::new(1)).unwrap();
        bridge.save(&second).unwrap();

        assert_eq!(bridge.load(), second);
    }

    #[test]
    fn test_fs_slot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = bridge(Arc::new(FsSlot::new(dir.path())));

        let cart = CartSnapshot::empty().with_line(CartLine::new(product(1, "19.90"), 3));
        bridge.save(&cart).unwrap();

        assert_eq!(bridge.load(), cart);
    }

    #[test]
    fn test_fs_slot_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FsSlot::new(dir.path());
        assert!(slot.read(KEY).unwrap().is_none());
    }
}
