//! Local cart slot persistence.
//!
//! The cart lives in a single slot file holding a JSON-encoded array of
//! line items, the disk analogue of a browser key-value slot. The blob has
//! no schema version field; the layout matches what the remote API serves.
//!
//! Reads never fail: an absent or corrupt slot is logged and treated as an
//! empty cart. Writes return a typed [`StorageError`] so the facade can
//! surface the failure instead of losing it in a log.

use std::path::{Path, PathBuf};

use emberwick_core::{Cart, CartItem, LineKey};
use tracing::{instrument, warn};

use crate::config::LocalStoreConfig;
use crate::error::{Result, StorageError};
use crate::store::CartStore;

/// File name of the slot inside the configured directory.
const SLOT_FILE: &str = "cart.json";

/// Cart persistence against a local JSON slot file.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Create a store writing to `cart.json` under the configured directory.
    #[must_use]
    pub fn new(config: &LocalStoreConfig) -> Self {
        Self {
            path: config.dir.join(SLOT_FILE),
        }
    }

    /// Create a store writing to an explicit slot path.
    #[must_use]
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The slot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the slot, treating absent or corrupt data as an empty cart.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn read_slot(&self) -> Cart {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Cart::new(),
            Err(e) => {
                warn!("Cart slot unreadable, treating as empty: {e}");
                return Cart::new();
            }
        };

        match serde_json::from_slice::<Vec<CartItem>>(&bytes) {
            Ok(items) => Cart::from_items(items),
            Err(e) => {
                warn!("Cart slot corrupt, treating as empty: {e}");
                Cart::new()
            }
        }
    }

    /// Serialize the cart and overwrite the slot.
    async fn write_slot(&self, cart: &Cart) -> std::result::Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let bytes = serde_json::to_vec(cart.items())?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }

    /// Load, apply a pure mutation, and persist the result.
    async fn mutate(&self, apply: impl FnOnce(&mut Cart)) -> Result<Cart> {
        let mut cart = self.read_slot().await;
        apply(&mut cart);
        self.write_slot(&cart).await?;
        Ok(cart)
    }
}

impl CartStore for LocalStore {
    async fn load(&self) -> Result<Cart> {
        Ok(self.read_slot().await)
    }

    async fn add(&self, item: CartItem) -> Result<Cart> {
        self.mutate(|cart| cart.add(item)).await
    }

    async fn remove(&self, key: &LineKey) -> Result<Cart> {
        self.mutate(|cart| cart.remove(key)).await
    }

    async fn set_quantity(&self, key: &LineKey, quantity: u32) -> Result<Cart> {
        self.mutate(|cart| cart.set_quantity(key, quantity)).await
    }

    async fn clear(&self) -> Result<Cart> {
        self.mutate(Cart::clear).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use emberwick_core::ProductId;
    use rust_decimal::Decimal;

    use super::*;

    fn store(dir: &tempfile::TempDir) -> LocalStore {
        LocalStore::at_path(dir.path().join("cart.json"))
    }

    fn rose_candle(quantity: u32) -> CartItem {
        let mut item = CartItem::new(
            ProductId::new(1),
            "Hearth Candle",
            Decimal::from(500),
            "/img/hearth.jpg",
            1,
        )
        .unwrap()
        .with_size("L")
        .with_scent("Rose");
        item.quantity = quantity;
        item
    }

    #[tokio::test]
    async fn test_missing_slot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cart = store(&dir).load().await.unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_slot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        tokio::fs::write(store.path(), b"{not json").await.unwrap();

        let cart = store.load().await.unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_add_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        store(&dir).add(rose_candle(2)).await.unwrap();

        let cart = store(&dir).load().await.unwrap();
        assert_eq!(cart.item_count(), 2);
    }

    #[tokio::test]
    async fn test_add_merges_in_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.add(rose_candle(2)).await.unwrap();
        let cart = store.add(rose_candle(1)).await.unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), Decimal::from(1500));
    }

    #[tokio::test]
    async fn test_set_quantity_zero_removes_from_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.add(rose_candle(2)).await.unwrap();

        let cart = store
            .set_quantity(&rose_candle(1).key(), 0)
            .await
            .unwrap();
        assert!(cart.is_empty());
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_twice_is_safe() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.add(rose_candle(1)).await.unwrap();

        assert!(store.clear().await.unwrap().is_empty());
        assert!(store.clear().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_slot_is_plain_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.add(rose_candle(1)).await.unwrap();

        let blob = tokio::fs::read(store.path()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&blob).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["productId"], 1);
    }

    #[tokio::test]
    async fn test_write_failure_is_typed() {
        // A directory where the slot file should be makes the write fail.
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::at_path(dir.path());

        let result = store.add(rose_candle(1)).await;
        assert!(matches!(
            result,
            Err(crate::error::CartError::Storage(StorageError::Io(_)))
        ));
    }
}
