//! Cart persistence adapters.
//!
//! Each adapter implements [`CartStore`] against one backing store: the
//! local JSON slot ([`LocalStore`]) or the remote cart API
//! ([`RemoteStore`]). [`Backend`] wraps both so the active adapter can be
//! selected from configuration at construction time.
//!
//! Every operation returns the resulting cart; multi-step flows (mutate,
//! then re-render a total) are independent reads, not one transaction, and
//! racing mutations resolve by last-write-wins at the backing store.

mod local;
mod remote;

pub use local::LocalStore;
pub use remote::RemoteStore;

use emberwick_core::{Cart, CartItem, LineKey};

use crate::config::{BackendKind, CartConfig};
use crate::error::Result;

/// Interface implemented by each persistence backend.
#[allow(async_fn_in_trait)]
pub trait CartStore {
    /// Read the current cart.
    async fn load(&self) -> Result<Cart>;

    /// Add an item, merging by identity key. An item with quantity 0 is
    /// treated as a removal of the matching line.
    async fn add(&self, item: CartItem) -> Result<Cart>;

    /// Remove the line with the given key. A missing key is a no-op.
    async fn remove(&self, key: &LineKey) -> Result<Cart>;

    /// Set a line's quantity. 0 removes the line; a missing key is a no-op.
    async fn set_quantity(&self, key: &LineKey, quantity: u32) -> Result<Cart>;

    /// Remove all lines, idempotently.
    async fn clear(&self) -> Result<Cart>;
}

/// The runtime-selected persistence backend.
#[derive(Debug, Clone)]
pub enum Backend {
    Local(LocalStore),
    Remote(RemoteStore),
}

impl Backend {
    /// Build the backend named by the configuration.
    #[must_use]
    pub fn from_config(config: &CartConfig) -> Self {
        match config.backend {
            BackendKind::Local => Self::Local(LocalStore::new(&config.local)),
            BackendKind::Remote => Self::Remote(RemoteStore::new(&config.remote)),
        }
    }
}

impl CartStore for Backend {
    async fn load(&self) -> Result<Cart> {
        match self {
            Self::Local(store) => store.load().await,
            Self::Remote(store) => store.load().await,
        }
    }

    async fn add(&self, item: CartItem) -> Result<Cart> {
        match self {
            Self::Local(store) => store.add(item).await,
            Self::Remote(store) => store.add(item).await,
        }
    }

    async fn remove(&self, key: &LineKey) -> Result<Cart> {
        match self {
            Self::Local(store) => store.remove(key).await,
            Self::Remote(store) => store.remove(key).await,
        }
    }

    async fn set_quantity(&self, key: &LineKey, quantity: u32) -> Result<Cart> {
        match self {
            Self::Local(store) => store.set_quantity(key, quantity).await,
            Self::Remote(store) => store.set_quantity(key, quantity).await,
        }
    }

    async fn clear(&self) -> Result<Cart> {
        match self {
            Self::Local(store) => store.clear().await,
            Self::Remote(store) => store.clear().await,
        }
    }
}
