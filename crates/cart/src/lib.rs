//! Emberwick Cart - cart persistence and UI plumbing for the storefront.
//!
//! This crate is the single cart surface consumed by storefront pages. It
//! persists cart contents either to a local JSON slot on disk or through the
//! remote cart API, broadcasts cart-changed events so independent UI
//! fragments (header badge, cart page listing) can refresh without coupling,
//! and renders transient auto-dismissing notifications for operation
//! outcomes.
//!
//! # Architecture
//!
//! - [`store`] - The [`store::CartStore`] adapter interface with two
//!   implementations: [`store::LocalStore`] (JSON slot file) and
//!   [`store::RemoteStore`] (REST cart resource via `reqwest`).
//! - [`service`] - [`CartService`], the stable facade. The active adapter is
//!   selected from configuration at construction time, never via ambient
//!   globals.
//! - [`events`] - Cart-changed broadcast channel.
//! - [`notify`] - Transient notification banners with a time-driven
//!   lifecycle.
//!
//! # Example
//!
//! ```rust,ignore
//! use emberwick_cart::{CartConfig, CartService};
//!
//! let config = CartConfig::from_env()?;
//! let service = CartService::from_config(&config);
//!
//! let mut events = service.subscribe();
//! let cart = service.add_to_cart(item).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod events;
pub mod notify;
pub mod service;
pub mod store;

pub use config::{BackendKind, CartConfig, ConfigError};
pub use error::{CartError, Result, StorageError};
pub use events::{CartEvent, CartEvents};
pub use notify::{Notification, NotificationSink, NotificationState, Notifier, Severity};
pub use service::{CartService, ItemOptions};
pub use store::{Backend, CartStore, LocalStore, RemoteStore};
