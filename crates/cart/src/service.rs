//! The cart facade.
//!
//! [`CartService`] is the one function set storefront pages call, regardless
//! of which adapter persists the cart. The adapter is chosen from
//! configuration at construction time. Every successful mutation broadcasts
//! a [`CartEvent::Changed`] and pushes an outcome notification; every
//! failure degrades to a notification plus a safe fallback value, so no
//! cart operation is ever fatal to the page.

use emberwick_core::{Cart, CartItem, LineKey};
use rust_decimal::Decimal;
use tokio::sync::broadcast;
use tracing::instrument;

use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::events::{CartEvent, CartEvents};
use crate::notify::{Notifier, Severity};
use crate::store::{Backend, CartStore};

/// Variant options normalized onto an item by [`CartService::add_to_cart_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemOptions {
    pub size: Option<String>,
    pub scent: Option<String>,
}

/// The stable cart surface consumed by storefront pages.
pub struct CartService<S> {
    store: S,
    notifier: Notifier,
    events: CartEvents,
    login_url: String,
}

impl CartService<Backend> {
    /// Build a service over the backend named by the configuration.
    #[must_use]
    pub fn from_config(config: &CartConfig) -> Self {
        Self::new(Backend::from_config(config)).with_login_url(config.remote.login_url.clone())
    }
}

impl<S: CartStore> CartService<S> {
    /// Create a service over the given store with a detached notifier.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            notifier: Notifier::detached(),
            events: CartEvents::new(),
            login_url: "/login".to_string(),
        }
    }

    /// Render outcome notifications through the given notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// Override the login surface used on credential rejection.
    #[must_use]
    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = login_url.into();
        self
    }

    /// Subscribe to cart events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// The event channel, for handing to UI fragments.
    #[must_use]
    pub const fn events(&self) -> &CartEvents {
        &self.events
    }

    /// Read the current cart.
    ///
    /// Reads degrade to an empty cart on failure: the error is reported
    /// through the notifier (and, for credential rejection, the
    /// `AuthRequired` event) while the caller's prior UI state stays
    /// untouched.
    #[instrument(skip(self))]
    pub async fn cart(&self) -> Cart {
        match self.store.load().await {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!("Failed to load cart: {e}");
                self.report(&e);
                Cart::new()
            }
        }
    }

    /// Exact sum of `price * quantity` over the current cart.
    #[instrument(skip(self))]
    pub async fn subtotal(&self) -> Decimal {
        self.cart().await.subtotal()
    }

    /// Add an item as-is (its own quantity and options).
    ///
    /// # Errors
    ///
    /// Returns the typed failure after reporting it; the cart is unchanged.
    pub async fn add_to_cart(&self, item: CartItem) -> Result<Cart> {
        self.add_to_cart_with(item, None, ItemOptions::default())
            .await
    }

    /// Add an item, normalizing quantity and variant options onto it.
    ///
    /// A missing quantity defaults to 1; options override the item's own
    /// size and scent when present.
    ///
    /// # Errors
    ///
    /// Returns the typed failure after reporting it; the cart is unchanged.
    #[instrument(skip(self, item, options))]
    pub async fn add_to_cart_with(
        &self,
        mut item: CartItem,
        quantity: Option<u32>,
        options: ItemOptions,
    ) -> Result<Cart> {
        if let Some(quantity) = quantity {
            item.quantity = quantity;
        }
        if options.size.is_some() {
            item.size = options.size;
        }
        if options.scent.is_some() {
            item.scent = options.scent;
        }

        let name = item.name.clone();
        let result = self.store.add(item).await;
        self.finish(result, &format!("Added {name} to your cart"))
    }

    /// Remove the line with the given key.
    ///
    /// # Errors
    ///
    /// Returns the typed failure after reporting it; the cart is unchanged.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn remove_from_cart(&self, key: &LineKey) -> Result<Cart> {
        let result = self.store.remove(key).await;
        self.finish(result, "Removed from your cart")
    }

    /// Set a line's quantity; 0 removes the line.
    ///
    /// # Errors
    ///
    /// Returns the typed failure after reporting it; the cart is unchanged.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn update_quantity(&self, key: &LineKey, quantity: u32) -> Result<Cart> {
        let result = self.store.set_quantity(key, quantity).await;
        self.finish(result, "Cart updated")
    }

    /// Remove all lines.
    ///
    /// # Errors
    ///
    /// Returns the typed failure after reporting it; the cart is unchanged.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<Cart> {
        let result = self.store.clear().await;
        self.finish(result, "Cart cleared")
    }

    /// Broadcast and notify the outcome of a mutation.
    fn finish(&self, result: Result<Cart>, success_message: &str) -> Result<Cart> {
        match &result {
            Ok(cart) => {
                self.events.emit(CartEvent::Changed {
                    item_count: cart.item_count(),
                    subtotal: cart.subtotal(),
                });
                self.notifier.display(success_message, Severity::Success);
            }
            Err(e) => {
                tracing::error!("Cart operation failed: {e}");
                self.report(e);
            }
        }
        result
    }

    /// Degrade a failure to a notification (and an auth event when the
    /// credential was rejected).
    fn report(&self, error: &CartError) {
        match error {
            CartError::Unauthorized => {
                self.events.emit(CartEvent::AuthRequired {
                    login_url: self.login_url.clone(),
                });
                self.notifier
                    .display("Please sign in to use your cart", Severity::Warning);
            }
            CartError::Api { message, .. } => {
                self.notifier.display(message.clone(), Severity::Error);
            }
            CartError::Http(_) => {
                self.notifier
                    .display("Could not reach the cart service", Severity::Error);
            }
            CartError::Storage(_) | CartError::Parse(_) => {
                self.notifier
                    .display("Could not save your cart", Severity::Error);
            }
        }
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for CartService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartService")
            .field("store", &self.store)
            .field("login_url", &self.login_url)
            .finish()
    }
}
