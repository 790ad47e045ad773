//! Remote cart API client.
//!
//! Wraps the cart REST resource with one request/response exchange per
//! operation: no retries, no timeout override beyond the transport default.
//! On a network failure the operation is abandoned and server-side state is
//! unchanged.
//!
//! The bearer credential, when configured, is attached as an
//! `Authorization` header. A 401 response evicts the credential locally and
//! surfaces [`CartError::Unauthorized`]; deployments that transmit the
//! credential implicitly simply run without one.

use std::sync::{Arc, RwLock};

use emberwick_core::{Cart, CartItem, LineKey};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::RemoteStoreConfig;
use crate::error::{CartError, Result};
use crate::store::CartStore;

/// Success and failure envelope of the cart API.
///
/// 2xx bodies carry `items` and/or `message`; non-2xx bodies carry a
/// `message` for display.
#[derive(Debug, Deserialize)]
struct CartEnvelope {
    #[serde(default)]
    items: Option<Vec<CartItem>>,
    #[serde(default)]
    message: Option<String>,
}

/// Body of the quantity update operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePayload<'a> {
    product_id: emberwick_core::ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scent: Option<&'a str>,
    quantity: u32,
}

/// Cart persistence against the remote cart API.
#[derive(Clone)]
pub struct RemoteStore {
    inner: Arc<RemoteStoreInner>,
}

struct RemoteStoreInner {
    client: reqwest::Client,
    base: String,
    token: RwLock<Option<SecretString>>,
}

impl RemoteStore {
    /// Create a client for the configured cart service.
    #[must_use]
    pub fn new(config: &RemoteStoreConfig) -> Self {
        Self {
            inner: Arc::new(RemoteStoreInner {
                client: reqwest::Client::new(),
                base: config.base_url.as_str().trim_end_matches('/').to_string(),
                token: RwLock::new(config.api_token.clone()),
            }),
        }
    }

    /// Whether a bearer credential is currently held.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.inner
            .token
            .read()
            .map(|token| token.is_some())
            .unwrap_or(false)
    }

    /// Replace the bearer credential (e.g., after login).
    pub fn set_credential(&self, token: SecretString) {
        if let Ok(mut slot) = self.inner.token.write() {
            *slot = Some(token);
        }
    }

    /// Discard the bearer credential.
    pub fn evict_credential(&self) {
        if let Ok(mut slot) = self.inner.token.write() {
            *slot = None;
        }
    }

    fn bearer(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .ok()?
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }

    /// Issue a request and decode the cart API envelope.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<CartEnvelope> {
        let request = match self.bearer() {
            Some(bearer) => request.header(reqwest::header::AUTHORIZATION, bearer),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.evict_credential();
            return Err(CartError::Unauthorized);
        }

        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<CartEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(CartError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Use the items the server returned, or re-read when the response was
    /// message-only.
    async fn cart_or_refetch(&self, envelope: CartEnvelope) -> Result<Cart> {
        match envelope.items {
            Some(items) => Ok(Cart::from_items(items)),
            None => self.fetch_cart().await,
        }
    }

    /// Read the current cart.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` on credential rejection (after evicting the
    /// credential), `Api` on an application-level failure, or `Http` if the
    /// exchange could not complete.
    #[instrument(skip(self))]
    pub async fn fetch_cart(&self) -> Result<Cart> {
        let url = format!("{}/api/cart", self.inner.base);
        let envelope = self.send(self.inner.client.get(url)).await?;
        Ok(Cart::from_items(envelope.items.unwrap_or_default()))
    }

    /// Add an item; the server performs the merge-by-key.
    ///
    /// A quantity of 0 is redirected to the removal operation instead of
    /// being sent as an upsert.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_cart`].
    #[instrument(skip(self, item), fields(key = %item.key()))]
    pub async fn upsert_item(&self, item: CartItem) -> Result<Cart> {
        if item.quantity == 0 {
            return self.remove_item(&item.key()).await;
        }

        let url = format!("{}/api/cart/add", self.inner.base);
        let envelope = self.send(self.inner.client.post(url).json(&item)).await?;
        self.cart_or_refetch(envelope).await
    }

    /// Set a line's quantity. 0 removes the line.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_cart`].
    #[instrument(skip(self), fields(key = %key))]
    pub async fn update_item(&self, key: &LineKey, quantity: u32) -> Result<Cart> {
        if quantity == 0 {
            return self.remove_item(key).await;
        }

        let url = format!("{}/api/cart/update", self.inner.base);
        let payload = UpdatePayload {
            product_id: key.product_id,
            size: key.size.as_deref(),
            scent: key.scent.as_deref(),
            quantity,
        };
        let envelope = self.send(self.inner.client.put(url).json(&payload)).await?;
        self.cart_or_refetch(envelope).await
    }

    /// Remove a line by product, with the variant options disambiguating
    /// which physical line when the product alone is ambiguous.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_cart`].
    #[instrument(skip(self), fields(key = %key))]
    pub async fn remove_item(&self, key: &LineKey) -> Result<Cart> {
        let url = format!("{}/api/cart/remove/{}", self.inner.base, key.product_id);

        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(size) = key.size.as_deref() {
            query.push(("size", size));
        }
        if let Some(scent) = key.scent.as_deref() {
            query.push(("scent", scent));
        }

        let envelope = self
            .send(self.inner.client.delete(url).query(&query))
            .await?;
        self.cart_or_refetch(envelope).await
    }

    /// Remove all items for the current owner.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_cart`].
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<Cart> {
        let url = format!("{}/api/cart/clear", self.inner.base);
        let envelope = self.send(self.inner.client.delete(url)).await?;
        self.cart_or_refetch(envelope).await
    }
}

impl CartStore for RemoteStore {
    async fn load(&self) -> Result<Cart> {
        self.fetch_cart().await
    }

    async fn add(&self, item: CartItem) -> Result<Cart> {
        self.upsert_item(item).await
    }

    async fn remove(&self, key: &LineKey) -> Result<Cart> {
        self.remove_item(key).await
    }

    async fn set_quantity(&self, key: &LineKey, quantity: u32) -> Result<Cart> {
        self.update_item(key, quantity).await
    }

    async fn clear(&self) -> Result<Cart> {
        self.clear_cart().await
    }
}

impl std::fmt::Debug for RemoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStore")
            .field("base", &self.inner.base)
            .field("credential", &self.has_credential())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;
    use crate::config::RemoteStoreConfig;

    fn config(token: Option<&str>) -> RemoteStoreConfig {
        RemoteStoreConfig {
            base_url: Url::parse("https://shop.example.com/").unwrap(),
            api_token: token.map(SecretString::from),
            login_url: "/login".to_string(),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let store = RemoteStore::new(&config(None));
        assert_eq!(store.inner.base, "https://shop.example.com");
    }

    #[test]
    fn test_bearer_header_format() {
        let store = RemoteStore::new(&config(Some("tok_4f2a")));
        assert_eq!(store.bearer().unwrap(), "Bearer tok_4f2a");
    }

    #[test]
    fn test_credential_eviction() {
        let store = RemoteStore::new(&config(Some("tok_4f2a")));
        assert!(store.has_credential());

        store.evict_credential();
        assert!(!store.has_credential());
        assert!(store.bearer().is_none());
    }

    #[test]
    fn test_envelope_accepts_items_or_message() {
        let with_items: CartEnvelope =
            serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert_eq!(with_items.items.unwrap().len(), 0);

        let with_message: CartEnvelope =
            serde_json::from_str(r#"{"message": "Cart cleared"}"#).unwrap();
        assert!(with_message.items.is_none());
        assert_eq!(with_message.message.unwrap(), "Cart cleared");
    }

    #[test]
    fn test_update_payload_serializes_camel_case() {
        let payload = UpdatePayload {
            product_id: emberwick_core::ProductId::new(4),
            size: Some("S"),
            scent: None,
            quantity: 2,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["productId"], 4);
        assert_eq!(json["size"], "S");
        assert!(json.get("scent").is_none());
    }
}
