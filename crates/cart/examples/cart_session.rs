//! Minimal cart session against the local backend.
//!
//! Run with:
//!
//! ```bash
//! cargo run -p emberwick-cart --example cart_session
//! ```
//!
//! Writes the slot file under `CART_STORAGE_DIR` (default `.emberwick`) and
//! logs the events a storefront page would react to.

use emberwick_cart::{CartConfig, CartService};
use emberwick_core::{CartItem, ProductId};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "emberwick_cart=info,cart_session=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CartConfig::from_env().expect("Failed to load configuration");
    let service = CartService::from_config(&config);
    let mut events = service.subscribe();

    let candle = CartItem::new(
        ProductId::new(1),
        "Hearth Candle",
        Decimal::new(2400, 2),
        "/img/hearth.jpg",
        2,
    )
    .expect("valid item")
    .with_size("L")
    .with_scent("Rose");

    service.add_to_cart(candle.clone()).await.expect("add");
    service
        .update_quantity(&candle.key(), 3)
        .await
        .expect("update");

    let cart = service.cart().await;
    tracing::info!(
        lines = cart.len(),
        items = cart.item_count(),
        subtotal = %cart.subtotal(),
        "cart after session"
    );

    while let Ok(event) = events.try_recv() {
        tracing::info!(?event, "ui fragment would refresh");
    }

    service.clear().await.expect("clear");
}
