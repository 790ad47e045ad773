//! Integration tests for the Emberwick cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p emberwick-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_service_local` - The facade over the local slot adapter
//! - `cart_service_remote` - The facade and adapter against a mock cart API
//!
//! The remote tests spin up a `wiremock` server per test; no external
//! service is required.

#![cfg_attr(not(test), forbid(unsafe_code))]

use emberwick_core::{CartItem, ProductId};
use rust_decimal::Decimal;

/// The fixture used across test files: a large rose candle at 500.
///
/// # Panics
///
/// Panics if the fixture constants are invalid, which would be a bug in the
/// fixture itself.
#[must_use]
pub fn rose_candle(quantity: u32) -> CartItem {
    let mut item = CartItem::new(
        ProductId::new(1),
        "Hearth Candle",
        Decimal::from(500),
        "/img/hearth.jpg",
        1,
    )
    .expect("fixture item is valid")
    .with_size("L")
    .with_scent("Rose");
    item.quantity = quantity;
    item
}
