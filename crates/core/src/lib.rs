//! Emberwick Core - Shared cart types library.
//!
//! This crate provides the cart data model shared by the Emberwick cart
//! components:
//! - `cart` - The storefront cart module (local and remote persistence)
//! - `integration-tests` - Cross-crate test suite
//!
//! # Architecture
//!
//! The core crate contains only types and the pure line-item semantics - no
//! I/O, no HTTP clients, no storage. Both persistence adapters delegate the
//! merge/remove/update rules to [`Cart`] so the invariants are implemented
//! exactly once.
//!
//! # Modules
//!
//! - [`types`] - `CartItem`, `LineKey`, `Cart`, and the `ProductId` newtype

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
