//! Core types for the Emberwick cart.
//!
//! This module provides the cart data model and the pure operations on it.

pub mod cart;
pub mod id;
pub mod item;
pub mod key;

pub use cart::Cart;
pub use id::ProductId;
pub use item::{CartItem, CartItemError};
pub use key::LineKey;
