//! Identity key deduplicating cart lines.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Composite identity of a cart line: product plus variant options.
///
/// Two lines with the same product but a different size or scent are
/// distinct physical lines; adding an item whose key matches an existing
/// line increments that line instead of appending a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub scent: Option<String>,
}

impl LineKey {
    /// Create a key from a product ID and its variant options.
    #[must_use]
    pub const fn new(product_id: ProductId, size: Option<String>, scent: Option<String>) -> Self {
        Self {
            product_id,
            size,
            scent,
        }
    }
}

impl std::fmt::Display for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.product_id,
            self.size.as_deref().unwrap_or("-"),
            self.scent.as_deref().unwrap_or("-"),
        )
    }
}
