//! Unified error handling for cart operations.
//!
//! Every fallible cart operation returns [`CartError`] so callers can react
//! to the failure kind deliberately instead of relying on log side effects.
//! Nothing here is fatal to the page: the facade degrades each kind to a
//! visible notification plus a safe fallback value.

use thiserror::Error;

/// Errors from the local cart slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the slot file failed.
    #[error("I/O error on cart slot: {0}")]
    Io(#[from] std::io::Error),

    /// The cart could not be serialized.
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from cart operations, regardless of the active backend.
#[derive(Debug, Error)]
pub enum CartError {
    /// The local slot could not be written.
    ///
    /// Load-side corruption is never surfaced as an error; a corrupt or
    /// absent slot reads as an empty cart.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The HTTP exchange could not complete. The operation is abandoned,
    /// not retried; server-side state is unchanged.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The cart API rejected the credential (401). The credential has
    /// already been evicted locally.
    #[error("not authenticated")]
    Unauthorized,

    /// The cart API reported an application-level failure. The message is
    /// suitable for display verbatim.
    #[error("cart API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The cart API response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CartError {
    /// Whether this error means the user must re-authenticate.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
