//! Cart change broadcast.
//!
//! Mutating cart operations publish a [`CartEvent`] so independent UI
//! fragments (header badge, cart page listing) can re-read and re-render
//! without being coupled to the code path that performed the mutation.
//! Subscribers that lag simply miss events; the cart itself is always
//! re-readable from the facade.

use rust_decimal::Decimal;
use tokio::sync::broadcast;

/// Buffered events per subscriber before lagging.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// A cart lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Cart contents changed; dependent fragments should re-read.
    Changed {
        /// Total quantity across all lines.
        item_count: u32,
        /// Exact sum of `price * quantity`.
        subtotal: Decimal,
    },
    /// The credential was rejected; the caller should redirect to the
    /// login surface.
    AuthRequired {
        /// Where to send the user to sign in.
        login_url: String,
    },
}

/// Handle for publishing and subscribing to cart events.
#[derive(Debug, Clone)]
pub struct CartEvents {
    tx: broadcast::Sender<CartEvent>,
}

impl CartEvents {
    /// Create a new event channel.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to cart events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Delivery is best-effort: an event with no
    /// subscribers is dropped silently.
    pub(crate) fn emit(&self, event: CartEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for CartEvents {
    fn default() -> Self {
        Self::new()
    }
}
