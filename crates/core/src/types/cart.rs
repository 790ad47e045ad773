//! The cart: an ordered sequence of line items with merge-by-key semantics.

use rust_decimal::Decimal;

use super::item::CartItem;
use super::key::LineKey;

/// An ordered sequence of [`CartItem`] with no duplicate identity keys.
///
/// Insertion order is preserved. Adding an item whose key matches an
/// existing line increments that line's quantity instead of appending.
/// A quantity of 0 is never stored: updates to 0 remove the line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from raw items, normalizing foreign data.
    ///
    /// Items arriving from the slot file or the cart API are merged by
    /// identity key and zero-quantity lines are dropped, so a cart never
    /// violates its invariants regardless of what was persisted.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add(item);
        }
        cart
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total quantity across all lines (the header badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Exact sum of `price * quantity` over all lines; 0 for an empty cart.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Find a line by its identity key.
    #[must_use]
    pub fn get(&self, key: &LineKey) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.key() == key)
    }

    /// Add an item, merging by identity key.
    ///
    /// An item with quantity 0 removes the matching line instead of being
    /// stored.
    pub fn add(&mut self, item: CartItem) {
        if item.quantity == 0 {
            self.remove(&item.key());
            return;
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.key() == item.key()) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
    }

    /// Remove the line with the given key. Removing a missing key is a no-op.
    pub fn remove(&mut self, key: &LineKey) {
        self.items.retain(|i| &i.key() != key);
    }

    /// Set the quantity of the line with the given key.
    ///
    /// A quantity of 0 removes the line. A missing key is a no-op.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) {
        if quantity == 0 {
            self.remove(key);
            return;
        }

        if let Some(existing) = self.items.iter_mut().find(|i| &i.key() == key) {
            existing.quantity = quantity;
        }
    }

    /// Remove all lines. Clearing an empty cart is a no-op.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Consume the cart, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn rose_candle(quantity: u32) -> CartItem {
        let mut item = CartItem::new(
            ProductId::new(1),
            "Hearth Candle",
            Decimal::from(500),
            "/img/hearth.jpg",
            1,
        )
        .unwrap()
        .with_size("L")
        .with_scent("Rose");
        item.quantity = quantity;
        item
    }

    fn trimmer() -> CartItem {
        CartItem::new(
            ProductId::new(2),
            "Wick Trimmer",
            Decimal::new(1250, 2),
            "/img/trimmer.jpg",
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_add_merges_by_identity_key() {
        let mut cart = Cart::new();
        cart.add(rose_candle(2));
        cart.add(rose_candle(1));

        assert_eq!(cart.len(), 1);
        let line = cart.get(&rose_candle(1).key()).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(cart.subtotal(), Decimal::from(1500));
    }

    #[test]
    fn test_add_distinct_options_appends() {
        let mut cart = Cart::new();
        cart.add(rose_candle(1));
        let cedar = rose_candle(1).with_scent("Cedar");
        cart.add(cedar);

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(trimmer());
        cart.add(rose_candle(1));
        cart.add(trimmer());

        let names: Vec<_> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Wick Trimmer", "Hearth Candle"]);
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut cart = Cart::new();
        cart.add(trimmer());
        let before = cart.clone();

        cart.remove(&rose_candle(1).key());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(rose_candle(2));
        cart.set_quantity(&rose_candle(1).key(), 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.add(rose_candle(2));
        cart.set_quantity(&rose_candle(1).key(), 5);

        assert_eq!(cart.get(&rose_candle(1).key()).unwrap().quantity, 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_set_quantity_missing_key_is_noop() {
        let mut cart = Cart::new();
        cart.add(trimmer());
        let before = cart.clone();

        cart.set_quantity(&rose_candle(1).key(), 3);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(rose_candle(1));
        cart.clear();
        assert!(cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        let cart = Cart::new();
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_from_items_merges_and_drops_zero_quantity() {
        let mut zero = trimmer();
        zero.quantity = 0;

        let cart = Cart::from_items(vec![rose_candle(2), zero, rose_candle(1)]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_zero_quantity_removes_existing_line() {
        let mut cart = Cart::new();
        cart.add(rose_candle(2));
        cart.add(rose_candle(0));

        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_is_exact_decimal_sum() {
        let mut cart = Cart::new();
        cart.add(trimmer());
        cart.add(trimmer());
        cart.add(trimmer());

        // 3 x 12.50 = 37.50, exactly
        assert_eq!(cart.subtotal(), Decimal::new(3750, 2));
    }
}
