//! A single cart line item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::key::LineKey;

/// Errors constructing a cart item.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartItemError {
    /// Quantity must be at least 1.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// Price must not be negative.
    #[error("price must not be negative: {0}")]
    NegativePrice(Decimal),
}

/// One line of a cart.
///
/// Field names serialize in camelCase to match the slot layout and the cart
/// API wire format (`productId`, `name`, `price`, `image`, `quantity`,
/// `size`, `scent`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scent: Option<String>,
}

impl CartItem {
    /// Create a validated cart item.
    ///
    /// # Errors
    ///
    /// Returns an error if `quantity` is 0 or `price` is negative.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
        quantity: u32,
    ) -> Result<Self, CartItemError> {
        if quantity == 0 {
            return Err(CartItemError::ZeroQuantity);
        }
        if price.is_sign_negative() {
            return Err(CartItemError::NegativePrice(price));
        }

        Ok(Self {
            product_id,
            name: name.into(),
            price,
            image: image.into(),
            quantity,
            size: None,
            scent: None,
        })
    }

    /// Set the size option.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the scent option.
    #[must_use]
    pub fn with_scent(mut self, scent: impl Into<String>) -> Self {
        self.scent = Some(scent.into());
        self
    }

    /// The identity key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id, self.size.clone(), self.scent.clone())
    }

    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn candle() -> CartItem {
        CartItem::new(ProductId::new(1), "Hearth Candle", Decimal::from(500), "/img/hearth.jpg", 2)
            .unwrap()
            .with_size("L")
            .with_scent("Rose")
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let result = CartItem::new(
            ProductId::new(1),
            "Hearth Candle",
            Decimal::from(500),
            "/img/hearth.jpg",
            0,
        );
        assert_eq!(result.unwrap_err(), CartItemError::ZeroQuantity);
    }

    #[test]
    fn test_rejects_negative_price() {
        let result = CartItem::new(
            ProductId::new(1),
            "Hearth Candle",
            Decimal::from(-1),
            "/img/hearth.jpg",
            1,
        );
        assert!(matches!(result, Err(CartItemError::NegativePrice(_))));
    }

    #[test]
    fn test_line_total() {
        assert_eq!(candle().line_total(), Decimal::from(1000));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(candle()).unwrap();
        assert_eq!(json["productId"], 1);
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["scent"], "Rose");
        assert!(json.get("product_id").is_none());
    }

    #[test]
    fn test_deserializes_numeric_price_and_missing_options() {
        let item: CartItem = serde_json::from_str(
            r#"{"productId": 3, "name": "Wick Trimmer", "price": 12.5, "image": "/img/trimmer.jpg", "quantity": 1}"#,
        )
        .unwrap();
        assert_eq!(item.price, Decimal::new(125, 1));
        assert_eq!(item.size, None);
        assert_eq!(item.scent, None);
    }
}
