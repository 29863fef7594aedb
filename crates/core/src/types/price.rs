//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel over the wire as plain JSON numbers (`"price": 120`), but are
//! held as [`Decimal`] so that summing line totals never accumulates binary
//! floating point error. A `Price` is never negative.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency symbol used when displaying prices.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative monetary amount in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Price of `quantity` units at this unit price.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }

    /// Order total for this subtotal: the delivery fee is added only when the
    /// subtotal is non-zero, so an empty cart is never charged for delivery.
    #[must_use]
    pub fn with_delivery_fee(self, fee: Self) -> Self {
        if self.is_zero() { Self::ZERO } else { self + fee }
    }

    /// Delivery fee that applies to this subtotal (zero for an empty cart).
    #[must_use]
    pub fn delivery_fee_for(self, fee: Self) -> Self {
        if self.is_zero() { Self::ZERO } else { fee }
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so width and alignment flags apply to the whole amount
        f.pad(&format!("{CURRENCY_SYMBOL}{}", self.0.normalize()))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 0)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_times() {
        assert_eq!(Price::from_units(100).times(2), Price::from_units(200));
        assert_eq!(Price::from_units(100).times(0), Price::ZERO);
    }

    #[test]
    fn test_delivery_fee_added_to_non_empty_subtotal() {
        let fee = Price::from_units(59);
        assert_eq!(
            Price::from_units(200).with_delivery_fee(fee),
            Price::from_units(259)
        );
        assert_eq!(Price::from_units(200).delivery_fee_for(fee), fee);
    }

    #[test]
    fn test_delivery_fee_waived_for_empty_subtotal() {
        let fee = Price::from_units(59);
        assert_eq!(Price::ZERO.with_delivery_fee(fee), Price::ZERO);
        assert_eq!(Price::ZERO.delivery_fee_for(fee), Price::ZERO);
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let price: Price = serde_json::from_str("120").unwrap();
        assert_eq!(price, Price::from_units(120));

        let price: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(price.amount(), Decimal::new(125, 1));
    }

    #[test]
    fn test_deserialize_negative_fails() {
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }

    #[test]
    fn test_serialize_as_json_number() {
        let json = serde_json::to_string(&Price::from_units(259)).unwrap();
        assert_eq!(json, "259.0");
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_units(259).to_string(), "₹259");
        assert_eq!(Price::new(Decimal::new(1250, 2)).unwrap().to_string(), "₹12.5");
        assert_eq!(format!("{:>6}", Price::from_units(59)), "   ₹59");
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_units(10), Price::from_units(32)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_units(42));
    }
}
