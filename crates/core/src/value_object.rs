//! Value objects: equality by value, not identity.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Non-negative decimal amount (unit price or order total).
///
/// Displayed in normalized form, so `20 * 3` prints as `60` and
/// `29.99 * 10` prints as `299.9`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::invalid_price(format!(
                "price {amount} must be non negative"
            )));
        }
        Ok(Self(amount.normalize()))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Total for `quantity` units at this price.
    pub fn times(&self, quantity: u64) -> DomainResult<Price> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map(|total| Price(total.normalize()))
            .ok_or_else(|| {
                DomainError::invalid_price(format!("total of {quantity} x {} overflows", self.0))
            })
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for Price {
    fn from(value: u32) -> Self {
        Self(Decimal::from(value))
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::invalid_price(format!("{s}: {e}")))?;
        Self::new(amount)
    }
}
