//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are non-negative integers. Raw values arrive as signed
//! integers (log lines, snapshot files), so construction validates the sign.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of a party. Customers and suppliers share this namespace.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(u64);

/// Identifier of a catalog product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

/// Identifier of an order (system-assigned).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Validate a raw identifier. Negative values are rejected.
            pub fn new(raw: i64) -> DomainResult<Self> {
                u64::try_from(raw).map(Self).map_err(|_| {
                    DomainError::invalid_id(format!("{} {} must be non negative", $name, raw))
                })
            }

            pub const fn from_u64(value: u64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}: {}", $name, s, e)))?;
                Self::new(raw)
            }
        }
    };
}

impl_int_newtype!(PartyId, "party id");
impl_int_newtype!(ProductId, "product id");
impl_int_newtype!(OrderId, "order id");

impl OrderId {
    /// The first id handed out by a fresh store.
    pub const FIRST: OrderId = OrderId(1);

    /// The id that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Customer named by an order.
///
/// Orders carry the raw customer number as given; it is neither sign-checked
/// nor required to name a registered customer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerRef(i64);

impl CustomerRef {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether this reference names the party `id`.
    pub fn refers_to(self, id: PartyId) -> bool {
        u64::try_from(self.0).is_ok_and(|raw| raw == id.get())
    }
}

impl From<i64> for CustomerRef {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<PartyId> for CustomerRef {
    fn from(id: PartyId) -> Self {
        Self(id.get() as i64)
    }
}

impl core::fmt::Display for CustomerRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
