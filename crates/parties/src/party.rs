use core::str::FromStr;

use serde::{Deserialize, Serialize};

use matamazon_core::{DomainError, DomainResult, Entity, PartyId};

/// Party kind: customer or supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    Customer,
    Supplier,
}

impl PartyKind {
    /// Record name used in the canonical text form.
    pub fn record_name(self) -> &'static str {
        match self {
            PartyKind::Customer => "Customer",
            PartyKind::Supplier => "Supplier",
        }
    }
}

impl core::fmt::Display for PartyKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PartyKind::Customer => f.write_str("customer"),
            PartyKind::Supplier => f.write_str("supplier"),
        }
    }
}

impl FromStr for PartyKind {
    type Err = DomainError;

    /// Case-insensitive: `customer`, `Customer` and `CUSTOMER` are equivalent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(PartyKind::Customer),
            "supplier" => Ok(PartyKind::Supplier),
            other => Err(DomainError::validation(format!(
                "party kind must be customer or supplier, got {other:?}"
            ))),
        }
    }
}

/// A registered customer or supplier.
///
/// For suppliers `city` is the origin city that orders ship from.
/// Parties are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    kind: PartyKind,
    id: PartyId,
    name: String,
    city: String,
    address: String,
}

impl Party {
    /// Build a party from a raw id. Negative ids fail with `InvalidId`.
    pub fn new(
        kind: PartyKind,
        id: i64,
        name: impl Into<String>,
        city: impl Into<String>,
        address: impl Into<String>,
    ) -> DomainResult<Self> {
        let id = PartyId::new(id).map_err(|_| {
            DomainError::invalid_id(format!("{} id {id} must be non negative", kind))
        })?;
        Ok(Self::with_id(kind, id, name, city, address))
    }

    pub fn customer(
        id: i64,
        name: impl Into<String>,
        city: impl Into<String>,
        address: impl Into<String>,
    ) -> DomainResult<Self> {
        Self::new(PartyKind::Customer, id, name, city, address)
    }

    pub fn supplier(
        id: i64,
        name: impl Into<String>,
        city: impl Into<String>,
        address: impl Into<String>,
    ) -> DomainResult<Self> {
        Self::new(PartyKind::Supplier, id, name, city, address)
    }

    pub fn with_id(
        kind: PartyKind,
        id: PartyId,
        name: impl Into<String>,
        city: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            id,
            name: name.into(),
            city: city.into(),
            address: address.into(),
        }
    }

    pub fn kind(&self) -> PartyKind {
        self.kind
    }

    pub fn id_typed(&self) -> PartyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_customer(&self) -> bool {
        self.kind == PartyKind::Customer
    }

    pub fn is_supplier(&self) -> bool {
        self.kind == PartyKind::Supplier
    }
}

impl Entity for Party {
    type Id = PartyId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn record_name(&self) -> &'static str {
        self.kind.record_name()
    }
}

impl core::fmt::Display for Party {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}(id={}, name='{}', city='{}', address='{}')",
            self.kind.record_name(),
            self.id,
            self.name,
            self.city,
            self.address
        )
    }
}
