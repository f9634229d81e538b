use serde::{Deserialize, Serialize};

use matamazon_core::{DomainError, DomainResult, Entity, PartyId, Price, ProductId};

/// A catalog product and its current stock level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Price,
    supplier_id: PartyId,
    quantity: u64,
}

impl Product {
    /// Build a product from raw values.
    ///
    /// Negative id, supplier id or quantity fail with `InvalidId`; a negative
    /// price fails with `InvalidPrice`.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        price: Price,
        supplier_id: i64,
        quantity: i64,
    ) -> DomainResult<Self> {
        let id = ProductId::new(id)?;
        let supplier_id = PartyId::new(supplier_id)?;
        let quantity = u64::try_from(quantity).map_err(|_| {
            DomainError::invalid_id(format!("product {id} quantity {quantity} must be non negative"))
        })?;
        Ok(Self::with_id(id, name, price, supplier_id, quantity))
    }

    pub fn with_id(
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        supplier_id: PartyId,
        quantity: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            supplier_id,
            quantity,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn supplier_id(&self) -> PartyId {
        self.supplier_id
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }

    pub fn can_fulfil(&self, quantity: u64) -> bool {
        quantity <= self.quantity
    }

    /// Search predicate: in stock, name contains `query`, price within `max_price`.
    pub fn matches(&self, query: &str, max_price: Option<Price>) -> bool {
        self.is_in_stock()
            && self.name.contains(query)
            && max_price.is_none_or(|max| self.price <= max)
    }

    /// Remove `quantity` units from stock. Stock never goes negative.
    pub fn take_stock(&mut self, quantity: u64) -> DomainResult<()> {
        if !self.can_fulfil(quantity) {
            return Err(DomainError::validation(format!(
                "product {} has {} in stock, {} requested",
                self.id, self.quantity, quantity
            )));
        }
        self.quantity -= quantity;
        Ok(())
    }

    /// Return `quantity` units to stock.
    pub fn restock(&mut self, quantity: u64) {
        self.quantity = self.quantity.saturating_add(quantity);
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn record_name(&self) -> &'static str {
        "Product"
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Product(id={}, name='{}', price={}, supplier_id={}, quantity={})",
            self.id, self.name, self.price, self.supplier_id, self.quantity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cushion() -> Product {
        Product::new(101, "Harry Potter Cushion", "29.99".parse().unwrap(), 42, 555).unwrap()
    }

    #[test]
    fn prints_canonical_line() {
        assert_eq!(
            cushion().to_string(),
            "Product(id=101, name='Harry Potter Cushion', price=29.99, supplier_id=42, quantity=555)"
        );
    }

    #[test]
    fn negative_fields_are_rejected_with_the_right_kind() {
        let price = Price::from(1);
        assert!(Product::new(-1, "x", price, 1, 1).unwrap_err().is_invalid_id());
        assert!(Product::new(1, "x", price, -1, 1).unwrap_err().is_invalid_id());
        assert!(Product::new(1, "x", price, 1, -1).unwrap_err().is_invalid_id());
        assert!("-0.5".parse::<Price>().unwrap_err().is_invalid_price());
    }

    #[test]
    fn take_stock_refuses_to_go_negative() {
        let mut product = Product::new(1, "Mug", Price::from(5), 1, 2).unwrap();
        product.take_stock(2).unwrap();
        assert_eq!(product.quantity(), 0);
        assert!(!product.is_in_stock());

        let err = product.take_stock(1).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(product.quantity(), 0);

        product.restock(3);
        assert_eq!(product.quantity(), 3);
    }

    #[test]
    fn matches_applies_stock_name_and_price() {
        let product = cushion();
        assert!(product.matches("", None));
        assert!(product.matches("Potter", None));
        assert!(!product.matches("potter", None));
        assert!(product.matches("Cushion", Some("29.99".parse().unwrap())));
        assert!(!product.matches("Cushion", Some(Price::from(29))));

        let empty = Product::new(2, "Harry Potter Wand", Price::from(1), 42, 0).unwrap();
        assert!(!empty.matches("", None));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: take/restock keeps stock conserved and non-negative.
            #[test]
            fn stock_is_conserved(
                initial in 0u64..1_000,
                requests in proptest::collection::vec(0u64..200, 0..20)
            ) {
                let mut product = Product::with_id(
                    ProductId::from_u64(1),
                    "Widget",
                    Price::from(3),
                    PartyId::from_u64(1),
                    initial,
                );
                let mut taken = 0u64;
                for request in requests {
                    if product.take_stock(request).is_ok() {
                        taken += request;
                    }
                }
                prop_assert_eq!(product.quantity() + taken, initial);
            }
        }
    }
}
