use serde::{Deserialize, Serialize};

use matamazon_core::{CustomerRef, DomainError, DomainResult, Entity, OrderId, Price, ProductId};

/// A placed order.
///
/// `total_price` is a snapshot taken at placement; later price changes on the
/// product do not affect it. Orders are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerRef,
    product_id: ProductId,
    quantity: u64,
    total_price: Price,
}

impl Order {
    /// Build an order with an explicit total. Zero quantity is rejected.
    pub fn new(
        id: OrderId,
        customer_id: impl Into<CustomerRef>,
        product_id: ProductId,
        quantity: u64,
        total_price: Price,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation(format!(
                "order {id} quantity must be positive"
            )));
        }
        Ok(Self {
            id,
            customer_id: customer_id.into(),
            product_id,
            quantity,
            total_price,
        })
    }

    /// Build an order whose total is `unit_price * quantity`.
    pub fn priced(
        id: OrderId,
        customer_id: impl Into<CustomerRef>,
        product_id: ProductId,
        quantity: u64,
        unit_price: Price,
    ) -> DomainResult<Self> {
        let total_price = unit_price.times(quantity)?;
        Self::new(id, customer_id, product_id, quantity, total_price)
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerRef {
        self.customer_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn total_price(&self) -> Price {
        self.total_price
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn record_name(&self) -> &'static str {
        "Order"
    }
}

impl core::fmt::Display for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Order(id={}, customer_id={}, product_id={}, quantity={}, total_price={})",
            self.id, self.customer_id, self.product_id, self.quantity, self.total_price
        )
    }
}

/// Routine result of placing an order.
///
/// These are business outcomes, not failures: the store reports them as
/// values and leaves its state untouched unless the order is accepted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceOrderOutcome {
    /// The order was stored under the given id and stock was taken.
    Accepted(OrderId),
    /// No product with the requested id exists.
    ProductNotFound,
    /// The requested quantity exceeds current stock.
    InsufficientStock,
}

impl PlaceOrderOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, PlaceOrderOutcome::Accepted(_))
    }

    pub fn order_id(&self) -> Option<OrderId> {
        match self {
            PlaceOrderOutcome::Accepted(id) => Some(*id),
            _ => None,
        }
    }
}

impl core::fmt::Display for PlaceOrderOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            PlaceOrderOutcome::Accepted(_) => "The order has been accepted in the system",
            PlaceOrderOutcome::ProductNotFound => "The product does not exist in the system",
            PlaceOrderOutcome::InsufficientStock => {
                "The quantity requested for this product is greater than the quantity in stock"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matamazon_core::PartyId;

    #[test]
    fn priced_order_snapshots_total() {
        let order = Order::priced(
            OrderId::FIRST,
            PartyId::from_u64(42),
            ProductId::from_u64(101),
            10,
            "29.99".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(
            order.to_string(),
            "Order(id=1, customer_id=42, product_id=101, quantity=10, total_price=299.9)"
        );
        assert_eq!(order.record_name(), "Order");
    }

    #[test]
    fn customer_number_is_kept_as_given() {
        let order = Order::priced(
            OrderId::FIRST,
            CustomerRef::new(-5),
            ProductId::from_u64(10),
            1,
            Price::from(20),
        )
        .unwrap();
        assert_eq!(order.customer_id().get(), -5);
        assert!(order.to_string().contains("customer_id=-5"));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err = Order::priced(
            OrderId::FIRST,
            PartyId::from_u64(1),
            ProductId::from_u64(1),
            0,
            Price::from(1),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn outcome_messages() {
        let accepted = PlaceOrderOutcome::Accepted(OrderId::FIRST);
        assert!(accepted.is_accepted());
        assert_eq!(accepted.order_id(), Some(OrderId::FIRST));
        assert_eq!(accepted.to_string(), "The order has been accepted in the system");
        assert_eq!(PlaceOrderOutcome::ProductNotFound.order_id(), None);
        assert_eq!(
            PlaceOrderOutcome::InsufficientStock.to_string(),
            "The quantity requested for this product is greater than the quantity in stock"
        );
    }
}
