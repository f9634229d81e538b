use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use matamazon_core::{
    CustomerRef, DomainError, DomainResult, Entity, OrderId, PartyId, Price, ProductId,
};
use matamazon_parties::{Party, PartyKind};
use matamazon_products::Product;
use matamazon_sales::{Order, PlaceOrderOutcome};

use crate::record::RecordKind;

/// In-memory catalog store.
///
/// Holds customers, suppliers, products and orders keyed by id, plus the
/// order id counter. Invariants kept by every mutation:
///
/// - customer and supplier ids never collide
/// - a product is only added or updated while its supplier exists
/// - stock never goes negative
/// - customers, suppliers and products referenced by a live order stay put
/// - order ids are never reused, even after removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatamazonSystem {
    customers: BTreeMap<PartyId, Party>,
    suppliers: BTreeMap<PartyId, Party>,
    products: BTreeMap<ProductId, Product>,
    orders: BTreeMap<OrderId, Order>,
    next_order_id: OrderId,
}

impl Default for MatamazonSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MatamazonSystem {
    pub fn new() -> Self {
        Self {
            customers: BTreeMap::new(),
            suppliers: BTreeMap::new(),
            products: BTreeMap::new(),
            orders: BTreeMap::new(),
            next_order_id: OrderId::FIRST,
        }
    }

    /// Register a customer or supplier.
    ///
    /// Fails with `InvalidId` when the id is already used by any party, of
    /// either kind.
    pub fn register(&mut self, party: Party) -> DomainResult<()> {
        let id = party.id();
        if self.customers.contains_key(&id) || self.suppliers.contains_key(&id) {
            return Err(DomainError::invalid_id(format!(
                "{} id {id} is already taken",
                party.kind()
            )));
        }

        debug!(record = party.record_name(), %id, "registered party");
        match party.kind() {
            PartyKind::Customer => self.customers.insert(id, party),
            PartyKind::Supplier => self.suppliers.insert(id, party),
        };
        Ok(())
    }

    /// Add a new product or replace an existing one.
    ///
    /// The supplier must exist, and an existing product keeps its supplier:
    /// both violations fail with `InvalidId` and leave the store unchanged.
    pub fn upsert_product(&mut self, product: Product) -> DomainResult<()> {
        if !self.suppliers.contains_key(&product.supplier_id()) {
            return Err(DomainError::invalid_id(format!(
                "product {} names unknown supplier {}",
                product.id(),
                product.supplier_id()
            )));
        }

        if let Some(existing) = self.products.get(&product.id()) {
            if existing.supplier_id() != product.supplier_id() {
                return Err(DomainError::invalid_id(format!(
                    "product {} belongs to supplier {}, not {}",
                    product.id(),
                    existing.supplier_id(),
                    product.supplier_id()
                )));
            }
            debug!(product_id = %product.id(), "updated product");
        } else {
            debug!(product_id = %product.id(), "added product");
        }

        self.products.insert(product.id(), product);
        Ok(())
    }

    /// Place an order for `quantity` units of a product.
    ///
    /// Unknown products and short stock are reported through the outcome and
    /// change nothing. `customer_id` is not checked against registered
    /// customers. Zero quantity fails with `Validation`.
    pub fn place_order(
        &mut self,
        customer_id: impl Into<CustomerRef>,
        product_id: ProductId,
        quantity: u64,
    ) -> DomainResult<PlaceOrderOutcome> {
        let customer_id = customer_id.into();
        let Some(product) = self.products.get_mut(&product_id) else {
            info!(%product_id, "order refused: unknown product");
            return Ok(PlaceOrderOutcome::ProductNotFound);
        };
        if !product.can_fulfil(quantity) {
            info!(
                %product_id,
                requested = quantity,
                in_stock = product.quantity(),
                "order refused: insufficient stock"
            );
            return Ok(PlaceOrderOutcome::InsufficientStock);
        }

        let order = Order::priced(
            self.next_order_id,
            customer_id,
            product_id,
            quantity,
            product.price(),
        )?;
        product.take_stock(quantity)?;

        let order_id = order.id();
        debug!(%order_id, %customer_id, %product_id, quantity, total = %order.total_price(), "order accepted");
        self.orders.insert(order_id, order);
        self.next_order_id = order_id.next();
        Ok(PlaceOrderOutcome::Accepted(order_id))
    }

    /// Remove a record by kind and raw id.
    ///
    /// Removing an order returns its quantity and restores that much stock to
    /// its product, if the product still exists. Unknown ids are a no-op.
    /// Customers, suppliers and products with dependent orders fail with
    /// `DependencyExists`.
    pub fn remove(&mut self, kind: RecordKind, id: i64) -> DomainResult<Option<u64>> {
        if id < 0 {
            return Err(DomainError::invalid_id(format!(
                "{kind} id {id} must be non negative"
            )));
        }

        match kind {
            RecordKind::Order => Ok(self.remove_order(OrderId::new(id)?)),
            RecordKind::Customer => {
                let id = PartyId::new(id)?;
                if let Some(order) = self
                    .orders
                    .values()
                    .find(|o| o.customer_id().refers_to(id))
                {
                    return Err(self.blocked(kind, id, order));
                }
                self.customers.remove(&id);
                debug!(%id, "removed customer");
                Ok(None)
            }
            RecordKind::Supplier => {
                let id = PartyId::new(id)?;
                if let Some(order) = self.orders.values().find(|o| {
                    self.products
                        .get(&o.product_id())
                        .is_some_and(|p| p.supplier_id() == id)
                }) {
                    return Err(self.blocked(kind, id, order));
                }
                self.suppliers.remove(&id);
                debug!(%id, "removed supplier");
                Ok(None)
            }
            RecordKind::Product => {
                let id = ProductId::new(id)?;
                if let Some(order) = self.orders.values().find(|o| o.product_id() == id) {
                    return Err(self.blocked(kind, id, order));
                }
                self.products.remove(&id);
                debug!(%id, "removed product");
                Ok(None)
            }
        }
    }

    fn remove_order(&mut self, id: OrderId) -> Option<u64> {
        let order = self.orders.remove(&id)?;
        if let Some(product) = self.products.get_mut(&order.product_id()) {
            product.restock(order.quantity());
        }
        debug!(order_id = %id, restored = order.quantity(), "removed order");
        Some(order.quantity())
    }

    fn blocked(&self, kind: RecordKind, id: impl core::fmt::Display, order: &Order) -> DomainError {
        warn!(%kind, %id, order_id = %order.id(), "removal blocked by live order");
        DomainError::dependency_exists(format!(
            "cannot remove {kind} {id}: order {} still depends on it",
            order.id()
        ))
    }

    /// In-stock products whose name contains `query` and whose price is at
    /// most `max_price`, cheapest first. Equal prices keep id order.
    pub fn search(&self, query: &str, max_price: Option<Price>) -> Vec<&Product> {
        let mut found: Vec<&Product> = self
            .products
            .values()
            .filter(|p| p.matches(query, max_price))
            .collect();
        found.sort_by_key(|p| p.price());
        found
    }

    pub fn customer(&self, id: PartyId) -> Option<&Party> {
        self.customers.get(&id)
    }

    pub fn supplier(&self, id: PartyId) -> Option<&Party> {
        self.suppliers.get(&id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    pub fn customers(&self) -> impl Iterator<Item = &Party> {
        self.customers.values()
    }

    pub fn suppliers(&self) -> impl Iterator<Item = &Party> {
        self.suppliers.values()
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// The id the next accepted order will receive.
    pub fn next_order_id(&self) -> OrderId {
        self.next_order_id
    }

    /// Origin city of an order: the city of its product's supplier.
    pub fn origin_city(&self, order: &Order) -> Option<&str> {
        let product = self.products.get(&order.product_id())?;
        let supplier = self.suppliers.get(&product.supplier_id())?;
        Some(supplier.city())
    }

    /// Insert a party from a snapshot. The party replaces any earlier party
    /// with the same id, of either kind.
    pub(crate) fn restore_party(&mut self, party: Party) {
        let id = party.id();
        let (own, other) = match party.kind() {
            PartyKind::Customer => (&mut self.customers, &mut self.suppliers),
            PartyKind::Supplier => (&mut self.suppliers, &mut self.customers),
        };
        if let Some(replaced) = other.remove(&id) {
            debug!(
                %id,
                replaced = replaced.record_name(),
                "restored party replaces one of the other kind"
            );
        }
        own.insert(id, party);
    }

    /// Insert a product from a snapshot, replacing any product with the same id.
    pub(crate) fn restore_product(&mut self, product: Product) {
        self.products.insert(product.id(), product);
    }
}
