//! Products domain module (catalog entries and stock levels).
//!
//! This crate contains business rules for products, implemented purely as
//! deterministic domain logic (no IO, no storage).

pub mod product;

pub use product::Product;
