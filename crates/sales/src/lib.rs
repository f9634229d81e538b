//! Sales domain module (orders placed against the catalog).
//!
//! This crate contains the order record and the outcome of placing an order,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod order;

pub use order::{Order, PlaceOrderOutcome};
