//! `matamazon-core`: domain building blocks shared by every crate.
//!
//! This crate contains **pure domain** primitives (no IO).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CustomerRef, OrderId, PartyId, ProductId};
pub use value_object::Price;
