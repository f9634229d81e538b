//! Parties domain module (customers and suppliers).
//!
//! This crate contains the party record and its invariants, implemented purely
//! as deterministic domain logic (no IO, no storage).

pub mod party;

pub use party::{Party, PartyKind};
