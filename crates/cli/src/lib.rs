//! `matamazon` command-line front end.
//!
//! Parses arguments, replays a command log against a [`MatamazonSystem`]
//! and writes the exports. All business rules live in the catalog crates.
//!
//! [`MatamazonSystem`]: matamazon_catalog::MatamazonSystem

pub mod app;
pub mod command;
pub mod config;
pub mod replay;

pub use command::Command;
pub use config::{Args, Config, FAILURE_MESSAGE, USAGE};
pub use replay::{ReplayError, replay};
