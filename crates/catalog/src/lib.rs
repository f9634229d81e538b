//! Catalog store: customers, suppliers, products and orders held in memory,
//! with referential checks across the four collections.
//!
//! The store is single-threaded and synchronous. Callers that need shared
//! access wrap it themselves (e.g. one mutex around the whole store).

pub mod error;
pub mod export;
pub mod record;
pub mod system;

pub use error::CatalogError;
pub use export::{load_catalog, load_catalog_from_path};
pub use record::{CatalogRecord, RecordKind, parse_record};
pub use system::MatamazonSystem;
