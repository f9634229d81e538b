//! Catalog snapshots and the orders-by-city report.
//!
//! Snapshots are plain text, one canonical record per line, customers first,
//! then suppliers, then products. Orders are never part of a snapshot.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::record::{CatalogRecord, parse_record};
use crate::system::MatamazonSystem;

impl MatamazonSystem {
    /// Write the catalog snapshot to `sink`.
    pub fn export_catalog<W: Write>(&self, mut sink: W) -> io::Result<()> {
        for party in self.customers().chain(self.suppliers()) {
            writeln!(sink, "{party}")?;
        }
        for product in self.products() {
            writeln!(sink, "{product}")?;
        }
        sink.flush()
    }

    /// Write the catalog snapshot to a file, creating or truncating it.
    pub fn export_catalog_to_path(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.export_catalog(BufWriter::new(file))?;
        info!(path = %path.display(), "catalog snapshot written");
        Ok(())
    }

    /// Orders grouped by origin city, each as its canonical line.
    ///
    /// Orders whose product or supplier no longer exists are skipped.
    pub fn orders_by_city(&self) -> BTreeMap<String, Vec<String>> {
        let mut by_city: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for order in self.orders() {
            match self.origin_city(order) {
                Some(city) => by_city
                    .entry(city.to_string())
                    .or_default()
                    .push(order.to_string()),
                None => debug!(order_id = %order.id_typed(), "order has no origin city; skipped"),
            }
        }
        by_city
    }

    /// Write the orders-by-city report to `sink` as a JSON object.
    pub fn export_orders_by_city<W: Write>(&self, mut sink: W) -> Result<(), CatalogError> {
        let report = self.orders_by_city();
        let mut ser = serde_json::Serializer::with_formatter(&mut sink, SpacedFormatter);
        report.serialize(&mut ser)?;
        sink.flush()?;
        Ok(())
    }

    /// Write the orders-by-city report to a file, creating or truncating it.
    pub fn export_orders_by_city_to_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.export_orders_by_city(BufWriter::new(file))?;
        info!(path = %path.display(), "orders report written");
        Ok(())
    }
}

/// Rebuild a store from snapshot lines.
///
/// Lines that are not records are skipped. A record with invalid values
/// aborts the load. Lines may come in any order (a product may precede its
/// supplier); the last line for an id wins.
pub fn load_catalog<R: BufRead>(source: R) -> Result<MatamazonSystem, CatalogError> {
    let mut parties = Vec::new();
    let mut products = Vec::new();

    for (line_no, line) in source.lines().enumerate() {
        let line = line?;
        match parse_record(&line)? {
            Some(CatalogRecord::Party(party)) => parties.push(party),
            Some(CatalogRecord::Product(product)) => products.push(product),
            None if line.trim().is_empty() => {}
            None => debug!(line = line_no + 1, "skipping unrecognized snapshot line"),
        }
    }

    let mut store = MatamazonSystem::new();
    for party in parties {
        store.restore_party(party);
    }
    for product in products {
        store.restore_product(product);
    }
    Ok(store)
}

/// Open a snapshot file and rebuild a store from it.
pub fn load_catalog_from_path(path: impl AsRef<Path>) -> Result<MatamazonSystem, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let store = load_catalog(BufReader::new(file))?;
    info!(
        path = %path.display(),
        customers = store.customers().count(),
        suppliers = store.suppliers().count(),
        products = store.products().count(),
        "catalog snapshot loaded"
    );
    Ok(store)
}

/// JSON layout with `", "` between items and `": "` after keys.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}
