//! One end-to-end run: load, replay, export.

use std::fs::File;
use std::io::{BufReader, Write};

use anyhow::Context;
use tracing::info;

use matamazon_catalog::{MatamazonSystem, load_catalog_from_path};

use crate::config::Config;
use crate::replay::replay;

/// Execute a run described by `config`, writing command output (and the
/// orders report, when no output path is set) to `stdout`.
pub fn run<W: Write>(config: &Config, stdout: &mut W) -> anyhow::Result<()> {
    let mut store = match &config.system {
        Some(path) => load_catalog_from_path(path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?,
        None => MatamazonSystem::new(),
    };

    let log = File::open(&config.log)
        .with_context(|| format!("failed to open command log {}", config.log.display()))?;
    let executed = replay(&mut store, BufReader::new(log), &mut *stdout)
        .with_context(|| format!("failed to replay {}", config.log.display()))?;
    info!(executed, orders = store.orders().count(), "command log replayed");

    match &config.output {
        Some(path) => store
            .export_orders_by_city_to_path(path)
            .with_context(|| format!("failed to write orders to {}", path.display()))?,
        None => {
            store.export_orders_by_city(&mut *stdout)?;
            writeln!(stdout)?;
        }
    }

    if let Some(path) = &config.out_system {
        store
            .export_catalog_to_path(path)
            .with_context(|| format!("failed to write catalog to {}", path.display()))?;
    }

    Ok(())
}
