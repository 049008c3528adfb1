//! Write functions - materialize the aggregate table as CSV

use crate::pipeline::types::AggregateRow;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Write aggregate rows to a headered CSV file, preserving the order the
/// aggregator produced them in.
pub fn write_aggregates(path: &Path, rows: &[AggregateRow]) -> Result<()> {
    info!("Writing {} aggregate rows to {:?}", rows.len(), path);

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create output CSV {path:?}"))?;

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!("Write complete: {} rows", rows.len());

    Ok(())
}
