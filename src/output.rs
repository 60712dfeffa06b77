use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::models::{HotelRecord, SearchQuery};

/// `<dir>/<city>_hotels_data.csv`
pub fn csv_path(dir: &Path, query: &SearchQuery) -> PathBuf {
    dir.join(format!("{}.csv", query.output_stem()))
}

pub fn json_path(dir: &Path, query: &SearchQuery) -> PathBuf {
    dir.join(format!("{}.json", query.output_stem()))
}

/// Write `records` as CSV with a header row, which is present even when there
/// are no records.
pub fn write_csv(path: &Path, records: &[HotelRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(HotelRecord::COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!("💾 Saved {} hotels to {}", records.len(), path.display());
    Ok(())
}

pub async fn write_json(path: &Path, records: &[HotelRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("💾 Saved {} hotels to {}", records.len(), path.display());
    Ok(())
}
