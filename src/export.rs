// Point-in-time export: one JSON document per run, named by device and
// capture time. Not an append log.

use crate::models::CycleSnapshot;
use crate::snapshot_repo::JsonMap;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Top-level document shape; the key names are part of the export contract.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub summary: JsonMap,
    pub latest_snapshot: Option<CycleSnapshot>,
    pub recent_snapshots: Vec<CycleSnapshot>,
}

/// "battery_data_{imei}_{YYYYmmdd_HHMMSS}.json"
pub fn export_filename(imei: &str, captured_at: DateTime<Local>) -> String {
    format!(
        "battery_data_{}_{}.json",
        imei,
        captured_at.format("%Y%m%d_%H%M%S")
    )
}

/// Write the document under `dir`; returns the path written.
pub fn write_export(dir: &Path, imei: &str, document: &ExportDocument) -> anyhow::Result<PathBuf> {
    let path = dir.join(export_filename(imei, Local::now()));
    let file = File::create(&path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), document)?;
    Ok(path)
}
