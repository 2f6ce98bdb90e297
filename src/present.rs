// Display-side helpers: cycle labels, quick-jump lookup, timestamp
// formatting. Positional fallback numbers are a UI convenience and stay out
// of the data model.

use crate::models::CycleSnapshot;
use chrono::{DateTime, NaiveDateTime};

/// Selector/chart labels: the cycle number, or the record's position in the
/// collection for unlabeled records.
pub fn cycle_labels(snapshots: &[CycleSnapshot]) -> Vec<u64> {
    snapshots
        .iter()
        .enumerate()
        .map(|(i, s)| s.cycle_number.unwrap_or(i as u64))
        .collect()
}

/// Index of the first record whose label matches the quick-jump selection.
pub fn resolve_quick_jump(labels: &[u64], selected: u64) -> Option<usize> {
    labels.iter().position(|&label| label == selected)
}

/// Render an ISO-8601 timestamp (with or without offset/'Z') as
/// "YYYY-MM-DD HH:MM". Unparseable values pass through unchanged; absent or
/// placeholder values read "N/A".
pub fn format_datetime(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return "N/A".to_string();
    };
    if raw.is_empty() || raw == "N/A" {
        return "N/A".to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}
