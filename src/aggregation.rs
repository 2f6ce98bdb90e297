// Derived trend metrics over a fetched snapshot collection.
// Pure functions, no I/O; empty and single-element collections are valid
// degenerate inputs.

use crate::models::{ChargingPattern, CollectionSummary, CycleSnapshot, TempGranularity};

/// SOC consumed by one cycle (max - min), in percentage points.
pub fn soc_consumed(snapshot: &CycleSnapshot) -> f64 {
    snapshot.max_soc - snapshot.min_soc
}

/// SOC consumed per cycle, elementwise across the collection.
pub fn soc_consumed_series(snapshots: &[CycleSnapshot]) -> Vec<f64> {
    snapshots.iter().map(soc_consumed).collect()
}

/// Distance per SOC percentage point, per cycle. A cycle that consumed no
/// charge divides by 1 instead of 0 (yielding the raw distance); any
/// non-finite result clamps to 0.
pub fn efficiency_series(snapshots: &[CycleSnapshot]) -> Vec<f64> {
    snapshots
        .iter()
        .map(|s| {
            let consumed = soc_consumed(s);
            let divisor = if consumed == 0.0 { 1.0 } else { consumed };
            let efficiency = s.total_distance / divisor;
            if efficiency.is_finite() { efficiency } else { 0.0 }
        })
        .collect()
}

/// Voltage swing (max - min) per cycle, elementwise across the collection.
pub fn voltage_range_series(snapshots: &[CycleSnapshot]) -> Vec<f64> {
    snapshots
        .iter()
        .map(|s| s.voltage_max - s.voltage_min)
        .collect()
}

/// Mean voltage swing across the collection; the reference baseline drawn
/// over the stability chart. 0 for an empty collection.
pub fn mean_voltage_range(snapshots: &[CycleSnapshot]) -> f64 {
    mean_f64(&voltage_range_series(snapshots))
}

/// Minutes per temperature bucket at the chosen granularity, in service
/// order, buckets with non-positive minutes dropped. None when no bucket is
/// positive, so the caller renders "no data" instead of an empty chart.
pub fn temperature_profile(
    snapshot: &CycleSnapshot,
    granularity: TempGranularity,
) -> Option<Vec<(String, f64)>> {
    let buckets: Vec<(String, f64)> = granularity
        .distribution(snapshot)
        .iter()
        .filter(|(_, minutes)| **minutes > 0.0)
        .map(|(label, minutes)| (label.clone(), *minutes))
        .collect();
    if buckets.is_empty() { None } else { Some(buckets) }
}

/// "Deep Discharge" when the cycle charged at all and charging typically
/// started below 30% SOC; "Normal" otherwise.
pub fn charging_pattern(snapshot: &CycleSnapshot) -> ChargingPattern {
    if snapshot.charging_instances_count > 0 && snapshot.average_charge_start_soc < 30.0 {
        ChargingPattern::DeepDischarge
    } else {
        ChargingPattern::Normal
    }
}

/// Whole-collection rollup: cycle count, mean temperature, total distance.
pub fn summarize(snapshots: &[CycleSnapshot]) -> CollectionSummary {
    let temperatures: Vec<f64> = snapshots.iter().map(|s| s.average_temperature).collect();
    CollectionSummary {
        cycles: snapshots.len(),
        average_temperature: mean_f64(&temperatures),
        total_distance: snapshots.iter().map(|s| s.total_distance).sum(),
    }
}

fn mean_f64(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<f64>() / (v.len() as f64)
}
