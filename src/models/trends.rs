// Derived trend values consumed by presentation.

use serde::{Deserialize, Serialize};

/// Charge-behavior category for one cycle. Serializes and displays as the
/// dashboard strings ("Deep Discharge" / "Normal").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargingPattern {
    #[serde(rename = "Deep Discharge")]
    DeepDischarge,
    Normal,
}

impl std::fmt::Display for ChargingPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ChargingPattern::DeepDischarge => "Deep Discharge",
            ChargingPattern::Normal => "Normal",
        })
    }
}

/// Whole-collection rollup shown under the trend charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub cycles: usize,
    pub average_temperature: f64,
    pub total_distance: f64,
}
