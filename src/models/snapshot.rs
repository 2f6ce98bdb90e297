// Cycle snapshot records as decoded from the snapshot service.

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

/// Minutes spent per temperature bucket, keyed by range label (e.g. "25..30").
/// Bucket order is whatever the service sent.
pub type TempDistribution = LinkedHashMap<String, f64>;

/// Warnings and protections raised during one cycle, in service order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertDetails {
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub protections: Vec<String>,
}

/// One completed charge/discharge cycle for a device.
///
/// Every field the service may omit is defaultable at decode time: numeric
/// fields decode to 0, SOH fields decode to 100 (a battery starts at full
/// health, not zero). `cycle_number` stays optional; the positional fallback
/// used for chart labels lives in the `present` module, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSnapshot {
    pub cycle_number: Option<u64>,
    pub cycle_start_time: Option<String>,
    pub cycle_end_time: Option<String>,
    #[serde(default)]
    pub cycle_duration_hours: f64,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub average_speed: f64,
    #[serde(default)]
    pub max_speed: f64,
    #[serde(default)]
    pub data_points_count: u64,
    #[serde(default)]
    pub average_temperature: f64,
    #[serde(default)]
    pub temperature_dist_5deg: TempDistribution,
    #[serde(default)]
    pub temperature_dist_10deg: TempDistribution,
    #[serde(default)]
    pub temperature_dist_15deg: TempDistribution,
    #[serde(default)]
    pub temperature_dist_20deg: TempDistribution,
    #[serde(default)]
    pub average_soc: f64,
    #[serde(default)]
    pub min_soc: f64,
    #[serde(default)]
    pub max_soc: f64,
    #[serde(default = "full_health")]
    pub average_soh: f64,
    #[serde(default = "full_health")]
    pub min_soh: f64,
    #[serde(default)]
    pub soh_drop: f64,
    #[serde(default)]
    pub voltage_avg: f64,
    #[serde(default)]
    pub voltage_min: f64,
    #[serde(default)]
    pub voltage_max: f64,
    #[serde(default)]
    pub current_avg: f64,
    #[serde(default)]
    pub charging_instances_count: u64,
    #[serde(default)]
    pub average_charge_start_soc: f64,
    #[serde(default)]
    pub alert_details: AlertDetails,
}

fn full_health() -> f64 {
    100.0
}

impl Default for CycleSnapshot {
    /// Same values an all-fields-absent record decodes to.
    fn default() -> Self {
        CycleSnapshot {
            cycle_number: None,
            cycle_start_time: None,
            cycle_end_time: None,
            cycle_duration_hours: 0.0,
            total_distance: 0.0,
            average_speed: 0.0,
            max_speed: 0.0,
            data_points_count: 0,
            average_temperature: 0.0,
            temperature_dist_5deg: TempDistribution::new(),
            temperature_dist_10deg: TempDistribution::new(),
            temperature_dist_15deg: TempDistribution::new(),
            temperature_dist_20deg: TempDistribution::new(),
            average_soc: 0.0,
            min_soc: 0.0,
            max_soc: 0.0,
            average_soh: full_health(),
            min_soh: full_health(),
            soh_drop: 0.0,
            voltage_avg: 0.0,
            voltage_min: 0.0,
            voltage_max: 0.0,
            current_avg: 0.0,
            charging_instances_count: 0,
            average_charge_start_soc: 0.0,
            alert_details: AlertDetails::default(),
        }
    }
}

/// Bucket-width selector for the four temperature distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempGranularity {
    Deg5,
    Deg10,
    Deg15,
    Deg20,
}

impl TempGranularity {
    /// Key as used by the service and the dashboard selector (e.g. "5deg").
    pub fn key(self) -> &'static str {
        match self {
            TempGranularity::Deg5 => "5deg",
            TempGranularity::Deg10 => "10deg",
            TempGranularity::Deg15 => "15deg",
            TempGranularity::Deg20 => "20deg",
        }
    }

    /// Parse from a granularity key (e.g. "10deg").
    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "5deg" => Some(TempGranularity::Deg5),
            "10deg" => Some(TempGranularity::Deg10),
            "15deg" => Some(TempGranularity::Deg15),
            "20deg" => Some(TempGranularity::Deg20),
            _ => None,
        }
    }

    /// The matching distribution on a snapshot.
    pub fn distribution(self, snapshot: &CycleSnapshot) -> &TempDistribution {
        match self {
            TempGranularity::Deg5 => &snapshot.temperature_dist_5deg,
            TempGranularity::Deg10 => &snapshot.temperature_dist_10deg,
            TempGranularity::Deg15 => &snapshot.temperature_dist_15deg,
            TempGranularity::Deg20 => &snapshot.temperature_dist_20deg,
        }
    }
}
