// Domain models (ported from the Python client)

mod snapshot;
mod trends;

pub use snapshot::{AlertDetails, CycleSnapshot, TempDistribution, TempGranularity};
pub use trends::{ChargingPattern, CollectionSummary};
