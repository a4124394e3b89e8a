//! Demographic update rows and the district hubs ranked from them.

use super::trimmed_count;
use serde::{Deserialize, Serialize};

/// One demographic update event. Only the adult update count is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicUpdateRecord {
    pub district: String,
    #[serde(deserialize_with = "trimmed_count")]
    pub demo_age_18_greater: u64,
}

/// A district and its summed adult update volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendHub {
    pub district: String,
    pub demo_age_18_greater: u64,
}
