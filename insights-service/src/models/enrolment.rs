//! Enrolment rows and the anomalies derived from them.

use super::trimmed_count;
use serde::{Deserialize, Serialize};

/// One enrolment row per geographic unit, as read from the enrolment table.
///
/// Columns beyond the five below (dates, pincodes) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolmentRecord {
    pub state: String,
    pub district: String,
    #[serde(deserialize_with = "trimmed_count")]
    pub age_0_5: u64,
    #[serde(deserialize_with = "trimmed_count")]
    pub age_5_17: u64,
    #[serde(deserialize_with = "trimmed_count")]
    pub age_18_greater: u64,
}

impl EnrolmentRecord {
    /// Sum of all three age bands.
    pub fn total(&self) -> u64 {
        self.age_0_5
            .saturating_add(self.age_5_17)
            .saturating_add(self.age_18_greater)
    }

    /// Share of enrolments aged 0-5, or `None` for an empty row.
    pub fn ratio(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.age_0_5 as f64 / total as f64),
        }
    }
}

/// A flagged row: `{state, district, ratio}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyResult {
    pub state: String,
    pub district: String,
    pub ratio: f64,
}
