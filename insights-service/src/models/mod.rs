//! Domain models for the insights service.

pub mod chat;
pub mod demographic;
pub mod enrolment;

pub use chat::{ChatQuery, ChatResponse};
pub use demographic::{DemographicUpdateRecord, TrendHub};
pub use enrolment::{AnomalyResult, EnrolmentRecord};

use serde::{Deserialize, Deserializer};

/// Reads a count cell, tolerating surrounding whitespace. String columns are
/// kept verbatim, so only counts go through this.
pub(crate) fn trimmed_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim().parse().map_err(|e| {
        serde::de::Error::custom(format!("invalid count {:?}: {}", raw, e))
    })
}
