//! Flags enrolment rows where children aged 0-5 make up an implausible
//! share of the total.

use crate::config::{DetectionConfig, DEFAULT_GHOST_CHILD_RATIO, DEFAULT_GHOST_MIN_TOTAL};
use crate::models::{AnomalyResult, EnrolmentRecord};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostThresholds {
    /// Rows must have strictly more enrolments than this to be considered.
    pub min_total: u64,
    /// Rows are flagged when the 0-5 share is strictly above this.
    pub child_ratio: f64,
}

impl Default for GhostThresholds {
    fn default() -> Self {
        Self {
            min_total: DEFAULT_GHOST_MIN_TOTAL,
            child_ratio: DEFAULT_GHOST_CHILD_RATIO,
        }
    }
}

impl From<&DetectionConfig> for GhostThresholds {
    fn from(config: &DetectionConfig) -> Self {
        Self {
            min_total: config.ghost_min_total,
            child_ratio: config.ghost_child_ratio,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GhostBeneficiaryDetector {
    thresholds: GhostThresholds,
}

impl GhostBeneficiaryDetector {
    pub fn new(thresholds: GhostThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> GhostThresholds {
        self.thresholds
    }

    /// Returns the flagged rows in input order.
    ///
    /// The size guard runs before the ratio, so empty rows never reach the
    /// division even when `min_total` is configured as zero.
    pub fn detect(&self, records: &[EnrolmentRecord]) -> Vec<AnomalyResult> {
        records
            .iter()
            .filter(|record| record.total() > self.thresholds.min_total)
            .filter_map(|record| {
                let ratio = record.ratio()?;
                (ratio > self.thresholds.child_ratio).then(|| AnomalyResult {
                    state: record.state.clone(),
                    district: record.district.clone(),
                    ratio,
                })
            })
            .collect()
    }
}
