//! Pure detectors over in-memory tables.
//!
//! Both detectors hold only their thresholds and never mutate the input, so
//! one instance can be shared across concurrent requests.

pub mod ghost_beneficiary;
pub mod migration_pulse;

pub use ghost_beneficiary::{GhostBeneficiaryDetector, GhostThresholds};
pub use migration_pulse::MigrationPulseRanker;
