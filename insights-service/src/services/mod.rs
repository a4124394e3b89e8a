pub mod chat_gateway;
pub mod dataset;
pub mod detectors;
pub mod metrics;
pub mod providers;

pub use chat_gateway::ChatGateway;
pub use dataset::{CsvDatasetSource, DataError, DatasetSource, Table};
pub use detectors::{GhostBeneficiaryDetector, GhostThresholds, MigrationPulseRanker};
