//! HTTP handlers for the insights service.

pub mod anomalies;
pub mod chat;
pub mod health;
pub mod metrics;
pub mod trends;

pub use anomalies::ghost_beneficiaries;
pub use chat::chat;
pub use health::{health_check, readiness_check};
pub use metrics::metrics;
pub use trends::migration_pulse;
