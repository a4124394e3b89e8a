use crate::models::TrendHub;
use crate::services::metrics::{record_findings, record_rows_loaded};
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// `GET /api/trends/migration-pulse`
pub async fn migration_pulse(
    State(state): State<AppState>,
) -> Result<Json<Vec<TrendHub>>, AppError> {
    let records = state.datasets.load_demographic_updates().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load demographic update dataset");
        e
    })?;

    let hubs = state.migration_ranker.rank(&records);

    record_rows_loaded("demographic", records.len());
    record_findings("migration_pulse", hubs.len());
    tracing::info!(
        records = records.len(),
        hubs = hubs.len(),
        "Migration pulse ranking completed"
    );

    Ok(Json(hubs))
}
