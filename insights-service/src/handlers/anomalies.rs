use crate::models::AnomalyResult;
use crate::services::metrics::{record_findings, record_rows_loaded};
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// `GET /api/anomalies/ghost-beneficiary`
pub async fn ghost_beneficiaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnomalyResult>>, AppError> {
    let records = state.datasets.load_enrolment().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load enrolment dataset");
        e
    })?;

    let anomalies = state.ghost_detector.detect(&records);

    record_rows_loaded("enrolment", records.len());
    record_findings("ghost_beneficiary", anomalies.len());
    tracing::info!(
        records = records.len(),
        anomalies = anomalies.len(),
        "Ghost beneficiary scan completed"
    );

    Ok(Json(anomalies))
}
