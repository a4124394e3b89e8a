use crate::models::{ChatQuery, ChatResponse};
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use validator::Validate;

/// `POST /api/chat`
pub async fn chat(
    State(state): State<AppState>,
    Json(query): Json<ChatQuery>,
) -> Result<Json<ChatResponse>, AppError> {
    query.validate()?;

    let response = state.chat.answer(&query).await.map_err(|e| {
        tracing::error!(error = %e, language = %query.language, "Chat gateway failed");
        e
    })?;

    tracing::info!(language = %query.language, "Chat answered");
    Ok(Json(response))
}
