//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{ParticipantDto, ParticipantListDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current participants in registration order
pub async fn list_participants(State(state): State<Arc<AppState>>) -> Json<ParticipantListDto> {
    let snapshot = state.registry.snapshot().await;

    // Domain Model から DTO への変換
    let participants: Vec<ParticipantDto> = snapshot
        .iter()
        .map(|connection| ParticipantDto::from(connection.as_ref()))
        .collect();

    Json(ParticipantListDto {
        count: participants.len(),
        participants,
    })
}
