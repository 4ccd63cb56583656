// src/handlers/participant.rs

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    error::AppError,
    models::participant::{CreateParticipantRequest, ParticipantList},
    store::SurveyStore,
};

/// Registers a new participant.
///
/// The id is assigned by the store. Returns 201 Created and the participant.
pub async fn register(
    State(store): State<Arc<dyn SurveyStore>>,
    Json(payload): Json<CreateParticipantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let participant = store.add_participant(payload.name).await?;

    Ok((StatusCode::CREATED, Json(participant)))
}

/// Lists every participant in registration order.
pub async fn list_participants(
    State(store): State<Arc<dyn SurveyStore>>,
) -> Result<impl IntoResponse, AppError> {
    let participants = store.list_participants().await?;

    Ok(Json(ParticipantList { participants }))
}
