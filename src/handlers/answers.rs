// src/handlers/answers.rs

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    error::AppError,
    models::answer::{SubmitAnswersRequest, answers_to_question},
    store::SurveyStore,
};

/// Stores a participant's answers, replacing any earlier submission.
///
/// The id is not checked against the participant list.
pub async fn submit_answers(
    State(store): State<Arc<dyn SurveyStore>>,
    Path(participant_id): Path<i64>,
    Json(req): Json<SubmitAnswersRequest>,
) -> Result<impl IntoResponse, AppError> {
    store.put_answers(participant_id, req.answers).await?;

    Ok(Json(json!({
        "message": format!("Answers recorded for participant {}", participant_id)
    })))
}

/// Returns `{"<id>": [answers]}` for one participant.
///
/// An empty submission is reported the same way as no submission: 404.
pub async fn get_participant_answers(
    State(store): State<Arc<dyn SurveyStore>>,
    Path(participant_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let answers = store
        .answers_for(participant_id)
        .await?
        .filter(|answers| !answers.is_empty())
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No answers found for participant {}",
                participant_id
            ))
        })?;

    Ok(Json(BTreeMap::from([(participant_id, answers)])))
}

/// Returns every participant's answer to the 1-based question `n`,
/// skipping participants who did not answer that far.
pub async fn get_question_answers(
    State(store): State<Arc<dyn SurveyStore>>,
    Path(question): Path<usize>,
) -> Result<impl IntoResponse, AppError> {
    let sheet = store.answer_sheet().await?;

    let answers = answers_to_question(&sheet, question).ok_or_else(|| {
        AppError::BadRequest("Question index must be 1 or greater".to_string())
    })?;

    Ok(Json(answers))
}
