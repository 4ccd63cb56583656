// src/routes.rs

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
    trace::TraceLayer,
};

use crate::{
    handlers::{answers, participant},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Participant and answer routes share the store from `AppState`.
/// * `/answers/question/{n}` wins over `/answers/{participant_id}` for the
///   literal `question` segment.
/// * `/` and `/favicon.ico` are served straight from `config.static_dir`.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    // Any page may post survey answers.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/favicon.ico", ServeFile::new(static_dir.join("favicon.ico")))
        .route("/participant", post(participant::register))
        .route("/participant/list", get(participant::list_participants))
        .route("/participant/{id}/answers", post(answers::submit_answers))
        .route(
            "/answers/{participant_id}",
            get(answers::get_participant_answers),
        )
        .route("/answers/question/{n}", get(answers::get_question_answers))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
