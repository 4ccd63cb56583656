// src/main.rs

use survey_backend::config::Config;
use survey_backend::routes;
use survey_backend::state::AppState;
use survey_backend::store::build_store;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment (and .env, if present)
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "survey.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let store = build_store(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_target())
        .await
        .expect("Failed to bind HOST:PORT");
    let addr = listener
        .local_addr()
        .expect("Bound listener has a local address");

    let state = AppState { store, config };

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Survey backend listening on {}", addr);

    // Start the server
    axum::serve(listener, app).await.expect("Server error");
}
