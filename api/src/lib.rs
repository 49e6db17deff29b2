use std::{env, sync::Arc, time::Duration};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::signal;
use tracing::{info, warn};

use crate::core::app_state::AppState;
use crate::error_handler::AppError;
use crate::middleware_layer::json_extractor::json_error_mapper;
use crate::routes::{
    assist::assist_route::assist_route,
    health_route::health_route,
    page_route::index_page,
    system_prompt_route::{get_system_prompt, put_system_prompt},
};

/// Builds the state, probes the model backend, and serves the API.
///
/// Listens on `API_ADDRESS` (default `127.0.0.1:8080`). A backend that is
/// not ready yet only logs a warning; requests will keep retrying at the
/// completion boundary.
pub async fn start() -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".into());

    let state = Arc::new(AppState::from_env()?);

    // Startup probe so a cold Ollama shows up in the logs, not as a failed
    // first request.
    let status = state
        .health
        .wait_until_ready(&state.llm_cfg, 3, Duration::from_secs(2))
        .await;
    if status.ok {
        info!(endpoint = %status.endpoint, model = %status.model, "model backend ready");
    } else {
        warn!(message = %status.message, "model backend not ready, continuing anyway");
    }

    let app = Router::new()
        .route("/", get(index_page))
        .route("/assist", post(assist_route))
        .route("/health", get(health_route))
        .route(
            "/system_prompt",
            get(get_system_prompt).put(put_system_prompt),
        )
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!(%host_url, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
