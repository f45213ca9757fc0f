//! HTTP server exposing the start-game and optimal-move services.
//!
//! # Routes
//!
//! - `POST /api/start-game`: `{ "potscount": 6 }` → `{ "pots": [..] }`
//! - `POST /api/optimal-move`: `{ "pots": [..], "level": "HARD" }` → `{ "chosen_index": 1 }`
//! - `GET /health`: liveness check

use crate::config::ServerSettings;
use crate::services::{
    LocalServices, MoveService, OptimalMoveRequest, OptimalMoveResponse, PotService, ServiceError,
    StartGameRequest, StartGameResponse,
};
use axum::{
    Json, Router, extract::State, http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response}, routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::{info, instrument, warn};

/// Error body returned with `400 Bad Request`.
#[derive(Debug, Clone, Serialize)]
struct ErrorBody {
    error: String,
}

/// Rejection from a service handler.
#[derive(Debug)]
struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(error = %self.0, "Rejecting request");
        let body = ErrorBody {
            error: self.0.message,
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Builds the service router.
///
/// # Errors
///
/// Fails if `allowed_origin` is not a valid header value.
#[instrument(skip(services))]
pub fn router(services: Arc<LocalServices>, allowed_origin: &str) -> anyhow::Result<Router> {
    let origin: HeaderValue = allowed_origin.parse()?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    Ok(Router::new()
        .route("/api/start-game", post(start_game))
        .route("/api/optimal-move", post(optimal_move))
        .route("/health", get(health))
        .layer(cors)
        .with_state(services))
}

/// Binds to the configured address and serves until Ctrl+C.
///
/// # Errors
///
/// Fails if the address cannot be bound or the server stops with an error.
#[instrument(skip(settings, services), fields(host = %settings.host(), port = settings.port()))]
pub async fn serve(settings: &ServerSettings, services: Arc<LocalServices>) -> anyhow::Result<()> {
    let app = router(services, settings.allowed_origin())?;
    let listener =
        tokio::net::TcpListener::bind((settings.host().as_str(), *settings.port())).await?;
    info!(addr = %listener.local_addr()?, "Pots of Gold server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
    }
}

#[instrument(skip(services))]
async fn start_game(
    State(services): State<Arc<LocalServices>>,
    Json(request): Json<StartGameRequest>,
) -> Result<Json<StartGameResponse>, ApiError> {
    let response = services.start_game(&request).await?;
    Ok(Json(response))
}

#[instrument(skip(services))]
async fn optimal_move(
    State(services): State<Arc<LocalServices>>,
    Json(request): Json<OptimalMoveRequest>,
) -> Result<Json<OptimalMoveResponse>, ApiError> {
    let response = services.optimal_move(&request).await?;
    Ok(Json(response))
}

async fn health() -> &'static str {
    "ok"
}
