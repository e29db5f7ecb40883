//! HTTP API for scenario generation.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use makearch_ai::{GenerationError, ScenarioGenerator};
use makearch_scenario::{AutomationScenario, GenerationRequest};

pub const INVALID_INPUT_MESSAGE: &str = "Input invalide";
pub const GENERATION_FAILED_MESSAGE: &str = "Erreur lors de la génération du scénario";

/// Application state shared across handlers
pub struct AppState {
    pub generator: ScenarioGenerator,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub scenario: AutomationScenario,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Maps [`GenerationError`] to a status code and a user-safe message.
pub struct ApiError(GenerationError);

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            GenerationError::InvalidInput => (StatusCode::BAD_REQUEST, INVALID_INPUT_MESSAGE),
            GenerationError::UpstreamFailure { .. } | GenerationError::MalformedResponse { .. } => {
                error!(error = %self.0, kind = self.0.kind(), "Error generating scenario");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED_MESSAGE)
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/generate", post(generate_scenario))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// POST /api/generate: turn a free-text need into a scenario.
async fn generate_scenario(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        warn!("Rejected generation request: {}", rejection.body_text());
        GenerationError::InvalidInput
    })?;

    let input = req.input.ok_or(GenerationError::InvalidInput)?;
    let scenario = state.generator.generate(&input).await?;

    Ok(Json(GenerateResponse { scenario }))
}
