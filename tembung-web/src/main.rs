use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use tembung::TranslationRequest;
use tembung_mt::{Config, GlossResult, Pipeline, TranslationResult};

#[derive(Serialize, Deserialize)]
pub struct TranslateBody {
    pub text: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct GlossBody {
    pub sentence: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

/// Failure returned by a handler
///
/// Internal causes are logged and never sent to the caller.
pub enum ApiError {
    BadRequest(String),
    Unavailable(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Unavailable(message) => (StatusCode::SERVICE_UNAVAILABLE, message),
            ApiError::Internal(cause) => {
                error!("Request failed: {}", cause);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load(None).map_err(|e| format!("Failed to load config: {}", e))?;
    let pipeline = Pipeline::from_config(&config)
        .map_err(|e| format!("Failed to initialize translator: {}", e))?;
    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    info!("Starting tembung web server");

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("Server running at http://{}", config.server.bind);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/translate", post(translate))
        .route("/api/gloss", post(gloss))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn translate(
    State(state): State<AppState>,
    body: Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<TranslationResult>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        warn!("Rejected translate body: {}", rejection.body_text());
        ApiError::BadRequest("Invalid request body: text, from and to must be strings".to_string())
    })?;

    let request = TranslationRequest::validate(
        body.text.as_deref(),
        body.from.as_deref(),
        body.to.as_deref(),
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    info!("Translating {} token(s), {}", request.tokens().len(), request.pair);

    let result = state
        .pipeline
        .translate(&request)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(result))
}

async fn gloss(
    State(state): State<AppState>,
    body: Result<Json<GlossBody>, JsonRejection>,
) -> Result<Json<GlossResult>, ApiError> {
    let sentence = body
        .ok()
        .and_then(|Json(body)| body.sentence)
        .filter(|sentence| !sentence.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("sentence must be a string".to_string()))?;

    match state.pipeline.gloss(&sentence).await {
        Some(Ok(result)) => Ok(Json(result)),
        Some(Err(e)) => Err(ApiError::Internal(e.to_string())),
        None => Err(ApiError::Unavailable(
            "Dictionary is not configured".to_string(),
        )),
    }
}
