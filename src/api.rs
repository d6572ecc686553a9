//! WikiAI API Endpoints
//!
//! Provides the REST surface:
//! - Article search (POST /search)
//! - Health check (GET /health)
//! - Service description (GET /)
//!
//! The error translation table lives here: upstream failures are classified
//! by the OpenRouter client and mapped onto stable JSON error shapes, with
//! the upstream HTTP status passed through where one exists.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use crate::openrouter::{ChatMessage, OpenRouterClient, OpenRouterError};
use crate::prompt;

pub const SERVICE_NAME: &str = "WikiAI Backend";

/// API state shared across all handlers
pub struct ApiState {
    pub client: OpenRouterClient,
}

/// RFC 3339 UTC timestamp with millisecond precision
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ============================================================================
// ERROR TRANSLATION
// ============================================================================

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Topic is required")]
    MissingTopic,
    #[error("API key is not configured")]
    MissingApiKey,
    #[error("AI service error ({status}): {details}")]
    Upstream { status: StatusCode, details: String },
    #[error("AI service unavailable")]
    Unavailable,
    #[error("internal server error")]
    Internal,
}

impl From<OpenRouterError> for ApiError {
    fn from(err: OpenRouterError) -> Self {
        match err {
            OpenRouterError::MissingApiKey => ApiError::MissingApiKey,
            OpenRouterError::Connect(_) => ApiError::Unavailable,
            OpenRouterError::Api { status, message } => ApiError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                details: message,
            },
            OpenRouterError::EmptyCompletion => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingTopic => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Topic is required" }),
            ),
            ApiError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Backend configuration error: API key missing." }),
            ),
            ApiError::Upstream { status, details } => (
                status,
                json!({
                    "error": "AI service error",
                    "details": details,
                    "timestamp": iso_timestamp(),
                }),
            ),
            ApiError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "error": "AI service unavailable",
                    "details": "Unable to connect to AI service",
                    "timestamp": iso_timestamp(),
                }),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Internal server error",
                    "details": "Something went wrong on our end",
                    "timestamp": iso_timestamp(),
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

// ============================================================================
// SEARCH ENDPOINT
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub content: String,
    pub topic: String,
    pub timestamp: String,
    pub model: String,
    pub success: bool,
}

/// POST /search - Generate a Wikipedia-style article for a topic
pub async fn search(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let topic = match req.topic.as_deref().map(str::trim) {
        Some(topic) if !topic.is_empty() => topic.to_string(),
        _ => return Err(ApiError::MissingTopic),
    };

    info!("Generating article for topic: {}", topic);

    let messages = vec![
        ChatMessage::system(prompt::SYSTEM_PROMPT),
        ChatMessage::user(&prompt::article_prompt(&topic)),
    ];

    let completion = state.client.chat(messages).await.map_err(|e| {
        warn!("Article generation failed for '{}': {}", topic, e);
        ApiError::from(e)
    })?;

    Ok(Json(SearchResponse {
        content: completion.content,
        topic,
        timestamp: iso_timestamp(),
        model: state.client.model().to_string(),
        success: true,
    }))
}

// ============================================================================
// STATUS ENDPOINTS
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
    pub version: String,
}

/// GET /health - Service health check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: iso_timestamp(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET / - Service description and endpoint index
pub async fn root_info() -> Json<serde_json::Value> {
    Json(json!({
        "message": "WikiAI Backend API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "search": "POST /search - Search for topics using AI",
            "health": "GET /health - Service health check",
        },
        "status": "online",
        "timestamp": iso_timestamp(),
    }))
}

/// Fallback for unknown routes
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "message": "The requested endpoint does not exist",
            "timestamp": iso_timestamp(),
        })),
    )
}
