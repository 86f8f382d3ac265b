use crate::config::{ApiKey, Config};

pub mod gemini;
pub mod generate;

use self::generate::*;
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqwest::Client;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api_key: Option<ApiKey>,
    pub client: Client,
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Error type for API responses. One variant per failure class; every
/// variant renders as a JSON body so no failure leaves the handler
/// without a well-formed response.
#[derive(Debug)]
pub enum AppError {
    MethodNotAllowed,
    InvalidJson,
    MissingPrompt,
    MissingApiKey,
    /// Upstream returned a non-success status; mirrored to the caller
    /// with a best-effort passthrough of the upstream error body.
    UpstreamRejection {
        status: StatusCode,
        details: serde_json::Value,
    },
    UpstreamTimeout,
    Transport(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                serde_json::json!({
                    "message": "Method Not Allowed. Only POST is supported."
                }),
            ),
            AppError::InvalidJson => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": "Invalid JSON body." }),
            ),
            AppError::MissingPrompt => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": "Prompt is required in the request body." }),
            ),
            AppError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "message": "Server API key is not configured. Set GEMINI_API_KEY and restart the service."
                }),
            ),
            AppError::UpstreamRejection { status, details } => (
                status,
                serde_json::json!({
                    "message": format!(
                        "Error from AI service: {}",
                        status.canonical_reason().unwrap_or("Unknown Error")
                    ),
                    "details": details,
                }),
            ),
            AppError::UpstreamTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                serde_json::json!({ "message": "AI service call timed out. Please try again." }),
            ),
            AppError::Transport(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "message": "Failed to connect to the AI service due to a server-side error.",
                    "error": reason,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub struct Server {
    pub addr: String,
    pub router: Router,
}

impl Server {
    pub fn new(config: &Config, api_key: Option<ApiKey>) -> Self {
        let client = Client::new();
        let state = AppState {
            config: config.clone(),
            api_key,
            client,
        };
        let state = Arc::new(state);

        let app = Self::create_router(state.clone());
        let addr = format!("{}:{}", config.server.host, config.server.port);

        Self { addr, router: app }
    }

    /// Create the Axum router
    fn create_router(state: Arc<AppState>) -> Router {
        Router::new()
            .route(
                "/api/generate",
                post(Self::generate).fallback(Self::method_not_allowed),
            )
            .route("/health", get(health_check))
            .with_state(state)
    }

    /// Method fallback for the relay route: anything but POST gets the
    /// same JSON error shape as every other failure path.
    async fn method_not_allowed() -> AppError {
        AppError::MethodNotAllowed
    }
}
