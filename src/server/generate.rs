use crate::config::API_KEY_ENV;
use crate::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::server::gemini::GeminiIntegration;
use crate::server::{AppError, AppState, Server};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

/// Response body for a successful relay.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub text: String,
}

pub(crate) trait GenerateEndpoint: GeminiIntegration {
    async fn generate(
        state: State<Arc<AppState>>,
        body: Bytes,
    ) -> Result<axum::response::Response, AppError>;
}

impl GenerateEndpoint for Server {
    /// Relay one prompt to Gemini and return the generated text.
    ///
    /// Linear pipeline, every branch terminal: validate the body, check
    /// the key, forward the prompt with a bounded wait, then map the
    /// upstream outcome to exactly one JSON response.
    async fn generate(
        State(state): State<Arc<AppState>>,
        body: Bytes,
    ) -> Result<axum::response::Response, AppError> {
        let prompt = parse_prompt(&body)?;
        info!("Received generate request (prompt length: {})", prompt.len());

        let api_key = state.api_key.clone().ok_or_else(|| {
            error!("Rejecting request: {} is not set", API_KEY_ENV);
            AppError::MissingApiKey
        })?;

        let request = GenerateContentRequest::from_prompt(&prompt);
        let response = Self::forward_prompt(state, &api_key, &request).await?;

        let status = response.status();
        if !status.is_success() {
            return Self::handle_errors(response).await;
        }

        let gemini_response: GenerateContentResponse = response.json().await.map_err(|e| {
            let reason = e.without_url().to_string();
            error!("Failed to parse Gemini response: {}", reason);
            AppError::Transport(reason)
        })?;

        // Missing candidates/parts is a successful empty result, not an
        // error: the upstream call went through, it just produced no text.
        let text = gemini_response.first_text();
        info!("Gemini call succeeded (generated {} chars)", text.len());

        Ok(Json(GenerateResponse { text }).into_response())
    }
}

/// Pull a non-empty `prompt` string out of a raw JSON request body.
///
/// The body is parsed by hand rather than through an extractor so that
/// malformed JSON and a missing prompt produce the two distinct 400
/// responses callers rely on.
pub(crate) fn parse_prompt(body: &[u8]) -> Result<String, AppError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| AppError::InvalidJson)?;

    match value.get("prompt").and_then(Value::as_str) {
        Some(prompt) if !prompt.is_empty() => Ok(prompt.to_string()),
        _ => Err(AppError::MissingPrompt),
    }
}
