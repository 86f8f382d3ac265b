use crate::config::ApiKey;
use crate::server::{AppError, AppState, Server};
use reqwest::Response;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

pub(crate) trait GeminiIntegration {
    async fn forward_prompt<T>(
        state: Arc<AppState>,
        api_key: &ApiKey,
        json: &T,
    ) -> Result<Response, AppError>
    where
        T: Serialize + Sized;

    async fn handle_errors(response: Response) -> Result<axum::response::Response, AppError>;
}

impl GeminiIntegration for Server {
    /// Send one bounded POST to `models/{model}:generateContent`. The
    /// per-request timeout covers connect through body completion and
    /// aborts the in-flight request when it fires, releasing the
    /// connection.
    async fn forward_prompt<T>(
        state: Arc<AppState>,
        api_key: &ApiKey,
        json: &T,
    ) -> Result<Response, AppError>
    where
        T: Serialize + Sized,
    {
        let gemini = &state.config.gemini;
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            gemini.api_base_url,
            gemini.model,
            api_key.reveal()
        );

        // The full URL carries the key; log only the base and model.
        debug!(
            "Forwarding prompt to {}/models/{}:generateContent",
            gemini.api_base_url, gemini.model
        );

        state
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .timeout(Duration::from_secs(gemini.timeout_secs))
            .json(json)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("Gemini API call timed out after {}s", gemini.timeout_secs);
                    AppError::UpstreamTimeout
                } else {
                    // without_url strips the key-bearing URL from the error text
                    let reason = e.without_url().to_string();
                    error!("Failed to send request to Gemini API: {}", reason);
                    AppError::Transport(reason)
                }
            })
    }

    /// Mirror an upstream non-success status to the caller, passing the
    /// upstream error body through as opaque JSON where it parses.
    async fn handle_errors(response: Response) -> Result<axum::response::Response, AppError> {
        let status = response.status();
        let details = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);

        error!("Gemini API returned error status: {}", status);
        Err(AppError::UpstreamRejection { status, details })
    }
}
