//! Gemini inference backend implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use memo_core::defaults::{GEN_BASE_URL, GEN_MODEL, GEN_TIMEOUT_SECS};
use memo_core::{Error, GenerationBackend, Result};

use super::error::{to_memo_error, GeminiErrorCode};
use super::types::*;

/// Configuration for the Gemini backend.
#[derive(Clone)]
pub struct GeminiConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key sent as `x-goog-api-key`.
    pub api_key: String,
    /// Model to use for generation.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl GeminiConfig {
    /// Default endpoint, model and timeout with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: GEN_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: GEN_MODEL.to_string(),
            timeout_seconds: GEN_TIMEOUT_SECS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read `GEMINI_API_KEY`, `GEMINI_BASE_URL`, `GEMINI_MODEL` and
    /// `GEMINI_TIMEOUT`. A missing or empty key is a configuration error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Config("GEMINI_API_KEY is not configured".to_string()))?;

        Ok(Self {
            base_url: lookup("GEMINI_BASE_URL").unwrap_or_else(|| GEN_BASE_URL.to_string()),
            api_key,
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| GEN_MODEL.to_string()),
            timeout_seconds: lookup("GEMINI_TIMEOUT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(GEN_TIMEOUT_SECS),
        })
    }
}

/// Gemini generative-language backend.
pub struct GeminiBackend {
    client: Client,
    config: GeminiConfig,
}

impl GeminiBackend {
    /// Create a new Gemini backend with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Inference(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "gemini",
            model = %config.model,
            url = %config.base_url,
            "Initializing Gemini backend"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();
        debug!(
            subsystem = "inference",
            component = "gemini",
            op = "generate",
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Generating"
        );

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&GenerateContentRequest::user_prompt(prompt))
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body: GeminiErrorResponse =
                response.json().await.unwrap_or(GeminiErrorResponse {
                    error: GeminiError {
                        code: status.as_u16(),
                        message: "Unknown error".to_string(),
                        status: "UNKNOWN".to_string(),
                    },
                });
            warn!(
                subsystem = "inference",
                component = "gemini",
                op = "generate",
                status = status.as_u16(),
                api_status = %body.error.status,
                error = %body.error.message,
                "Gemini request failed"
            );
            let code = GeminiErrorCode::from_response(
                status.as_u16(),
                &body.error.status,
                &body.error.message,
            );
            return Err(to_memo_error(
                code,
                &format!("Gemini returned {}: {}", status, body.error.message),
            ));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        let text = result.text().ok_or_else(|| {
            let reason = result
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
                .unwrap_or_else(|| "no candidates".to_string());
            Error::Inference(format!("Model returned no text ({})", reason))
        })?;

        debug!(
            subsystem = "inference",
            component = "gemini",
            op = "generate",
            response_len = text.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Generation complete"
        );
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
