//! Mock generation backend for deterministic testing.
//!
//! Returns a fixed reply (or a fixed failure) and records every prompt so
//! tests can assert on what would have been sent to the model.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use memo_inference::mock::MockGenerationBackend;
//! use memo_core::GenerationBackend;
//!
//! #[tokio::test]
//! async fn test_with_mock_backend() {
//!     let backend = MockGenerationBackend::new().with_fixed_response(r#"["a", "b"]"#);
//!     backend.generate("prompt").await.unwrap();
//!     assert_eq!(backend.prompts(), vec!["prompt".to_string()]);
//! }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use memo_core::{Error, GenerationBackend, Result};

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail(MockFailure),
}

/// Failure kinds the mock can simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Upstream call failed.
    Inference,
    /// Credentials rejected.
    Config,
}

/// Mock generation backend.
#[derive(Debug, Clone)]
pub struct MockGenerationBackend {
    reply: MockReply,
    model: String,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerationBackend {
    /// Create a mock that replies with "Mock response".
    pub fn new() -> Self {
        Self {
            reply: MockReply::Text("Mock response".to_string()),
            model: "mock-model".to_string(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the reply returned for every prompt.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        self.reply = MockReply::Text(response.into());
        self
    }

    /// Fail every call with the given failure.
    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        self.reply = MockReply::Fail(failure);
        self
    }

    /// Every prompt received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The most recent prompt, if any.
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts().pop()
    }

    /// Number of generate calls made.
    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(prompt.to_string());

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Fail(MockFailure::Inference) => {
                Err(Error::Inference("Simulated failure".to_string()))
            }
            MockReply::Fail(MockFailure::Config) => {
                Err(Error::Config("Simulated authentication failure".to_string()))
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_prompts() {
        let backend = MockGenerationBackend::new().with_fixed_response("ok");
        assert_eq!(backend.generate("one").await.unwrap(), "ok");
        assert_eq!(backend.generate("two").await.unwrap(), "ok");
        assert_eq!(backend.prompts(), vec!["one", "two"]);
        assert_eq!(backend.last_prompt().as_deref(), Some("two"));
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_prompt_log() {
        let backend = MockGenerationBackend::new();
        let clone = backend.clone();
        clone.generate("shared").await.unwrap();
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failures() {
        let backend = MockGenerationBackend::new().with_failure(MockFailure::Inference);
        assert!(matches!(
            backend.generate("x").await,
            Err(Error::Inference(_))
        ));

        let backend = MockGenerationBackend::new().with_failure(MockFailure::Config);
        assert!(backend.generate("x").await.unwrap_err().is_config());
    }
}
