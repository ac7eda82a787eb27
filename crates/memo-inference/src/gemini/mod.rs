//! Gemini generative-language backend.
//!
//! Talks to the `generateContent` REST endpoint of the Generative Language
//! API with an API key.
//!
//! # Example
//!
//! ```rust,no_run
//! use memo_inference::gemini::{GeminiBackend, GeminiConfig};
//! use memo_core::GenerationBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     // From environment variables
//!     let backend = GeminiBackend::from_env().unwrap();
//!
//!     // Or with custom config
//!     let config = GeminiConfig::new("my-api-key").with_model("gemini-2.0-flash-001");
//!     let backend = GeminiBackend::new(config).unwrap();
//!
//!     let summary = backend.generate("Summarize: ...").await.unwrap();
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{GeminiBackend, GeminiConfig};
pub use error::{to_memo_error, GeminiErrorCode};
pub use types::*;
