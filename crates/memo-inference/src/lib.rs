//! # memo-inference
//!
//! Generative-language support for memo.
//!
//! This crate provides:
//! - The Gemini `generateContent` backend behind [`GenerationBackend`]
//! - Prompt templates for tag suggestion and summarization
//! - Lenient parsing of free-text tag replies
//! - A prompt-capturing mock backend (feature `mock`)
//!
//! # Feature Flags
//!
//! - `mock`: Enable [`mock::MockGenerationBackend`] for downstream tests
//!
//! # Example
//!
//! ```rust,no_run
//! use memo_inference::{prompts, tags, GeminiBackend};
//! use memo_core::GenerationBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = GeminiBackend::from_env().unwrap();
//!     let reply = backend
//!         .generate(&prompts::tag_prompt("Trip", "Seoul palaces"))
//!         .await
//!         .unwrap();
//!     println!("{:?}", tags::parse_tag_reply(&reply));
//! }
//! ```

pub mod gemini;
pub mod prompts;
pub mod tags;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use memo_core::*;

pub use gemini::{GeminiBackend, GeminiConfig};
