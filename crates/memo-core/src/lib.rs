//! # memo-core
//!
//! Core types, traits, and abstractions for the memo note service.
//!
//! This crate provides the foundational data structures and trait definitions
//! that other memo crates depend on: the note model in both its application
//! and persisted shapes, the row mapper between them, the derived filtered
//! view and statistics, and the repository, local cache and generation
//! traits.

pub mod defaults;
pub mod error;
pub mod filter;
pub mod mapping;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result, StoreErrorDetail};
pub use filter::{compute_stats, filter_notes, matches_category, matches_query};
pub use models::*;
pub use traits::*;
