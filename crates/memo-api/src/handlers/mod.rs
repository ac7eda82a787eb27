//! HTTP request handlers.

pub mod health;
pub mod summarize;
pub mod tags;

pub use health::{health_check, HealthResponse};
pub use summarize::{summarize, SummarizeRequest, SummarizeResponse};
pub use tags::{generate_tags, GenerateTagsRequest, GenerateTagsResponse};
