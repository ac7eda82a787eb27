//! Tag suggestion handler.

use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use memo_inference::{prompts, tags};

use crate::{ApiError, AppState};

/// Request body for tag suggestion.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateTagsRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Suggested tags, at most five, none empty and none starting with `#`.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateTagsResponse {
    pub tags: Vec<String>,
}

/// Suggest tags for a note.
///
/// Only the first 1000 characters of `content` reach the model. A reply the
/// parser cannot use yields an empty list, not an error.
///
/// # Returns
/// - 200 OK with `{ "tags": [...] }`
/// - 400 Bad Request if `title` or `content` is missing or empty
/// - 500 Internal Server Error if no model key is configured or the model call fails
#[utoipa::path(post, path = "/api/generate-tags", tag = "AI",
    request_body = GenerateTagsRequest,
    responses(
        (status = 200, description = "Suggested tags", body = GenerateTagsResponse),
        (status = 400, description = "Title or content missing"),
        (status = 500, description = "Model not configured or model call failed")
    ))]
pub async fn generate_tags(
    State(state): State<AppState>,
    payload: Result<Json<GenerateTagsRequest>, JsonRejection>,
) -> Result<Json<GenerateTagsResponse>, ApiError> {
    let Json(req) = payload?;

    let (Some(title), Some(content)) = (
        req.title.filter(|t| !t.is_empty()),
        req.content.filter(|c| !c.is_empty()),
    ) else {
        return Err(ApiError::BadRequest(
            "Title and content are required.".to_string(),
        ));
    };

    let generator = state.generator.as_ref().ok_or_else(|| {
        ApiError::NotConfigured("GEMINI_API_KEY is not configured.".to_string())
    })?;

    let start = Instant::now();
    let prompt = prompts::tag_prompt(&title, &content);
    let reply = generator.generate(&prompt).await.map_err(|e| {
        error!(
            subsystem = "api",
            component = "tags",
            op = "generate_tags",
            model = generator.model_name(),
            error = %e,
            "Tag generation failed"
        );
        ApiError::upstream("An error occurred while generating tags.")
    })?;

    let tags = tags::parse_tag_reply(&reply);
    info!(
        subsystem = "api",
        component = "tags",
        op = "generate_tags",
        result_count = tags.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Tags generated"
    );

    Ok(Json(GenerateTagsResponse { tags }))
}
