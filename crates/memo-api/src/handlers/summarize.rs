//! Summarization handler.
//!
//! Generation and persistence fail independently: once the model has
//! answered, the summary is always returned and any problem saving it is
//! reported in `saveError` alongside a 200 status.

use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use memo_core::{Error, NoteRepository, StoreErrorDetail};
use memo_inference::prompts;

use crate::{ApiError, AppState};

/// Request body for summarization.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    pub content: Option<String>,
    pub title: Option<String>,
    /// Note whose `ai_summary` should receive the result.
    pub memo_id: Option<String>,
}

/// Generated summary and the outcome of saving it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeResponse {
    pub summary: String,
    pub saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_error: Option<String>,
}

/// Summarize a note and optionally persist the summary.
///
/// # Returns
/// - 200 OK with `{ "summary", "saved", "saveError"? }`
/// - 400 Bad Request if `content` is missing or empty
/// - 500 Internal Server Error if no model key is configured or the model call fails
#[utoipa::path(post, path = "/api/memos/summarize", tag = "AI",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Summary generated", body = SummarizeResponse),
        (status = 400, description = "Content missing"),
        (status = 500, description = "Model not configured or model call failed")
    ))]
pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let Json(req) = payload?;

    let Some(content) = req.content.filter(|c| !c.is_empty()) else {
        return Err(ApiError::BadRequest("Content is required".to_string()));
    };

    let generator = state
        .generator
        .as_ref()
        .ok_or_else(|| ApiError::NotConfigured("GEMINI_API_KEY is not configured".to_string()))?;

    let start = Instant::now();
    let prompt = prompts::summary_prompt(req.title.as_deref(), &content);
    let summary = generator.generate(&prompt).await.map_err(|e| {
        error!(
            subsystem = "api",
            component = "summarize",
            op = "summarize",
            model = generator.model_name(),
            error = %e,
            "Error generating summary"
        );
        ApiError::upstream_with_message("Failed to generate summary", e.to_string())
    })?;

    info!(
        subsystem = "api",
        component = "summarize",
        op = "summarize",
        response_len = summary.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Summary generated"
    );

    let outcome = save_summary(
        state.notes.as_deref(),
        req.memo_id.as_deref(),
        &summary,
    )
    .await;

    Ok(Json(SummarizeResponse {
        summary,
        saved: outcome.is_ok(),
        save_error: outcome.err(),
    }))
}

/// Write `summary` onto the note named by `memo_id`.
///
/// The error string is what the caller shows as `saveError`.
async fn save_summary(
    notes: Option<&dyn NoteRepository>,
    memo_id: Option<&str>,
    summary: &str,
) -> Result<(), String> {
    let Some(memo_id) = memo_id.filter(|id| !id.is_empty()) else {
        warn!(
            subsystem = "api",
            component = "summarize",
            "memoId not provided, summary not saved"
        );
        return Err("memoId was not provided".to_string());
    };

    let Some(notes) = notes else {
        error!(
            subsystem = "api",
            component = "summarize",
            note_id = memo_id,
            "Note store is not configured"
        );
        return Err("Note store is not configured".to_string());
    };

    let id = Uuid::parse_str(memo_id).map_err(|e| {
        warn!(
            subsystem = "api",
            component = "summarize",
            note_id = memo_id,
            error = %e,
            "memoId is not a valid identifier"
        );
        format!("Invalid memoId: {}", memo_id)
    })?;

    match notes.update_summary(id, summary).await {
        Ok(0) => {
            warn!(
                subsystem = "api",
                component = "summarize",
                note_id = %id,
                "No rows were updated, note might not exist"
            );
            Err("Note not found".to_string())
        }
        Ok(rows) => {
            info!(
                subsystem = "api",
                component = "summarize",
                note_id = %id,
                result_count = rows,
                "Summary saved"
            );
            Ok(())
        }
        Err(e @ Error::Database(_)) => {
            let detail = StoreErrorDetail::from_error(&e);
            error!(
                subsystem = "api",
                component = "summarize",
                note_id = %id,
                error = %detail.message,
                detail = ?detail.detail,
                hint = ?detail.hint,
                code = ?detail.code,
                "Failed to save summary"
            );
            Err(format!("Database save failed: {}", detail.message))
        }
        Err(e) => {
            error!(
                subsystem = "api",
                component = "summarize",
                note_id = %id,
                error = %e,
                "Error saving summary"
            );
            Err(format!("Error while saving to database: {}", e))
        }
    }
}
