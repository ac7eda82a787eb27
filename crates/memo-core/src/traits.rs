//! Core traits for memo.
//!
//! These traits define the abstractions that allow pluggable implementations
//! for the remote store, the superseded local cache and text generation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Note, NoteRow, NoteUpdate};
use crate::Result;

// =============================================================================
// REPOSITORY TRAITS
// =============================================================================

/// Remote store of canonical note records.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List at most `limit` note identifiers.
    async fn list_ids(&self, limit: i64) -> Result<Vec<Uuid>>;

    /// List all rows, newest created first.
    async fn list(&self) -> Result<Vec<NoteRow>>;

    /// Insert a row and return the stored record.
    async fn insert(&self, row: NoteRow) -> Result<NoteRow>;

    /// Insert many rows in one statement; either all are stored or none.
    async fn insert_bulk(&self, rows: Vec<NoteRow>) -> Result<u64>;

    /// Write user-editable columns and return the stored record.
    ///
    /// Returns [`crate::Error::NoteNotFound`] when no row has `id`.
    async fn update(&self, id: Uuid, update: NoteUpdate) -> Result<NoteRow>;

    /// Set the AI summary column and return the number of rows affected.
    async fn update_summary(&self, id: Uuid, summary: &str) -> Result<u64>;

    /// Delete a single row. Deleting an absent id is not an error.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Delete every row whose id differs from `sentinel`; returns rows removed.
    async fn delete_all_except(&self, sentinel: Uuid) -> Result<u64>;
}

/// Superseded on-device note storage, read only as a migration source.
#[async_trait]
pub trait LocalNoteCache: Send + Sync {
    /// Read every locally cached note.
    async fn load(&self) -> Result<Vec<Note>>;

    /// Remove every locally cached note.
    async fn clear(&self) -> Result<()>;
}

// =============================================================================
// GENERATION TRAITS
// =============================================================================

/// Backend for text generation (LLM).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
