//! View-state cache over the remote note store.
//!
//! [`NoteStore`] keeps the notes last read from the remote store (newest
//! created first) together with the current search query and category
//! filter. The cache is never the source of truth: every successful write
//! replaces the cached entry with the canonical row the store returned, and
//! failed writes leave the cache untouched.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info};
use uuid::Uuid;

use memo_core::defaults::SENTINEL_NOTE_ID;
use memo_core::{
    compute_stats, filter_notes, CategoryFilter, LocalNoteCache, Note, NoteForm, NoteRepository,
    NoteRow, NoteStats, NoteUpdate, Result,
};

use crate::migration::{migrate_local_cache, MigrationOutcome};

/// Cached notes plus search/filter state.
pub struct NoteStore {
    repo: Arc<dyn NoteRepository>,
    local_cache: Arc<dyn LocalNoteCache>,
    notes: Vec<Note>,
    loading: bool,
    search_query: String,
    selected_category: CategoryFilter,
}

impl NoteStore {
    /// Create an empty store. Nothing is fetched until [`Self::load`].
    pub fn new(repo: Arc<dyn NoteRepository>, local_cache: Arc<dyn LocalNoteCache>) -> Self {
        Self {
            repo,
            local_cache,
            notes: Vec::new(),
            loading: true,
            search_query: String::new(),
            selected_category: CategoryFilter::All,
        }
    }

    /// Run the local cache migration, then replace the cache with every
    /// remote note. A failed fetch empties the cache and is only logged.
    pub async fn load(&mut self) -> MigrationOutcome {
        let start = Instant::now();
        self.loading = true;

        let outcome = migrate_local_cache(self.repo.as_ref(), self.local_cache.as_ref()).await;

        match self.repo.list().await {
            Ok(rows) => {
                self.notes = rows.into_iter().map(Note::from).collect();
                debug!(
                    subsystem = "db",
                    component = "store",
                    op = "load",
                    result_count = self.notes.len(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Loaded notes"
                );
            }
            Err(e) => {
                error!(
                    subsystem = "db",
                    component = "store",
                    op = "load",
                    error = %e,
                    "Failed to load notes"
                );
                self.notes.clear();
            }
        }

        self.loading = false;
        outcome
    }

    /// Same as [`Self::load`].
    pub async fn refresh(&mut self) -> MigrationOutcome {
        self.load().await
    }

    /// Create a note and prepend the stored record to the cache.
    pub async fn create(&mut self, form: NoteForm) -> Result<Note> {
        let note = Note::from_form(form);
        let row = self
            .repo
            .insert(NoteRow::for_insert(&note))
            .await
            .inspect_err(|e| {
                error!(
                    subsystem = "db",
                    component = "store",
                    op = "create",
                    note_id = %note.id,
                    error = %e,
                    "Failed to create note"
                )
            })?;

        let created = Note::from(row);
        info!(
            subsystem = "db",
            component = "store",
            op = "create",
            note_id = %created.id,
            "Created note"
        );
        self.notes.insert(0, created.clone());
        Ok(created)
    }

    /// Merge `form` into the cached note `id` and write it through.
    ///
    /// Returns `Ok(None)` without touching the store when `id` is not in the
    /// cache, including a note created elsewhere since the last load.
    pub async fn update(&mut self, id: Uuid, form: NoteForm) -> Result<Option<Note>> {
        let Some(existing) = self.get_by_id(id) else {
            debug!(
                subsystem = "db",
                component = "store",
                op = "update",
                note_id = %id,
                "Note not in cache, skipping update"
            );
            return Ok(None);
        };

        let mut merged = existing.clone();
        merged.apply_form(form);

        let row = self
            .repo
            .update(id, NoteUpdate::from(&merged))
            .await
            .inspect_err(|e| {
                error!(
                    subsystem = "db",
                    component = "store",
                    op = "update",
                    note_id = %id,
                    error = %e,
                    "Failed to update note"
                )
            })?;

        let updated = Note::from(row);
        if let Some(slot) = self.notes.iter_mut().find(|n| n.id == id) {
            *slot = updated.clone();
        }
        Ok(Some(updated))
    }

    /// Delete a note from the store, then from the cache.
    pub async fn delete(&mut self, id: Uuid) -> Result<()> {
        self.repo.delete(id).await.inspect_err(|e| {
            error!(
                subsystem = "db",
                component = "store",
                op = "delete",
                note_id = %id,
                error = %e,
                "Failed to delete note"
            )
        })?;
        self.notes.retain(|n| n.id != id);
        Ok(())
    }

    /// Delete every remote note, empty the cache and reset search/filter.
    pub async fn clear_all(&mut self) -> Result<u64> {
        let removed = self
            .repo
            .delete_all_except(SENTINEL_NOTE_ID)
            .await
            .inspect_err(|e| {
                error!(
                    subsystem = "db",
                    component = "store",
                    op = "clear_all",
                    error = %e,
                    "Failed to clear notes"
                )
            })?;

        self.notes.clear();
        self.search_query.clear();
        self.selected_category = CategoryFilter::All;
        info!(
            subsystem = "db",
            component = "store",
            op = "clear_all",
            result_count = removed,
            "Cleared all notes"
        );
        Ok(removed)
    }

    /// Set the free-text search query.
    pub fn search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Set the category filter.
    pub fn filter_by_category(&mut self, filter: CategoryFilter) {
        self.selected_category = filter;
    }

    pub fn get_by_id(&self, id: Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Cached notes passing the current category and search filters.
    pub fn notes(&self) -> Vec<&Note> {
        filter_notes(&self.notes, self.selected_category, &self.search_query)
    }

    /// Every cached note, newest created first.
    pub fn all_notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn stats(&self) -> NoteStats {
        compute_stats(&self.notes, self.notes().len())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_category(&self) -> CategoryFilter {
        self.selected_category
    }
}
