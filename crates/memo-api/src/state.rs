//! Shared application state.

use std::sync::Arc;

use memo_core::{GenerationBackend, NoteRepository};

/// Application state shared across handlers.
///
/// Both collaborators are optional: a server without a model key still
/// answers requests (with a configuration error), and one without a store
/// still summarizes but reports that nothing was saved.
#[derive(Clone, Default)]
pub struct AppState {
    /// Text generation backend (None if no API key is configured).
    pub generator: Option<Arc<dyn GenerationBackend>>,
    /// Remote note store (None if no database is configured).
    pub notes: Option<Arc<dyn NoteRepository>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator(mut self, generator: Arc<dyn GenerationBackend>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_notes(mut self, notes: Arc<dyn NoteRepository>) -> Self {
        self.notes = Some(notes);
        self
    }
}
