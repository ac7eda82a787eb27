//! One-shot copy of locally cached notes into the remote store.
//!
//! Remote emptiness is the only migration state: once the store holds any
//! row the routine is a no-op. Two clients starting at the same time against
//! an empty store can both copy; nothing here prevents that.

use std::fmt;
use std::time::Instant;

use tracing::{error, info, warn};

use memo_core::{LocalNoteCache, NoteRepository, NoteRow};

/// Result of a migration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Notes were copied. The local cache is cleared on a best-effort basis.
    Migrated(usize),
    /// The remote store already holds notes.
    RemoteNotEmpty,
    /// The local cache is empty.
    NothingToMigrate,
    /// A step failed; the local cache is untouched.
    Failed(String),
}

impl MigrationOutcome {
    /// True only when notes were copied.
    pub fn migrated(&self) -> bool {
        matches!(self, MigrationOutcome::Migrated(_))
    }
}

impl fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationOutcome::Migrated(n) => write!(f, "migrated {} notes", n),
            MigrationOutcome::RemoteNotEmpty => f.write_str("remote store already has notes"),
            MigrationOutcome::NothingToMigrate => f.write_str("no local notes to migrate"),
            MigrationOutcome::Failed(reason) => write!(f, "migration failed: {}", reason),
        }
    }
}

/// Copy every locally cached note into an empty remote store.
///
/// A failure to clear the local cache after a successful insert is logged
/// and still reported as [`MigrationOutcome::Migrated`]: the notes are already
/// remote, and the next run sees a non-empty store and leaves the leftover
/// cache alone, so no note is copied twice.
pub async fn migrate_local_cache(
    repo: &dyn NoteRepository,
    cache: &dyn LocalNoteCache,
) -> MigrationOutcome {
    let start = Instant::now();

    let existing = match repo.list_ids(1).await {
        Ok(ids) => ids,
        Err(e) => {
            error!(
                subsystem = "db",
                component = "migration",
                op = "check_remote",
                error = %e,
                "Failed to check remote store"
            );
            return MigrationOutcome::Failed(e.to_string());
        }
    };
    if !existing.is_empty() {
        info!(
            subsystem = "db",
            component = "migration",
            "Remote store already has notes, skipping migration"
        );
        return MigrationOutcome::RemoteNotEmpty;
    }

    let local = match cache.load().await {
        Ok(notes) => notes,
        Err(e) => {
            error!(
                subsystem = "db",
                component = "migration",
                op = "read_local",
                error = %e,
                "Failed to read local cache"
            );
            return MigrationOutcome::Failed(e.to_string());
        }
    };
    if local.is_empty() {
        info!(
            subsystem = "db",
            component = "migration",
            "No local notes to migrate"
        );
        return MigrationOutcome::NothingToMigrate;
    }

    let rows: Vec<NoteRow> = local.iter().map(NoteRow::from).collect();
    if let Err(e) = repo.insert_bulk(rows).await {
        error!(
            subsystem = "db",
            component = "migration",
            op = "insert_bulk",
            error = %e,
            "Failed to copy local notes to remote store"
        );
        return MigrationOutcome::Failed(e.to_string());
    }

    if let Err(e) = cache.clear().await {
        warn!(
            subsystem = "db",
            component = "migration",
            op = "clear_local",
            error = %e,
            "Notes migrated but local cache could not be cleared"
        );
    }

    info!(
        subsystem = "db",
        component = "migration",
        result_count = local.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Migrated local notes to remote store"
    );
    MigrationOutcome::Migrated(local.len())
}
