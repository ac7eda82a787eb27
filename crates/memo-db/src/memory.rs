//! In-memory note repository.
//!
//! Mirrors the semantics of [`crate::PgNoteRepository`] without a database:
//! rows are listed newest first, updates of absent ids fail with
//! `NoteNotFound`, and duplicate ids are rejected. Individual operations can
//! be made to fail to exercise store-error paths.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use memo_core::{Error, NoteRepository, NoteRow, NoteUpdate, Result};

/// Repository operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoOp {
    ListIds,
    List,
    Insert,
    InsertBulk,
    Update,
    UpdateSummary,
    Delete,
    DeleteAll,
}

/// In-memory implementation of NoteRepository.
#[derive(Default)]
pub struct MemoryNoteRepository {
    rows: RwLock<Vec<NoteRow>>,
    failing: Mutex<HashSet<RepoOp>>,
    bulk_inserts: AtomicUsize,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `rows`.
    pub fn with_rows(rows: Vec<NoteRow>) -> Self {
        Self {
            rows: RwLock::new(rows),
            ..Default::default()
        }
    }

    /// Make `op` fail until [`Self::recover`] is called.
    pub fn fail_on(&self, op: RepoOp) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(op);
    }

    /// Clear all injected failures.
    pub fn recover(&self) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Number of successful bulk inserts performed.
    pub fn bulk_insert_count(&self) -> usize {
        self.bulk_inserts.load(Ordering::SeqCst)
    }

    /// Snapshot of stored rows in insertion order.
    pub async fn rows(&self) -> Vec<NoteRow> {
        self.rows.read().await.clone()
    }

    fn check(&self, op: RepoOp) -> Result<()> {
        let failing = self.failing.lock().unwrap_or_else(|e| e.into_inner());
        if failing.contains(&op) {
            return Err(Error::Database(sqlx::Error::Protocol(format!(
                "injected failure for {:?}",
                op
            ))));
        }
        Ok(())
    }
}

fn duplicate_key(id: Uuid) -> Error {
    Error::Database(sqlx::Error::Protocol(format!(
        "duplicate key value violates unique constraint \"memos_pkey\": {}",
        id
    )))
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn list_ids(&self, limit: i64) -> Result<Vec<Uuid>> {
        self.check(RepoOp::ListIds)?;
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .take(take)
            .map(|r| r.id)
            .collect())
    }

    async fn list(&self) -> Result<Vec<NoteRow>> {
        self.check(RepoOp::List)?;
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert(&self, row: NoteRow) -> Result<NoteRow> {
        self.check(RepoOp::Insert)?;
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.id == row.id) {
            return Err(duplicate_key(row.id));
        }
        let stored = NoteRow {
            tags: Some(row.tags.clone().unwrap_or_default()),
            ..row
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn insert_bulk(&self, new_rows: Vec<NoteRow>) -> Result<u64> {
        self.check(RepoOp::InsertBulk)?;
        let mut rows = self.rows.write().await;
        let mut seen: HashSet<Uuid> = rows.iter().map(|r| r.id).collect();
        for row in &new_rows {
            if !seen.insert(row.id) {
                return Err(duplicate_key(row.id));
            }
        }
        let count = new_rows.len() as u64;
        rows.extend(new_rows.into_iter().map(|row| NoteRow {
            tags: Some(row.tags.clone().unwrap_or_default()),
            ..row
        }));
        self.bulk_inserts.fetch_add(1, Ordering::SeqCst);
        Ok(count)
    }

    async fn update(&self, id: Uuid, update: NoteUpdate) -> Result<NoteRow> {
        self.check(RepoOp::Update)?;
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(Error::NoteNotFound(id))?;
        row.title = update.title;
        row.content = update.content;
        row.category = update.category.as_str().to_string();
        row.tags = Some(update.tags);
        row.updated_at = update.updated_at;
        Ok(row.clone())
    }

    async fn update_summary(&self, id: Uuid, summary: &str) -> Result<u64> {
        self.check(RepoOp::UpdateSummary)?;
        let mut rows = self.rows.write().await;
        let mut affected = 0;
        for row in rows.iter_mut().filter(|r| r.id == id) {
            row.ai_summary = Some(summary.to_string());
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.check(RepoOp::Delete)?;
        self.rows.write().await.retain(|r| r.id != id);
        Ok(())
    }

    async fn delete_all_except(&self, sentinel: Uuid) -> Result<u64> {
        self.check(RepoOp::DeleteAll)?;
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id == sentinel);
        Ok((before - rows.len()) as u64)
    }
}
