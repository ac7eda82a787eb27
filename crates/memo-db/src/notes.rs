//! Note repository implementation.

use std::time::Instant;

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use memo_core::{Error, NoteRepository, NoteRow, NoteUpdate, Result};

/// Columns returned by every note query, in `NoteRow` order.
const NOTE_COLUMNS: &str =
    "id, title, content, category, tags, ai_summary, created_at, updated_at";

/// PostgreSQL implementation of NoteRepository over the `memos` table.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a row within an existing transaction.
    pub async fn insert_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        row: &NoteRow,
    ) -> Result<NoteRow> {
        let query = format!(
            "INSERT INTO memos (id, title, content, category, tags, ai_summary, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {}",
            NOTE_COLUMNS
        );
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(row.id)
            .bind(&row.title)
            .bind(&row.content)
            .bind(&row.category)
            .bind(row.tags.clone().unwrap_or_default())
            .bind(&row.ai_summary)
            .bind(row.created_at)
            .bind(row.updated_at)
            .fetch_one(&mut **tx)
            .await
            .map_err(Error::Database)
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn list_ids(&self, limit: i64) -> Result<Vec<Uuid>> {
        let ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM memos LIMIT $1")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(ids)
    }

    async fn list(&self) -> Result<Vec<NoteRow>> {
        let start = Instant::now();
        let query = format!(
            "SELECT {} FROM memos ORDER BY created_at DESC",
            NOTE_COLUMNS
        );
        let rows = sqlx::query_as::<_, NoteRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "list",
            result_count = rows.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed notes"
        );
        Ok(rows)
    }

    async fn insert(&self, row: NoteRow) -> Result<NoteRow> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let stored = self.insert_tx(&mut tx, &row).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(stored)
    }

    async fn insert_bulk(&self, rows: Vec<NoteRow>) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        for row in &rows {
            self.insert_tx(&mut tx, row).await?;
        }
        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "insert_bulk",
            result_count = rows.len(),
            "Inserted notes"
        );
        Ok(rows.len() as u64)
    }

    async fn update(&self, id: Uuid, update: NoteUpdate) -> Result<NoteRow> {
        let query = format!(
            "UPDATE memos
             SET title = $2, content = $3, category = $4, tags = $5, updated_at = $6
             WHERE id = $1
             RETURNING {}",
            NOTE_COLUMNS
        );
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .bind(&update.title)
            .bind(&update.content)
            .bind(update.category.as_str())
            .bind(&update.tags)
            .bind(update.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::NoteNotFound(id))
    }

    async fn update_summary(&self, id: Uuid, summary: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE memos SET ai_summary = $2 WHERE id = $1")
            .bind(id)
            .bind(summary)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM memos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }

    async fn delete_all_except(&self, sentinel: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM memos WHERE id <> $1")
            .bind(sentinel)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "delete_all",
            result_count = result.rows_affected(),
            "Deleted notes"
        );
        Ok(result.rows_affected())
    }
}
