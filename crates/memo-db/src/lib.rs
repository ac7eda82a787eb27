//! # memo-db
//!
//! PostgreSQL note store for memo.
//!
//! This crate provides:
//! - Connection pool management
//! - The `memos` table repository ([`PgNoteRepository`])
//! - An in-memory repository with failure injection ([`MemoryNoteRepository`])
//! - The superseded on-device cache ([`JsonFileCache`]) and the one-shot
//!   migration that copies it into the remote store
//! - [`NoteStore`], the view-state cache driven by front ends
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use memo_db::{Database, JsonFileCache, NoteStore};
//! use memo_core::NoteForm;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/memo").await?;
//!     let mut store = NoteStore::new(Arc::new(db.notes), Arc::new(JsonFileCache::from_env()));
//!     store.load().await;
//!
//!     let note = store.create(NoteForm::new("Hello", "world")).await?;
//!     println!("Created note: {}", note.id);
//!     Ok(())
//! }
//! ```

pub mod local_cache;
pub mod memory;
pub mod migration;
pub mod notes;
pub mod pool;
pub mod store;

// Re-export core types
pub use memo_core::*;

pub use local_cache::{JsonFileCache, MemoryCache};
pub use memory::{MemoryNoteRepository, RepoOp};
pub use migration::{migrate_local_cache, MigrationOutcome};
pub use notes::PgNoteRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use store::NoteStore;

/// Database context holding the pool and the note repository.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Note repository for CRUD operations.
    pub notes: PgNoteRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            notes: PgNoteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Create the `memos` table if it does not exist.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
