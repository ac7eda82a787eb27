//! Superseded on-device note storage.
//!
//! Before notes lived in the remote store they were kept on the device as a
//! single JSON array of camelCase notes. That file is now only read as the
//! source of the one-shot migration and removed once migrated.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use memo_core::defaults::LOCAL_CACHE_FILE;
use memo_core::{Error, LocalNoteCache, Note, Result};

/// JSON-file backed local cache.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    path: PathBuf,
}

impl JsonFileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache at `MEMO_LOCAL_CACHE`, or [`JsonFileCache::default_path`].
    pub fn from_env() -> Self {
        if let Ok(path) = std::env::var("MEMO_LOCAL_CACHE") {
            if !path.is_empty() {
                return Self::new(path);
            }
        }
        Self::new(Self::default_path())
    }

    /// `memo/memos.json` under the platform data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("memo")
            .join(LOCAL_CACHE_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LocalNoteCache for JsonFileCache {
    async fn load(&self) -> Result<Vec<Note>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::Io(e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let notes: Vec<Note> = serde_json::from_slice(&bytes)?;
        debug!(
            subsystem = "db",
            component = "local_cache",
            op = "load",
            path = %self.path.display(),
            result_count = notes.len(),
            "Read local cache"
        );
        Ok(notes)
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

/// In-memory local cache for tests.
#[derive(Debug, Default)]
pub struct MemoryCache {
    notes: Mutex<Vec<Note>>,
    fail_load: bool,
    fail_clear: bool,
}

impl MemoryCache {
    pub fn new(notes: Vec<Note>) -> Self {
        Self {
            notes: Mutex::new(notes),
            ..Default::default()
        }
    }

    /// Make every `load` fail.
    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    /// Make every `clear` fail.
    pub fn failing_clear(mut self) -> Self {
        self.fail_clear = true;
        self
    }

    pub fn len(&self) -> usize {
        self.notes.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LocalNoteCache for MemoryCache {
    async fn load(&self) -> Result<Vec<Note>> {
        if self.fail_load {
            return Err(Error::Internal("local cache unreadable".to_string()));
        }
        Ok(self
            .notes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    async fn clear(&self) -> Result<()> {
        if self.fail_clear {
            return Err(Error::Internal("local cache not writable".to_string()));
        }
        self.notes.lock().unwrap_or_else(|e| e.into_inner()).clear();
        Ok(())
    }
}
