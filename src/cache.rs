//! Preview cache: persists the last loaded table across invocations

use crate::error::{Result, SheetviewError};
use crate::table::{FileInfo, Record, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Storage key for the persisted preview, versioned with the cache format
pub const PREVIEW_KEY: &str = "preview.v1";

/// A loaded preview: file metadata, table, and source fingerprint
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSnapshot {
    pub file_info: FileInfo,
    pub table: Table,
    pub source_digest: String,
}

/// Key-value storage capability backing the preview cache.
///
/// Injected so the file-backed store can be swapped for [`MemoryStore`]
/// in tests.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// File-backed store: one JSON file per key inside the workspace directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory store used as a drop-in fake in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Persisted form of a preview snapshot
#[derive(Debug, Serialize, Deserialize)]
struct CachedPreview {
    format_version: String,
    created: DateTime<Utc>,
    source_digest: String,
    file_info: FileInfo,
    headers: Vec<String>,
    rows: Vec<Record>,
}

/// Preview cache over an injected key-value store
pub struct PreviewCache<S: KeyValueStore> {
    store: S,
    row_cap: usize,
}

impl<S: KeyValueStore> PreviewCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            row_cap: crate::PREVIEW_ROW_CAP,
        }
    }

    /// Cache with a custom persisted-row cap
    pub fn with_row_cap(store: S, row_cap: usize) -> Self {
        Self { store, row_cap }
    }

    /// Persist a snapshot under the versioned key, overwriting any
    /// previous one.
    ///
    /// The persisted copy keeps at most `row_cap` rows to bound storage
    /// size; restoring such a snapshot is lossy. The caller's in-memory
    /// table is not touched.
    pub fn save(&mut self, snapshot: &PreviewSnapshot) -> Result<()> {
        let rows: Vec<Record> = snapshot
            .table
            .rows
            .iter()
            .take(self.row_cap)
            .cloned()
            .collect();

        if rows.len() < snapshot.table.row_count() {
            log::info!(
                "Persisting {} of {} rows (preview row cap)",
                rows.len(),
                snapshot.table.row_count()
            );
        }

        let cached = CachedPreview {
            format_version: crate::FORMAT_VERSION.to_string(),
            created: Utc::now(),
            source_digest: snapshot.source_digest.clone(),
            file_info: snapshot.file_info.clone(),
            headers: snapshot.table.headers.clone(),
            rows,
        };

        let content = serde_json::to_string_pretty(&cached)?;
        self.store
            .set(PREVIEW_KEY, &content)
            .map_err(|e| SheetviewError::cache(format!("failed to persist preview: {}", e)))?;

        log::info!("Cached preview of '{}'", cached.file_info.name);
        Ok(())
    }

    /// Restore the last persisted snapshot.
    ///
    /// Absent, corrupt, and degenerate content all yield `None`; cache
    /// problems are never surfaced as errors.
    pub fn load(&self) -> Option<PreviewSnapshot> {
        let content = match self.store.get(PREVIEW_KEY) {
            Ok(Some(content)) => content,
            Ok(None) => return None,
            Err(e) => {
                log::debug!("Preview cache unreadable: {}", e);
                return None;
            }
        };

        let cached: CachedPreview = match serde_json::from_str(&content) {
            Ok(cached) => cached,
            Err(e) => {
                log::debug!("Discarding corrupt preview cache: {}", e);
                return None;
            }
        };

        if cached.format_version != crate::FORMAT_VERSION {
            log::debug!(
                "Discarding preview cache with format version {}",
                cached.format_version
            );
            return None;
        }

        if cached.headers.is_empty() {
            log::debug!("Discarding degenerate preview cache: no headers");
            return None;
        }

        Some(PreviewSnapshot {
            file_info: cached.file_info,
            table: Table::new(cached.headers, cached.rows),
            source_digest: cached.source_digest,
        })
    }

    /// Remove the persisted snapshot unconditionally
    pub fn clear(&mut self) -> Result<()> {
        self.store
            .remove(PREVIEW_KEY)
            .map_err(|e| SheetviewError::cache(format!("failed to clear preview: {}", e)))
    }
}
