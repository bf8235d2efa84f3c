//! Most-recently-used store for activated palette items.
//!
//! Entries are kept newest first, deduplicated by `(kind, id)` and capped at
//! a fixed capacity; the oldest entry is evicted when a new one arrives.
//! The list is read once at startup and written back after every mutation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::search::{ResultData, ResultKey, ResultKind, SearchResult};
use crate::error::{EncoreError, EncoreResult};

/// Default number of entries kept.
pub const DEFAULT_CAPACITY: usize = 10;

/// A previously activated item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecencyEntry {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ResultKind,

    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    #[serde(default)]
    pub image: Option<String>,

    /// Unix timestamp in milliseconds of the last activation.
    pub last_used_at: u64,

    /// What is needed to activate the item again.
    pub data: ResultData,
}

impl RecencyEntry {
    pub fn from_result(result: &SearchResult, last_used_at: u64) -> Self {
        Self {
            id: result.id.clone(),
            kind: result.kind,
            title: result.title.clone(),
            subtitle: result.subtitle.clone(),
            image: result.image.clone(),
            last_used_at,
            data: result.data.clone(),
        }
    }

    /// Rebuild the palette row for this entry.
    pub fn to_result(&self) -> SearchResult {
        SearchResult {
            id: self.id.clone(),
            kind: self.kind,
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            image: self.image.clone(),
            data: self.data.clone(),
        }
    }

    pub fn key(&self) -> ResultKey {
        ResultKey {
            kind: self.kind,
            id: self.id.clone(),
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Storage for the recents list. The medium is up to the implementor.
pub trait RecentsBackend: Send {
    fn load(&self) -> EncoreResult<Vec<RecencyEntry>>;
    fn save(&self, entries: &[RecencyEntry]) -> EncoreResult<()>;
}

/// Recents persisted as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecentsBackend for JsonFileBackend {
    fn load(&self) -> EncoreResult<Vec<RecencyEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, entries: &[RecencyEntry]) -> EncoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-process backend. Clones share the same list, which lets callers
/// observe what was saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<Vec<RecencyEntry>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<RecencyEntry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Snapshot of the last saved list.
    pub fn saved(&self) -> Vec<RecencyEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl RecentsBackend for MemoryBackend {
    fn load(&self) -> EncoreResult<Vec<RecencyEntry>> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .map_err(|_| EncoreError::Storage("recents lock poisoned".to_string()))
    }

    fn save(&self, entries: &[RecencyEntry]) -> EncoreResult<()> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| EncoreError::Storage("recents lock poisoned".to_string()))?;
        *guard = entries.to_vec();
        Ok(())
    }
}

/// Bounded, deduplicated MRU list with persistence.
pub struct RecencyStore {
    entries: Vec<RecencyEntry>,
    capacity: usize,
    backend: Box<dyn RecentsBackend>,
}

impl std::fmt::Debug for RecencyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecencyStore")
            .field("entries", &self.entries.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl RecencyStore {
    /// Read the persisted list once.
    ///
    /// A missing or corrupted store yields an empty list; the palette keeps
    /// working without history.
    pub fn load(backend: Box<dyn RecentsBackend>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let entries = match backend.load() {
            Ok(entries) => Self::normalize(entries, capacity),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load recents, starting empty");
                Vec::new()
            }
        };

        Self {
            entries,
            capacity,
            backend,
        }
    }

    /// Store that lives only for this process.
    pub fn in_memory(capacity: usize) -> Self {
        Self::load(Box::new(MemoryBackend::new()), capacity)
    }

    /// Newest first, one entry per key, at most `capacity`.
    fn normalize(mut entries: Vec<RecencyEntry>, capacity: usize) -> Vec<RecencyEntry> {
        // Stable: ties keep their stored order
        entries.sort_by(|a, b| b.last_used_at.cmp(&a.last_used_at));

        let mut seen = HashSet::new();
        entries.retain(|e| seen.insert(e.key()));
        entries.truncate(capacity);
        entries
    }

    /// Record an activation now.
    pub fn record(&mut self, result: &SearchResult) {
        // Never stamp older than the current front, so reloads keep the order
        let newest = self.entries.first().map(|e| e.last_used_at).unwrap_or(0);
        self.record_at(result, now_millis().max(newest));
    }

    /// Move `result` to the front (or insert it there), evict past capacity
    /// and persist.
    pub fn record_at(&mut self, result: &SearchResult, last_used_at: u64) {
        let entry = RecencyEntry::from_result(result, last_used_at);
        let key = entry.key();

        let mut next = Vec::with_capacity(self.capacity);
        next.push(entry);
        next.extend(
            self.entries
                .iter()
                .filter(|e| e.key() != key)
                .take(self.capacity - 1)
                .cloned(),
        );
        self.entries = next;

        self.save();
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.save();
    }

    fn save(&self) {
        if let Err(e) = self.backend.save(&self.entries) {
            tracing::warn!(error = %e, "failed to persist recents");
        }
    }

    pub fn entries(&self) -> &[RecencyEntry] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
