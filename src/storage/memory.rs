use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::StorageBackend;
use crate::errors::{FinanceError, Result};

#[derive(Debug, Default)]
struct MemoryState {
    document: Option<String>,
    last_update: Option<DateTime<Utc>>,
    fail_writes: bool,
    writes: usize,
}

/// In-process backend. Clones share the same state, so a test can keep a
/// handle after boxing one into a store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `document` already persisted.
    pub fn with_document(document: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.lock().document = Some(document.into());
        storage
    }

    /// Makes every subsequent write fail, as a full or disabled browser store would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    pub fn document(&self) -> Option<String> {
        self.lock().document.clone()
    }

    /// Number of successful document writes.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StorageBackend for MemoryStorage {
    fn load_document(&self) -> Result<Option<String>> {
        Ok(self.lock().document.clone())
    }

    fn save_document(&self, document: &str) -> Result<()> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(FinanceError::Persistence("storage quota exceeded".into()));
        }
        state.document = Some(document.to_string());
        state.writes += 1;
        Ok(())
    }

    fn load_last_update(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.lock().last_update)
    }

    fn save_last_update(&self, at: DateTime<Utc>) -> Result<()> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(FinanceError::Persistence("storage quota exceeded".into()));
        }
        state.last_update = Some(at);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}
