use chrono::{DateTime, SecondsFormat, Utc};
use gloo::storage::{LocalStorage, Storage};

use super::{last_update_key, parse_timestamp, StorageBackend, DEFAULT_STORAGE_KEY};
use crate::errors::{FinanceError, Result};

/// Browser `localStorage` backend using the keys `financialData` and
/// `financialData_lastUpdate`.
#[derive(Debug, Clone)]
pub struct LocalStorageBackend {
    key: String,
    last_update_key: String,
}

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self::with_key(DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(key: &str) -> Self {
        Self {
            key: key.to_string(),
            last_update_key: last_update_key(key),
        }
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|err| {
                FinanceError::LoadCorruption(format!("localStorage read failed: {err:?}"))
            })
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| FinanceError::Persistence(format!("localStorage write failed: {err:?}")))
    }
}

impl Default for LocalStorageBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for LocalStorageBackend {
    fn load_document(&self) -> Result<Option<String>> {
        self.read(&self.key)
    }

    fn save_document(&self, document: &str) -> Result<()> {
        self.write(&self.key, document)
    }

    fn load_last_update(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .read(&self.last_update_key)?
            .as_deref()
            .and_then(parse_timestamp))
    }

    fn save_last_update(&self, at: DateTime<Utc>) -> Result<()> {
        self.write(
            &self.last_update_key,
            &at.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }

    fn describe(&self) -> String {
        format!("localStorage:{}", self.key)
    }
}
