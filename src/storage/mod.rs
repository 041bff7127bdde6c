pub mod json_backend;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod local_storage;
pub mod memory;

use chrono::{DateTime, Utc};

use crate::errors::Result;

/// Key under which the backup document is kept.
pub const DEFAULT_STORAGE_KEY: &str = "financialData";

/// Abstraction over persistence backends holding the backup document and its last-update stamp.
pub trait StorageBackend: Send + Sync {
    /// Raw persisted document, or `None` when nothing has been stored yet.
    fn load_document(&self) -> Result<Option<String>>;
    fn save_document(&self, document: &str) -> Result<()>;
    fn load_last_update(&self) -> Result<Option<DateTime<Utc>>>;
    fn save_last_update(&self, at: DateTime<Utc>) -> Result<()>;
    /// Human-readable location, used in logs and `info` output.
    fn describe(&self) -> String;
}

/// Companion key for the last-update timestamp, e.g. `financialData_lastUpdate`.
pub fn last_update_key(key: &str) -> String {
    format!("{key}_lastUpdate")
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

pub use json_backend::JsonFileStorage;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use local_storage::LocalStorageBackend;
pub use memory::MemoryStorage;
