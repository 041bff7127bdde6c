use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use super::{last_update_key, parse_timestamp, StorageBackend, DEFAULT_STORAGE_KEY};
use crate::{
    errors::{FinanceError, Result},
    utils::persistence::{ensure_dir, read_optional, write_atomic},
};

const DOCUMENT_EXTENSION: &str = "json";

/// Filesystem-backed persistence: `<dir>/<key>.json` plus `<dir>/<key>_lastUpdate`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    document_path: PathBuf,
    last_update_path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_key(dir, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(dir: impl Into<PathBuf>, key: &str) -> Result<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self {
            document_path: dir.join(format!("{key}.{DOCUMENT_EXTENSION}")),
            last_update_path: dir.join(last_update_key(key)),
        })
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    pub fn last_update_path(&self) -> &Path {
        &self.last_update_path
    }
}

fn persistence_error(path: &Path, err: std::io::Error) -> FinanceError {
    FinanceError::Persistence(format!("failed to write `{}`: {}", path.display(), err))
}

impl StorageBackend for JsonFileStorage {
    fn load_document(&self) -> Result<Option<String>> {
        Ok(read_optional(&self.document_path)?)
    }

    fn save_document(&self, document: &str) -> Result<()> {
        write_atomic(&self.document_path, document)
            .map_err(|err| persistence_error(&self.document_path, err))
    }

    fn load_last_update(&self) -> Result<Option<DateTime<Utc>>> {
        let raw = read_optional(&self.last_update_path)?;
        Ok(raw.as_deref().and_then(parse_timestamp))
    }

    fn save_last_update(&self, at: DateTime<Utc>) -> Result<()> {
        let stamp = at.to_rfc3339_opts(SecondsFormat::Millis, true);
        write_atomic(&self.last_update_path, &stamp)
            .map_err(|err| persistence_error(&self.last_update_path, err))
    }

    fn describe(&self) -> String {
        self.document_path.display().to_string()
    }
}
