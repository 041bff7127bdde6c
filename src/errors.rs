use thiserror::Error;

use crate::domain::TransactionId;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FinanceError>;

/// Error type that captures every failure the store and serializer can report.
#[derive(Debug, Error)]
pub enum FinanceError {
    /// Writing to the storage backend failed (quota exceeded, storage disabled, I/O).
    /// In-memory state is still valid; the caller may retry with `FinanceStore::persist`.
    #[error("Persistence error: {0}")]
    Persistence(String),
    /// Persisted bytes exist but could not be understood.
    #[error("Stored data is corrupted: {0}")]
    LoadCorruption(String),
    /// A supplied backup document was rejected; existing state is untouched.
    #[error("Invalid backup: {0}")]
    ImportValidation(String),
    #[error("Transaction {id} not found in month {month}")]
    NotFound { month: usize, id: TransactionId },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Month index {0} is out of range (expected 0-11)")]
    InvalidMonth(usize),
    #[error("Invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FinanceError {
    /// Returns `true` for failures that leave the in-memory state ahead of storage.
    pub fn is_persistence(&self) -> bool {
        matches!(self, FinanceError::Persistence(_))
    }
}
