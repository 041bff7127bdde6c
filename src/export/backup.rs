use crate::{
    errors::{FinanceError, Result},
    ledger::{document, LoadReport, MonthlyLedger},
};

/// Full-fidelity snapshot of all twelve buckets as pretty-printed JSON.
pub fn to_backup(ledger: &MonthlyLedger) -> Result<String> {
    Ok(serde_json::to_string_pretty(ledger)?)
}

/// Parses and validates a backup document without touching any existing state.
///
/// The top level must be an object; anything else is rejected. Missing months
/// are healed and keys that are not month indices are dropped with a warning.
pub fn from_backup(raw: &str) -> Result<LoadReport> {
    let report = document::parse_document(raw)
        .map_err(|err| FinanceError::ImportValidation(err.to_string()))?;
    if !report.ignored_keys.is_empty() {
        tracing::warn!(keys = ?report.ignored_keys, "backup contains keys that are not months");
    }
    Ok(report)
}
