//! Conversion between the persisted JSON document and [`MonthlyLedger`].
//!
//! The document is an object keyed by month index (`"0"` … `"11"`), each value
//! an array of transactions. Missing or `null` months are healed to empty
//! buckets; keys that are not month indices are dropped and reported.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    domain::{Month, Transaction},
    ledger::MonthlyLedger,
};

/// Reasons a document cannot be turned into a ledger.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("expected an object keyed by month, found {0}")]
    NotAnObject(&'static str),
    #[error("month `{key}` is invalid: {message}")]
    Bucket { key: String, message: String },
}

/// Ledger produced from a document plus what had to be repaired on the way.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub ledger: MonthlyLedger,
    pub healed_months: Vec<Month>,
    pub ignored_keys: Vec<String>,
}

impl LoadReport {
    pub fn was_healed(&self) -> bool {
        !self.healed_months.is_empty() || !self.ignored_keys.is_empty()
    }
}

/// Parses raw document text.
pub fn parse_document(raw: &str) -> Result<LoadReport, DocumentError> {
    let value: Value = serde_json::from_str(raw)?;
    from_value(value)
}

/// Validates the top-level shape and converts every bucket.
///
/// Nothing is produced unless the whole document is valid.
pub fn from_value(value: Value) -> Result<LoadReport, DocumentError> {
    match value {
        Value::Object(map) => from_map(map),
        other => Err(DocumentError::NotAnObject(value_kind(&other))),
    }
}

fn from_map(map: Map<String, Value>) -> Result<LoadReport, DocumentError> {
    let mut ledger = MonthlyLedger::new();
    let mut present = [false; Month::COUNT];
    let mut ignored_keys = Vec::new();

    for (key, value) in map {
        let Some(month) = key.trim().parse::<usize>().ok().and_then(Month::new) else {
            ignored_keys.push(key);
            continue;
        };
        if present[month.index()] {
            ignored_keys.push(key);
            continue;
        }
        let bucket: Option<Vec<Transaction>> =
            serde_json::from_value(value).map_err(|err| DocumentError::Bucket {
                key: key.clone(),
                message: err.to_string(),
            })?;
        if let Some(transactions) = bucket {
            present[month.index()] = true;
            *ledger.bucket_mut(month) = transactions;
        }
    }

    let healed_months = Month::all()
        .filter(|month| !present[month.index()])
        .collect();
    Ok(LoadReport {
        ledger,
        healed_months,
        ignored_keys,
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
