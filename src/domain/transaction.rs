//! Transaction records and the raw field sets used to create or edit them.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

use crate::{
    domain::{
        category::Category,
        common::{Amounted, Displayable, Identifiable},
    },
    errors::{FinanceError, Result},
};

/// Identifier assigned by the store when a transaction is created.
///
/// Ids are normally integers, but backups written by older builds carry
/// fractional numbers and hand-edited files may carry strings. Both are kept
/// exactly as read so that a load/save cycle never rewrites an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionId {
    Number(Number),
    Text(String),
}

impl TransactionId {
    pub fn from_u64(value: u64) -> Self {
        TransactionId::Number(Number::from(value))
    }

    /// Ids name the same record when their textual forms agree, so a typed
    /// `123` finds a record stored with the string id `"123"`.
    pub fn matches(&self, other: &TransactionId) -> bool {
        match (self, other) {
            (TransactionId::Number(a), TransactionId::Number(b)) => a == b,
            (TransactionId::Text(a), TransactionId::Text(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionId::Number(number) => write!(f, "{number}"),
            TransactionId::Text(text) => f.write_str(text),
        }
    }
}

impl FromStr for TransactionId {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FinanceError::InvalidField {
                field: "id",
                value: s.to_string(),
            });
        }
        Ok(match Number::from_str(trimmed) {
            Ok(number) => TransactionId::Number(number),
            Err(_) => TransactionId::Text(trimmed.to_string()),
        })
    }
}

/// Direction of a transaction. The magnitude lives in `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn key(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Upper-case label used by the exported text report.
    pub fn report_label(self) -> &'static str {
        match self {
            TransactionKind::Income => "RECEITA",
            TransactionKind::Expense => "DESPESA",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TransactionKind {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(FinanceError::InvalidField {
                field: "type",
                value: s.to_string(),
            }),
        }
    }
}

/// One financial event stored in a month bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Category,
    pub date: NaiveDate,
}

impl Transaction {
    /// Builds a transaction from validated draft fields.
    pub fn from_draft(id: TransactionId, draft: TransactionDraft) -> Result<Self> {
        let amount = draft.amount.resolve()?;
        Ok(Self {
            id,
            description: draft.description,
            amount,
            kind: draft.kind,
            category: draft.category,
            date: draft.date,
        })
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &TransactionId {
        &self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn kind(&self) -> TransactionKind {
        self.kind
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("txn:{} [{} {}]", self.id, self.kind, self.date)
    }
}

/// Amount exactly as a form supplied it, before coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Coerces the raw value into a finite, non-negative magnitude.
    ///
    /// Text accepts either `.` or `,` as the decimal separator; when both appear
    /// the dots are treated as thousands separators (`1.234,56`).
    pub fn resolve(&self) -> Result<f64> {
        let value = match self {
            AmountInput::Number(value) => *value,
            AmountInput::Text(raw) => parse_amount_text(raw)?,
        };
        if !value.is_finite() {
            return Err(FinanceError::InvalidAmount(format!(
                "`{}` is not a finite number",
                self
            )));
        }
        if value < 0.0 {
            return Err(FinanceError::InvalidAmount(format!(
                "`{}` is negative; use the transaction type for direction",
                self
            )));
        }
        // Normalises -0.0.
        Ok(value.abs())
    }
}

impl fmt::Display for AmountInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountInput::Number(value) => write!(f, "{value}"),
            AmountInput::Text(raw) => f.write_str(raw),
        }
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

fn parse_amount_text(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FinanceError::InvalidAmount("amount is empty".into()));
    }
    let normalized = match trimmed.rfind(',') {
        // A dot after the last comma, as in `1,234.56`.
        Some(comma) if trimmed[comma..].contains('.') => {
            return Err(FinanceError::InvalidAmount(format!(
                "`{raw}` mixes separators; use `1234,56` or `1.234,56`"
            )));
        }
        Some(_) => trimmed.replace('.', "").replace(',', "."),
        None => trimmed.to_string(),
    };
    let looks_numeric = normalized
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !looks_numeric {
        return Err(FinanceError::InvalidAmount(format!(
            "`{raw}` is not a number"
        )));
    }
    normalized
        .parse::<f64>()
        .map_err(|_| FinanceError::InvalidAmount(format!("`{raw}` is not a number")))
}

fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = AmountInput::deserialize(deserializer)?;
    raw.resolve().map_err(serde::de::Error::custom)
}

/// Field set supplied by a frontend to create or replace a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: AmountInput,
    pub kind: TransactionKind,
    pub category: Category,
    pub date: NaiveDate,
}

impl TransactionDraft {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<AmountInput>,
        kind: TransactionKind,
        category: impl Into<Category>,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            kind,
            category: category.into(),
            date,
        }
    }

    /// Coerces untyped form values. The amount is kept raw and validated by the
    /// store; type and date must already be well formed.
    pub fn parse(
        description: &str,
        amount: &str,
        kind: &str,
        category: &str,
        date: &str,
    ) -> Result<Self> {
        let kind = TransactionKind::from_str(kind)?;
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
            FinanceError::InvalidField {
                field: "date",
                value: date.to_string(),
            }
        })?;
        Ok(Self::new(
            description.trim(),
            AmountInput::from(amount),
            kind,
            Category::from(category.trim()),
            date,
        ))
    }
}
