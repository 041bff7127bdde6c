use std::{fs, path::Path};

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use super::{
    ids::next_id,
    time::{Clock, SystemClock},
};
use crate::{
    domain::{CategoryLabels, Displayable, Month, Transaction, TransactionDraft, TransactionId},
    errors::{FinanceError, Result},
    export::{self, MonthlyReport, ReportStyle},
    ledger::{document, CategoryBreakdown, MonthTotals, MonthlyLedger},
    storage::StorageBackend,
};

/// What `load` found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was stored yet.
    Fresh,
    /// A document was read; `healed_months` were missing and are now empty.
    Loaded { healed_months: Vec<Month> },
    /// Stored data could not be used; the store started empty.
    Corrupted { reason: String },
}

/// Read-only summary for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataInfo {
    pub total_transactions: usize,
    pub last_update: Option<DateTime<Utc>>,
    pub storage: String,
    pub dirty: bool,
}

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub transactions: usize,
    pub healed_months: Vec<Month>,
    pub ignored_keys: Vec<String>,
}

/// Single source of truth for all transactions.
///
/// Every mutation is applied in memory first and then the whole document is
/// written through the backend. When that write fails the change is kept,
/// the store is flagged dirty and [`FinanceError::Persistence`] is returned;
/// [`FinanceStore::persist`] retries.
pub struct FinanceStore {
    ledger: MonthlyLedger,
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
    last_update: Option<DateTime<Utc>>,
    dirty: bool,
    load_outcome: LoadOutcome,
}

impl FinanceStore {
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        Self::open_with_clock(storage, Box::new(SystemClock))
    }

    pub fn open_with_clock(storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>) -> Self {
        let mut store = Self {
            ledger: MonthlyLedger::new(),
            storage,
            clock,
            last_update: None,
            dirty: false,
            load_outcome: LoadOutcome::Fresh,
        };
        store.load();
        store
    }

    /// Replaces in-memory state with what the backend holds. Never fails:
    /// unreadable or malformed data degrades to an empty ledger.
    pub fn load(&mut self) -> LoadOutcome {
        let (ledger, outcome) = match self.storage.load_document() {
            Ok(None) => (MonthlyLedger::new(), LoadOutcome::Fresh),
            Ok(Some(raw)) => match document::parse_document(&raw) {
                Ok(report) => {
                    if report.was_healed() {
                        tracing::warn!(
                            healed = ?report.healed_months,
                            ignored = ?report.ignored_keys,
                            "stored document was repaired on load"
                        );
                    }
                    (
                        report.ledger,
                        LoadOutcome::Loaded {
                            healed_months: report.healed_months,
                        },
                    )
                }
                Err(err) => corrupted(FinanceError::LoadCorruption(err.to_string())),
            },
            Err(err) => corrupted(FinanceError::LoadCorruption(err.to_string())),
        };
        self.last_update = match self.storage.load_last_update() {
            Ok(at) => at,
            Err(err) => {
                tracing::warn!(error = %err, "could not read last update timestamp");
                None
            }
        };
        tracing::debug!(
            storage = %self.storage.describe(),
            transactions = ledger.len(),
            "ledger loaded"
        );
        self.ledger = ledger;
        self.dirty = false;
        self.load_outcome = outcome.clone();
        outcome
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub fn ledger(&self) -> &MonthlyLedger {
        &self.ledger
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    /// Creates a transaction in `month` with a fresh id and returns the stored copy.
    pub fn add_transaction(
        &mut self,
        month: usize,
        draft: TransactionDraft,
    ) -> Result<Transaction> {
        let month = checked_month(month)?;
        let id = next_id(self.clock.now(), &self.ledger.id_keys());
        let transaction = Transaction::from_draft(id, draft)?;
        self.ledger.push(month, transaction.clone());
        tracing::debug!(
            month = month.index(),
            txn = %transaction.display_label(),
            "transaction added"
        );
        self.persist()?;
        Ok(transaction)
    }

    /// Replaces every field except the id. Only `month` is searched; returns
    /// `Ok(false)` without persisting when the id is not there.
    pub fn update_transaction(
        &mut self,
        month: usize,
        id: &TransactionId,
        draft: TransactionDraft,
    ) -> Result<bool> {
        let month = checked_month(month)?;
        let replacement = Transaction::from_draft(id.clone(), draft)?;
        if !self.ledger.replace(month, id, replacement) {
            tracing::debug!(month = month.index(), %id, "update target not found");
            return Ok(false);
        }
        tracing::debug!(month = month.index(), %id, "transaction updated");
        self.persist()?;
        Ok(true)
    }

    /// Removes `id` from `month` if present. Persists either way.
    pub fn delete_transaction(&mut self, month: usize, id: &TransactionId) -> Result<()> {
        let month = checked_month(month)?;
        let removed = self.ledger.remove(month, id);
        tracing::debug!(month = month.index(), %id, removed, "transaction deleted");
        self.persist()
    }

    /// Bucket contents; empty for an empty or out-of-range month.
    pub fn transactions(&self, month: usize) -> &[Transaction] {
        self.ledger.transactions(month)
    }

    pub fn transaction(&self, month: usize, id: &TransactionId) -> Result<&Transaction> {
        let bucket = checked_month(month)?;
        self.ledger
            .find(bucket, id)
            .ok_or_else(|| FinanceError::NotFound {
                month,
                id: id.clone(),
            })
    }

    pub fn transactions_newest_first(&self, month: usize) -> Vec<&Transaction> {
        Month::new(month)
            .map(|month| self.ledger.newest_first(month))
            .unwrap_or_default()
    }

    /// Every transaction, January through December.
    pub fn all_transactions(&self) -> Vec<&Transaction> {
        self.ledger.all_transactions().collect()
    }

    pub fn clear_all_data(&mut self) -> Result<()> {
        let removed = self.ledger.len();
        self.ledger.clear();
        tracing::info!(removed, "all data cleared");
        self.persist()
    }

    /// Income, expense and balance for `month`; zeros when out of range.
    pub fn month_totals(&self, month: usize) -> MonthTotals {
        Month::new(month)
            .map(|month| self.ledger.month_totals(month))
            .unwrap_or_default()
    }

    pub fn year_totals(&self) -> MonthTotals {
        self.ledger.year_totals()
    }

    pub fn category_breakdown(&self, month: usize) -> CategoryBreakdown {
        Month::new(month)
            .map(|month| self.ledger.category_breakdown(month))
            .unwrap_or_default()
    }

    pub fn data_info(&self) -> DataInfo {
        DataInfo {
            total_transactions: self.ledger.len(),
            last_update: self.last_update,
            storage: self.storage.describe(),
            dirty: self.dirty,
        }
    }

    /// Replaces all state with a backup document.
    ///
    /// The document is fully parsed and validated before anything is swapped;
    /// on rejection the current state is untouched.
    pub fn import_backup(&mut self, raw: &str) -> Result<ImportSummary> {
        let report = match export::from_backup(raw) {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(error = %err, "backup rejected");
                return Err(err);
            }
        };
        let summary = ImportSummary {
            transactions: report.ledger.len(),
            healed_months: report.healed_months,
            ignored_keys: report.ignored_keys,
        };
        self.ledger = report.ledger;
        tracing::info!(transactions = summary.transactions, "backup imported");
        self.persist()?;
        Ok(summary)
    }

    /// Reads a backup file and imports it. A read failure leaves state untouched.
    pub fn import_backup_file(&mut self, path: &Path) -> Result<ImportSummary> {
        let raw = fs::read_to_string(path)?;
        self.import_backup(&raw)
    }

    pub fn export_backup(&self) -> Result<String> {
        export::to_backup(&self.ledger)
    }

    /// Text report stamped with the current local time.
    pub fn export_report(&self, style: &ReportStyle) -> String {
        let generated_at = self.clock.now().with_timezone(&Local);
        export::render_report(&self.ledger, style, &generated_at)
    }

    pub fn monthly_report(&self, month: usize, labels: &CategoryLabels) -> Result<MonthlyReport> {
        let month = checked_month(month)?;
        Ok(MonthlyReport::build(&self.ledger, month, labels))
    }

    /// Writes the full document and the last-update stamp.
    pub fn persist(&mut self) -> Result<()> {
        let document = export::to_backup(&self.ledger)?;
        let now = self.clock.now();
        let written = self
            .storage
            .save_document(&document)
            .and_then(|_| self.storage.save_last_update(now));
        match written {
            Ok(()) => {
                self.dirty = false;
                self.last_update = Some(now);
                Ok(())
            }
            Err(err) => {
                self.dirty = true;
                tracing::error!(error = %err, storage = %self.storage.describe(), "persist failed");
                Err(match err {
                    FinanceError::Persistence(_) => err,
                    other => FinanceError::Persistence(other.to_string()),
                })
            }
        }
    }

    /// `true` while in-memory state is ahead of storage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Today's date according to the injected clock.
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }
}

fn checked_month(index: usize) -> Result<Month> {
    Month::new(index).ok_or(FinanceError::InvalidMonth(index))
}

fn corrupted(err: FinanceError) -> (MonthlyLedger, LoadOutcome) {
    tracing::warn!(error = %err, "falling back to an empty ledger");
    (
        MonthlyLedger::new(),
        LoadOutcome::Corrupted {
            reason: err.to_string(),
        },
    )
}
