#![doc(test(attr(deny(warnings))))]

//! Finance Core is the data engine of a personal finance tracker: a
//! month-partitioned transaction store with totals, plus JSON backup and
//! plain-text report export.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use crate::core::{DataInfo, FinanceStore, ImportSummary, LoadOutcome};
pub use domain::{Category, Month, Transaction, TransactionDraft, TransactionId, TransactionKind};
pub use errors::{FinanceError, Result};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
