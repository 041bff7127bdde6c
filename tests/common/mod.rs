#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::{NaiveDate, TimeZone, Utc};
use finance_core::{
    core::FixedClock,
    storage::{JsonFileStorage, MemoryStorage},
    FinanceStore, TransactionDraft, TransactionKind,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn fixed_clock() -> Box<FixedClock> {
    Box::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 1, 10, 15, 30, 0).unwrap(),
    ))
}

/// Store over shared in-memory storage; the returned handle observes writes.
pub fn memory_store() -> (FinanceStore, MemoryStorage) {
    let storage = MemoryStorage::new();
    let store = FinanceStore::open_with_clock(Box::new(storage.clone()), fixed_clock());
    (store, storage)
}

/// Store persisting to a fresh temp directory.
pub fn file_store() -> (FinanceStore, PathBuf) {
    let dir = temp_dir();
    let storage = JsonFileStorage::new(&dir).expect("create json file storage");
    (
        FinanceStore::open_with_clock(Box::new(storage), fixed_clock()),
        dir,
    )
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn salary() -> TransactionDraft {
    TransactionDraft::new("Salary", 5000.0, TransactionKind::Income, "salary", date(2024, 1, 5))
}

pub fn rent() -> TransactionDraft {
    TransactionDraft::new("Rent", 1200.0, TransactionKind::Expense, "housing", date(2024, 1, 1))
}
