mod common;

use common::{date, file_store, memory_store, rent, salary};
use finance_core::{
    domain::Month,
    storage::{JsonFileStorage, MemoryStorage, StorageBackend},
    FinanceError, FinanceStore, LoadOutcome, TransactionDraft, TransactionId, TransactionKind,
};

#[test]
fn january_scenario_totals() {
    let (mut store, _) = memory_store();
    let salary = store.add_transaction(0, salary()).unwrap();
    assert_eq!(store.transactions(0).len(), 1);
    assert_eq!(store.transactions(0)[0].id, salary.id);

    store.add_transaction(0, rent()).unwrap();
    let totals = store.month_totals(0);
    assert_eq!(totals.income, 5000.0);
    assert_eq!(totals.expenses, 1200.0);
    assert_eq!(totals.balance, 3800.0);
    assert_eq!(totals.count, 2);
}

#[test]
fn every_mutation_persists_the_full_document() {
    let (mut store, storage) = memory_store();
    let txn = store.add_transaction(0, salary()).unwrap();
    assert_eq!(storage.write_count(), 1);

    store.update_transaction(0, &txn.id, rent()).unwrap();
    store.delete_transaction(0, &txn.id).unwrap();
    store.clear_all_data().unwrap();
    assert_eq!(storage.write_count(), 4);

    let document = storage.document().unwrap();
    for month in 0..12 {
        assert!(document.contains(&format!("\"{month}\": []")), "{document}");
    }
}

#[test]
fn rejected_updates_leave_record_and_storage_untouched() {
    let (mut store, storage) = memory_store();
    let txn = store.add_transaction(0, salary()).unwrap();
    let before = store.transactions(0).to_vec();
    let writes = storage.write_count();

    let garbage = TransactionDraft::new(
        "Salary",
        "abc",
        TransactionKind::Income,
        "salary",
        date(2024, 1, 5),
    );
    let err = store.update_transaction(0, &txn.id, garbage).unwrap_err();
    assert!(matches!(err, FinanceError::InvalidAmount(_)), "{err}");
    assert_eq!(store.transactions(0), &before[..]);
    assert_eq!(storage.write_count(), writes);

    let unknown = TransactionId::Text("missing".into());
    assert!(!store.update_transaction(0, &unknown, rent()).unwrap());
    assert_eq!(store.transactions(0), &before[..]);
    assert_eq!(storage.write_count(), writes);
}

#[test]
fn delete_is_idempotent() {
    let (mut store, storage) = memory_store();
    let keep = store.add_transaction(0, salary()).unwrap();
    let gone = store.add_transaction(0, rent()).unwrap();

    store.delete_transaction(0, &gone.id).unwrap();
    let once = store.ledger().clone();
    store.delete_transaction(0, &gone.id).unwrap();
    assert_eq!(store.ledger(), &once);
    assert_eq!(store.transactions(0), &[keep][..]);

    // Unknown ids still persist and never fail.
    store
        .delete_transaction(5, &TransactionId::Text("missing".into()))
        .unwrap();
    assert_eq!(storage.write_count(), 5);
}

#[test]
fn identical_adds_get_distinct_ids_across_months() {
    let (mut store, _) = memory_store();
    let mut ids = std::collections::HashSet::new();
    for month in 0..12 {
        for _ in 0..20 {
            let txn = store.add_transaction(month, salary()).unwrap();
            assert!(ids.insert(txn.id.to_string()), "duplicate id {}", txn.id);
        }
    }
    assert_eq!(store.all_transactions().len(), 240);
}

#[test]
fn all_transactions_follow_month_order() {
    let (mut store, _) = memory_store();
    store.add_transaction(11, salary()).unwrap();
    store.add_transaction(0, rent()).unwrap();
    store.add_transaction(6, salary()).unwrap();
    let descriptions: Vec<&str> = store
        .all_transactions()
        .into_iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(descriptions, ["Rent", "Salary", "Salary"]);
}

#[test]
fn bucket_is_chosen_by_caller_not_by_date() {
    let (mut store, _) = memory_store();
    store.add_transaction(4, salary()).unwrap();
    assert!(store.transactions(0).is_empty());
    assert_eq!(store.transactions(4)[0].date, date(2024, 1, 5));
}

#[test]
fn year_totals_equal_sum_of_months() {
    let (mut store, _) = memory_store();
    for month in [0, 3, 3, 9] {
        store.add_transaction(month, salary()).unwrap();
        store.add_transaction(month, rent()).unwrap();
    }
    let summed = (0..12)
        .map(|m| store.month_totals(m))
        .fold(Default::default(), finance_core::ledger::MonthTotals::combine);
    let year = store.year_totals();
    assert_eq!(year, summed);
    for month in 0..12 {
        let totals = store.month_totals(month);
        assert_eq!(totals.balance, totals.income - totals.expenses);
    }
}

#[test]
fn newest_first_listing_orders_by_date_descending() {
    let (mut store, _) = memory_store();
    store.add_transaction(0, rent()).unwrap();
    store.add_transaction(0, salary()).unwrap();
    store
        .add_transaction(
            0,
            TransactionDraft::new(
                "Bus",
                "4,50",
                TransactionKind::Expense,
                "transport",
                date(2024, 1, 3),
            ),
        )
        .unwrap();
    let listed: Vec<&str> = store
        .transactions_newest_first(0)
        .into_iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(listed, ["Salary", "Bus", "Rent"]);
    assert_eq!(store.transactions(0)[0].description, "Rent");
    assert!(store.transactions_newest_first(40).is_empty());
}

#[test]
fn reopening_file_storage_restores_state() {
    let (mut store, dir) = file_store();
    store.add_transaction(0, salary()).unwrap();
    store.add_transaction(0, rent()).unwrap();
    let before = store.ledger().clone();
    drop(store);

    let storage = JsonFileStorage::new(&dir).unwrap();
    assert!(storage.last_update_path().exists());
    let reopened = FinanceStore::open(Box::new(storage));
    assert_eq!(reopened.load_outcome(), &LoadOutcome::Loaded { healed_months: vec![] });
    assert_eq!(reopened.ledger(), &before);
    assert_eq!(reopened.month_totals(0).balance, 3800.0);
    assert!(reopened.data_info().last_update.is_some());
}

#[test]
fn load_heals_missing_months_three_and_seven() {
    let mut object = serde_json::Map::new();
    for month in (0..12).filter(|m| *m != 3 && *m != 7) {
        object.insert(month.to_string(), serde_json::json!([]));
    }
    object.insert(
        "0".into(),
        serde_json::json!([{
            "id": 1704412800000.123,
            "description": "Salary",
            "amount": 5000,
            "type": "income",
            "category": "salary",
            "date": "2024-01-05"
        }]),
    );
    let storage = MemoryStorage::with_document(serde_json::Value::Object(object).to_string());
    let store = FinanceStore::open(Box::new(storage));

    let healed = vec![Month::new(3).unwrap(), Month::new(7).unwrap()];
    assert_eq!(store.load_outcome(), &LoadOutcome::Loaded { healed_months: healed });
    assert!(store.transactions(3).is_empty());
    assert!(store.transactions(7).is_empty());
    assert_eq!(store.transactions(0).len(), 1);
    assert_eq!(store.transactions(0)[0].id.to_string(), "1704412800000.123");
}

#[test]
fn corrupted_storage_starts_empty_and_recovers_on_write() {
    let storage = MemoryStorage::with_document("definitely not json");
    let mut store = FinanceStore::open(Box::new(storage.clone()));
    assert!(matches!(store.load_outcome(), LoadOutcome::Corrupted { .. }));
    assert!(store.all_transactions().is_empty());

    store.add_transaction(2, salary()).unwrap();
    let document = storage.load_document().unwrap().unwrap();
    assert!(document.contains("Salary"));
}

#[test]
fn failed_persist_is_reported_and_retryable() {
    let (mut store, storage) = memory_store();
    store.add_transaction(0, salary()).unwrap();
    storage.set_fail_writes(true);

    let err = store.clear_all_data().unwrap_err();
    assert!(matches!(err, FinanceError::Persistence(_)));
    assert!(store.all_transactions().is_empty());
    assert!(store.is_dirty());
    assert!(store.data_info().dirty);
    assert!(storage.document().unwrap().contains("Salary"));

    storage.set_fail_writes(false);
    store.persist().unwrap();
    assert!(!storage.document().unwrap().contains("Salary"));
}

#[test]
fn string_amounts_are_coerced_and_garbage_rejected() {
    let (mut store, _) = memory_store();
    let txn = store
        .add_transaction(
            1,
            TransactionDraft::parse("Lunch", "32,90", "expense", "food", "2024-02-03").unwrap(),
        )
        .unwrap();
    assert_eq!(txn.amount, 32.9);

    for raw in ["", "abc", "-10"] {
        let draft = TransactionDraft::parse("Lunch", raw, "expense", "food", "2024-02-03").unwrap();
        assert!(matches!(
            store.add_transaction(1, draft),
            Err(FinanceError::InvalidAmount(_))
        ));
    }
    assert_eq!(store.transactions(1).len(), 1);
}
