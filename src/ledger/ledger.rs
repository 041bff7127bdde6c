use std::collections::HashSet;

use serde::{ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};

use super::{
    document,
    totals::{CategoryBreakdown, MonthTotals},
};
use crate::domain::{Identifiable, Month, Transaction, TransactionId};

/// Twelve month buckets of transactions. Every bucket always exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyLedger {
    buckets: [Vec<Transaction>; Month::COUNT],
}

impl MonthlyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, month: Month) -> &[Transaction] {
        &self.buckets[month.index()]
    }

    pub(crate) fn bucket_mut(&mut self, month: Month) -> &mut Vec<Transaction> {
        &mut self.buckets[month.index()]
    }

    /// Bucket by raw index; out-of-range indices yield an empty slice.
    pub fn transactions(&self, index: usize) -> &[Transaction] {
        Month::new(index).map(|month| self.bucket(month)).unwrap_or(&[])
    }

    pub fn months(&self) -> impl Iterator<Item = (Month, &[Transaction])> {
        Month::all().map(move |month| (month, self.bucket(month)))
    }

    /// All transactions, January through December.
    pub fn all_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.buckets.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Textual form of every id, used to reject collisions across all months.
    pub fn id_keys(&self) -> HashSet<String> {
        self.all_transactions()
            .map(|txn| txn.id.to_string())
            .collect()
    }

    pub fn find(&self, month: Month, id: &TransactionId) -> Option<&Transaction> {
        self.bucket(month).iter().find(|txn| txn.id().matches(id))
    }

    pub fn push(&mut self, month: Month, transaction: Transaction) {
        self.bucket_mut(month).push(transaction);
    }

    /// Replaces the transaction with `id` inside `month`, keeping the stored id
    /// as it was written. Other months are not searched.
    pub fn replace(&mut self, month: Month, id: &TransactionId, transaction: Transaction) -> bool {
        match self.bucket_mut(month).iter_mut().find(|txn| txn.id().matches(id)) {
            Some(slot) => {
                let stored = std::mem::replace(slot, transaction);
                slot.id = stored.id;
                true
            }
            None => false,
        }
    }

    /// Removes every entry with `id` from `month`, returning whether anything was removed.
    pub fn remove(&mut self, month: Month, id: &TransactionId) -> bool {
        let bucket = self.bucket_mut(month);
        let before = bucket.len();
        bucket.retain(|txn| !txn.id().matches(id));
        bucket.len() != before
    }

    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
    }

    pub fn month_totals(&self, month: Month) -> MonthTotals {
        MonthTotals::from_transactions(self.bucket(month))
    }

    pub fn year_totals(&self) -> MonthTotals {
        MonthTotals::from_transactions(self.all_transactions())
    }

    pub fn category_breakdown(&self, month: Month) -> CategoryBreakdown {
        CategoryBreakdown::from_transactions(self.bucket(month))
    }

    /// Bucket contents ordered by ascending date; ties keep insertion order.
    pub fn sorted_by_date(&self, month: Month) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.bucket(month).iter().collect();
        sorted.sort_by_key(|txn| txn.date);
        sorted
    }

    /// Bucket contents ordered newest first, as transaction lists display them.
    pub fn newest_first(&self, month: Month) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.bucket(month).iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Compares contents month by month while ignoring order inside each bucket.
    pub fn same_contents(&self, other: &MonthlyLedger) -> bool {
        self.buckets
            .iter()
            .zip(other.buckets.iter())
            .all(|(ours, theirs)| same_multiset(ours, theirs))
    }
}

fn same_multiset(left: &[Transaction], right: &[Transaction]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut used = vec![false; right.len()];
    left.iter().all(|txn| {
        match right
            .iter()
            .enumerate()
            .position(|(idx, candidate)| !used[idx] && candidate == txn)
        {
            Some(idx) => {
                used[idx] = true;
                true
            }
            None => false,
        }
    })
}

impl Serialize for MonthlyLedger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(Month::COUNT))?;
        for (month, transactions) in self.months() {
            map.serialize_entry(&month.index().to_string(), transactions)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MonthlyLedger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        document::from_value(value)
            .map(|report| report.ledger)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{Category, TransactionKind};

    fn month(index: usize) -> Month {
        Month::new(index).unwrap()
    }

    fn txn(id: u64, day: u32, kind: TransactionKind, amount: f64) -> Transaction {
        Transaction {
            id: TransactionId::from_u64(id),
            description: format!("txn {id}"),
            amount,
            kind,
            category: Category::Other,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        }
    }

    #[test]
    fn new_ledger_has_twelve_empty_buckets() {
        let ledger = MonthlyLedger::new();
        assert_eq!(ledger.months().count(), 12);
        assert!(ledger.is_empty());
        assert!(ledger.transactions(12).is_empty());
        assert!(ledger.transactions(usize::MAX).is_empty());
    }

    #[test]
    fn replace_and_remove_only_touch_the_given_month() {
        let mut ledger = MonthlyLedger::new();
        ledger.push(month(0), txn(1, 1, TransactionKind::Income, 10.0));
        ledger.push(month(1), txn(2, 1, TransactionKind::Income, 20.0));

        let id = TransactionId::from_u64(2);
        assert!(!ledger.replace(month(0), &id, txn(2, 2, TransactionKind::Expense, 1.0)));
        assert!(!ledger.remove(month(0), &id));
        assert_eq!(ledger.bucket(month(1))[0].amount, 20.0);

        assert!(ledger.remove(month(1), &id));
        assert!(!ledger.remove(month(1), &id));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn lookups_accept_a_numeric_id_for_a_text_id_record() {
        let mut ledger = MonthlyLedger::new();
        let mut imported = txn(0, 1, TransactionKind::Expense, 9.0);
        imported.id = TransactionId::Text("123".into());
        ledger.push(month(0), imported);

        let typed = TransactionId::from_u64(123);
        assert!(ledger.find(month(0), &typed).is_some());
        assert!(ledger.replace(month(0), &typed, txn(123, 2, TransactionKind::Expense, 4.0)));
        assert_eq!(ledger.bucket(month(0))[0].amount, 4.0);
        assert_eq!(ledger.bucket(month(0))[0].id, TransactionId::Text("123".into()));
        assert!(ledger.remove(month(0), &typed));
        assert!(ledger.is_empty());
    }

    #[test]
    fn serializes_every_month_key_in_order() {
        let mut ledger = MonthlyLedger::new();
        ledger.push(month(3), txn(1, 1, TransactionKind::Expense, 5.0));
        let json = serde_json::to_string(&ledger).unwrap();
        assert!(json.starts_with("{\"0\":[],\"1\":[],\"2\":[],\"3\":[{"));
        assert!(json.ends_with("\"10\":[],\"11\":[]}"));

        let back: MonthlyLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }

    #[test]
    fn sorting_does_not_mutate_the_bucket() {
        let mut ledger = MonthlyLedger::new();
        ledger.push(month(0), txn(1, 5, TransactionKind::Income, 5000.0));
        ledger.push(month(0), txn(2, 1, TransactionKind::Expense, 1200.0));
        ledger.push(month(0), txn(3, 3, TransactionKind::Expense, 10.0));

        let ascending: Vec<u32> = ledger
            .sorted_by_date(month(0))
            .iter()
            .map(|t| chrono::Datelike::day(&t.date))
            .collect();
        assert_eq!(ascending, vec![1, 3, 5]);
        let descending: Vec<u32> = ledger
            .newest_first(month(0))
            .iter()
            .map(|t| chrono::Datelike::day(&t.date))
            .collect();
        assert_eq!(descending, vec![5, 3, 1]);
        assert_eq!(ledger.bucket(month(0))[0].id, TransactionId::from_u64(1));
    }

    #[test]
    fn same_contents_ignores_bucket_order() {
        let mut a = MonthlyLedger::new();
        a.push(month(0), txn(1, 1, TransactionKind::Income, 1.0));
        a.push(month(0), txn(2, 2, TransactionKind::Income, 2.0));
        let mut b = MonthlyLedger::new();
        b.push(month(0), txn(2, 2, TransactionKind::Income, 2.0));
        b.push(month(0), txn(1, 1, TransactionKind::Income, 1.0));
        assert_ne!(a, b);
        assert!(a.same_contents(&b));

        b.push(month(1), txn(3, 3, TransactionKind::Income, 3.0));
        assert!(!a.same_contents(&b));
    }
}
