use serde::Serialize;

use crate::domain::{Amounted, Category, Transaction, TransactionKind};

/// Income, expense, and balance sums over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthTotals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub count: usize,
}

impl MonthTotals {
    pub fn from_transactions<'a, T>(transactions: impl IntoIterator<Item = &'a T>) -> Self
    where
        T: Amounted + 'a,
    {
        let (income, expenses, count) =
            transactions
                .into_iter()
                .fold((0.0, 0.0, 0usize), |(income, expenses, count), txn| {
                    match txn.kind() {
                        TransactionKind::Income => (income + txn.amount(), expenses, count + 1),
                        TransactionKind::Expense => (income, expenses + txn.amount(), count + 1),
                    }
                });
        Self::from_parts(income, expenses, count)
    }

    pub fn from_parts(income: f64, expenses: f64, count: usize) -> Self {
        Self {
            income,
            expenses,
            balance: income - expenses,
            count,
        }
    }

    /// Sums two totals; the balance is recomputed rather than added.
    pub fn combine(self, other: MonthTotals) -> Self {
        Self::from_parts(
            self.income + other.income,
            self.expenses + other.expenses,
            self.count + other.count,
        )
    }

    /// Sign of the balance as printed: rounded to cents, so drift such as
    /// `0.3 - (0.1 + 0.2)` counts as zero.
    pub fn is_non_negative(&self) -> bool {
        (self.balance * 100.0).round() >= 0.0
    }
}

/// Running sum for a single category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
    pub count: usize,
}

/// Per-category sums split by direction, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub income: Vec<CategoryTotal>,
    pub expenses: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut breakdown = Self::default();
        for txn in transactions {
            let bucket = match txn.kind {
                TransactionKind::Income => &mut breakdown.income,
                TransactionKind::Expense => &mut breakdown.expenses,
            };
            match bucket.iter_mut().find(|entry| entry.category == txn.category) {
                Some(entry) => {
                    entry.amount += txn.amount;
                    entry.count += 1;
                }
                None => bucket.push(CategoryTotal {
                    category: txn.category.clone(),
                    amount: txn.amount,
                    count: 1,
                }),
            }
        }
        breakdown
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty()
    }

    pub fn expense_for(&self, category: &Category) -> f64 {
        self.expenses
            .iter()
            .find(|entry| &entry.category == category)
            .map(|entry| entry.amount)
            .unwrap_or(0.0)
    }

    pub fn income_for(&self, category: &Category) -> f64 {
        self.income
            .iter()
            .find(|entry| &entry.category == category)
            .map(|entry| entry.amount)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::TransactionId;

    fn txn(id: u64, amount: f64, kind: TransactionKind, category: Category) -> Transaction {
        Transaction {
            id: TransactionId::from_u64(id),
            description: format!("txn {id}"),
            amount,
            kind,
            category,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn totals_split_income_and_expenses() {
        let items = vec![
            txn(1, 5000.0, TransactionKind::Income, Category::Salary),
            txn(2, 1200.0, TransactionKind::Expense, Category::Housing),
            txn(3, 300.0, TransactionKind::Expense, Category::Food),
        ];
        let totals = MonthTotals::from_transactions(&items);
        assert_eq!(totals.income, 5000.0);
        assert_eq!(totals.expenses, 1500.0);
        assert_eq!(totals.balance, 3500.0);
        assert_eq!(totals.count, 3);
        assert!(totals.is_non_negative());
    }

    #[test]
    fn empty_totals_are_zero() {
        let totals = MonthTotals::from_transactions(Vec::<Transaction>::new().iter());
        assert_eq!(totals, MonthTotals::default());
        assert!(totals.is_non_negative());
    }

    #[test]
    fn combine_recomputes_balance() {
        let a = MonthTotals::from_parts(100.0, 250.0, 2);
        let b = MonthTotals::from_parts(400.0, 50.0, 1);
        let sum = a.combine(b);
        assert_eq!(sum.balance, sum.income - sum.expenses);
        assert_eq!(sum.count, 3);
        assert!(!a.is_non_negative());
    }

    #[test]
    fn balance_sign_follows_the_rounded_cents() {
        let drift = MonthTotals::from_parts(0.3, 0.1 + 0.2, 3);
        assert!(drift.balance < 0.0);
        assert!(drift.is_non_negative());
        assert!(MonthTotals::from_parts(0.0, 0.004, 1).is_non_negative());
        assert!(!MonthTotals::from_parts(0.0, 0.01, 1).is_non_negative());
    }

    #[test]
    fn breakdown_groups_by_category_in_first_seen_order() {
        let items = vec![
            txn(1, 30.0, TransactionKind::Expense, Category::Food),
            txn(2, 80.0, TransactionKind::Expense, Category::Transport),
            txn(3, 20.0, TransactionKind::Expense, Category::Food),
            txn(4, 900.0, TransactionKind::Income, Category::Freelance),
        ];
        let breakdown = CategoryBreakdown::from_transactions(&items);
        let order: Vec<&Category> = breakdown.expenses.iter().map(|e| &e.category).collect();
        assert_eq!(order, vec![&Category::Food, &Category::Transport]);
        assert_eq!(breakdown.expense_for(&Category::Food), 50.0);
        assert_eq!(breakdown.expenses[0].count, 2);
        assert_eq!(breakdown.income_for(&Category::Freelance), 900.0);
        assert_eq!(breakdown.income_for(&Category::Salary), 0.0);
    }
}
