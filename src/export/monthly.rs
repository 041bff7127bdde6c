use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    domain::{CategoryLabels, Month, TransactionId, TransactionKind},
    ledger::{CategoryBreakdown, CategoryTotal, MonthTotals, MonthlyLedger},
};

/// One transaction line with its display label resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category_label: String,
    pub amount: f64,
    pub description: String,
}

/// Category-based summary of a single month, as shown on the reports screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub month: Month,
    pub rows: Vec<ReportRow>,
    pub totals: MonthTotals,
    /// `(label, amount)` in first-seen order.
    pub income_by_category: Vec<(String, f64)>,
    pub expenses_by_category: Vec<(String, f64)>,
}

impl MonthlyReport {
    pub fn build(ledger: &MonthlyLedger, month: Month, labels: &CategoryLabels) -> Self {
        let rows = ledger
            .sorted_by_date(month)
            .into_iter()
            .map(|txn| ReportRow {
                id: txn.id.clone(),
                date: txn.date,
                kind: txn.kind,
                category_label: labels.label(&txn.category).to_string(),
                amount: txn.amount,
                description: txn.description.clone(),
            })
            .collect();
        let CategoryBreakdown { income, expenses } = ledger.category_breakdown(month);
        let labelled = |entries: Vec<CategoryTotal>| -> Vec<(String, f64)> {
            entries
                .into_iter()
                .map(|entry| (labels.label(&entry.category).to_string(), entry.amount))
                .collect()
        };
        Self {
            month,
            rows,
            totals: ledger.month_totals(month),
            income_by_category: labelled(income),
            expenses_by_category: labelled(expenses),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
