use std::fmt::Write as _;

use chrono::{DateTime, TimeZone};

use crate::{
    currency::{format_currency, format_date, format_timestamp, LocaleConfig},
    domain::{CategoryLabels, Month, Transaction},
    ledger::{MonthTotals, MonthlyLedger},
};

const TITLE: &str = "=== CONTROLE FINANCEIRO PESSOAL ===";
const SUMMARY_TITLE: &str = "=== RESUMO GERAL ===";
const SEPARATOR_WIDTH: usize = 50;

/// Formatting inputs for the text report.
#[derive(Debug, Clone, Default)]
pub struct ReportStyle {
    pub locale: LocaleConfig,
    pub labels: CategoryLabels,
}

impl ReportStyle {
    pub fn new(locale: LocaleConfig, labels: CategoryLabels) -> Self {
        Self { locale, labels }
    }
}

/// Renders the human-readable export.
///
/// Months without transactions are skipped; the closing summary still covers
/// every month. Rows are sorted by date on a copy, stored buckets keep their order.
pub fn render_report<Tz>(
    ledger: &MonthlyLedger,
    style: &ReportStyle,
    generated_at: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(
        out,
        "Exportado em: {}\n",
        format_timestamp(&style.locale, generated_at)
    );

    let mut grand = MonthTotals::default();
    for (month, transactions) in ledger.months() {
        if transactions.is_empty() {
            continue;
        }
        let totals = render_month(&mut out, style, month, &ledger.sorted_by_date(month));
        grand = grand.combine(totals);
    }

    let _ = writeln!(out, "\n{SUMMARY_TITLE}");
    let _ = writeln!(
        out,
        "Total de Receitas: {}",
        format_currency(&style.locale, grand.income)
    );
    let _ = writeln!(
        out,
        "Total de Despesas: {}",
        format_currency(&style.locale, grand.expenses)
    );
    let _ = writeln!(
        out,
        "Saldo Total: {} {}",
        format_currency(&style.locale, grand.balance),
        balance_marker(&grand)
    );
    let _ = writeln!(out, "Total de Transações: {}", grand.count);
    out
}

fn render_month(
    out: &mut String,
    style: &ReportStyle,
    month: Month,
    rows: &[&Transaction],
) -> MonthTotals {
    let _ = writeln!(out, "\n--- {} ---", month.name().to_uppercase());
    for txn in rows {
        let _ = writeln!(
            out,
            "{} | {} | {} | {} | {}",
            format_date(&style.locale, txn.date),
            txn.kind.report_label(),
            style.labels.label(&txn.category),
            format_currency(&style.locale, txn.amount),
            txn.description
        );
    }

    let totals = MonthTotals::from_transactions(rows.iter().copied());
    let _ = writeln!(out, "\nResumo do mês:");
    let _ = writeln!(
        out,
        " Receitas: {}",
        format_currency(&style.locale, totals.income)
    );
    let _ = writeln!(
        out,
        " Despesas: {}",
        format_currency(&style.locale, totals.expenses)
    );
    let _ = writeln!(
        out,
        " Saldo: {} {}",
        format_currency(&style.locale, totals.balance),
        balance_marker(&totals)
    );
    let _ = writeln!(out, " Total de transações: {}", totals.count);
    let _ = writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH));
    totals
}

pub fn balance_marker(totals: &MonthTotals) -> &'static str {
    if totals.is_non_negative() {
        "✓"
    } else {
        "⚠"
    }
}
