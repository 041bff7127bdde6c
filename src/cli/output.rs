use std::fmt;

use colored::Colorize;

use crate::{
    currency::{format_currency, LocaleConfig},
    ledger::MonthTotals,
};

pub fn section(title: impl fmt::Display) {
    println!("{}", format!("=== {} ===", title).bold());
}

pub fn success(message: impl fmt::Display) {
    println!("{} {}", "[✓]".green(), message);
}

pub fn warning(message: impl fmt::Display) {
    eprintln!("{} {}", "[!]".yellow(), message);
}

/// `R$ 3800,00 ✓` in green, or the negative balance with `⚠` in red.
pub fn balance_text(locale: &LocaleConfig, totals: &MonthTotals) -> String {
    let amount = format_currency(locale, totals.balance);
    if totals.is_non_negative() {
        format!("{} ✓", amount).green().to_string()
    } else {
        format!("{} ⚠", amount).red().to_string()
    }
}

pub fn totals(locale: &LocaleConfig, totals: &MonthTotals) {
    println!("Receitas:   {}", format_currency(locale, totals.income));
    println!("Despesas:   {}", format_currency(locale, totals.expenses));
    println!("Saldo:      {}", balance_text(locale, totals));
    println!("Transações: {}", totals.count);
}
