use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub currency_symbol: String,
    pub decimal_separator: char,
    /// Thousands separator; `None` prints the integer part ungrouped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping_separator: Option<char>,
    pub date_format: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "pt-BR".into(),
            currency_symbol: "R$".into(),
            decimal_separator: ',',
            grouping_separator: None,
            date_format: "%d/%m/%Y".into(),
        }
    }
}

impl LocaleConfig {
    pub fn with_grouping(mut self, separator: char) -> Self {
        self.grouping_separator = Some(separator);
        self
    }
}

/// Formats `value` with `precision` fractional digits using the locale's separators.
pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let mut body = format!("{:.*}", precision as usize, value);
    // A value that rounds to zero must not print as `-0,00`.
    if body.starts_with('-') && body[1..].chars().all(|c| c == '0' || c == '.') {
        body.remove(0);
    }
    let (int_part, frac_part) = match body.find('.') {
        Some(pos) => (body[..pos].to_string(), Some(body[pos + 1..].to_string())),
        None => (body.clone(), None),
    };
    let int_part = match locale.grouping_separator {
        Some(separator) => insert_grouping(&int_part, separator),
        None => int_part,
    };
    match frac_part {
        Some(frac) => format!("{}{}{}", int_part, locale.decimal_separator, frac),
        None => int_part,
    }
}

fn insert_grouping(int_part: &str, separator: char) -> String {
    match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, separator)),
        None => group_digits(int_part, separator),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let len = digits.len();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders an amount as `R$ 3800,00`; negative values keep their sign after the symbol.
pub fn format_currency(locale: &LocaleConfig, amount: f64) -> String {
    format!(
        "{} {}",
        locale.currency_symbol,
        format_number(locale, amount, 2)
    )
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    date.format(&locale.date_format).to_string()
}

/// Timestamp as shown in report headers, e.g. `05/01/2024, 14:03:09`.
pub fn format_timestamp<Tz>(locale: &LocaleConfig, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}, {}",
        at.format(&locale.date_format),
        at.format("%H:%M:%S")
    )
}
