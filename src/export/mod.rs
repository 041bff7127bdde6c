//! External representations of the ledger: the JSON backup document, the
//! plain-text report, and the per-month category report.

pub mod backup;
pub mod monthly;
pub mod report;

use chrono::NaiveDate;

pub use backup::{from_backup, to_backup};
pub use monthly::{MonthlyReport, ReportRow};
pub use report::{render_report, ReportStyle};

const FILE_PREFIX: &str = "controle_financeiro";

/// Suggested download name for the text report, e.g. `controle_financeiro_2024-01-05.txt`.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("{FILE_PREFIX}_{}.txt", date.format("%Y-%m-%d"))
}

/// Suggested download name for the backup document.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{FILE_PREFIX}_backup_{}.json", date.format("%Y-%m-%d"))
}
