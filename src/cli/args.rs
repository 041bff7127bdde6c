//! Command-line interface definition for `finance_core_cli`.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// finance_core_cli: record income and expenses by month, view totals, and
/// export or import the full dataset.
#[derive(Debug, Parser, Clone)]
#[command(version)]
pub struct Args {
    /// Directory holding configuration and data. Defaults to ~/.finance_core
    #[arg(long, global = true, env = "FINANCE_CORE_HOME")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Record a new transaction.
    Add(TransactionFields),
    /// Replace every field of an existing transaction except its id.
    Update {
        /// Id printed by `add` or `list`.
        id: String,
        #[command(flatten)]
        fields: TransactionFields,
    },
    /// Remove a transaction. Removing an unknown id is not an error.
    Delete {
        id: String,
        /// Month the transaction was recorded in (1-12).
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
        month: u8,
    },
    /// List a month's transactions, newest first.
    List(MonthArg),
    /// Show income, expenses and balance for a month, or the whole year.
    Totals {
        #[command(flatten)]
        month: MonthArg,
        /// Sum over all twelve months instead.
        #[arg(long, conflicts_with = "month")]
        year: bool,
    },
    /// Print the category report for a month.
    Report(MonthArg),
    /// Write the text report or the JSON backup to a file.
    Export {
        /// Write the JSON backup instead of the text report.
        #[arg(long)]
        json: bool,
        /// Target file. Defaults to a dated name in the current directory.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Replace all data with a JSON backup.
    Import {
        path: PathBuf,
    },
    /// Delete every transaction.
    Clear {
        /// Required confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// Show transaction count, last update and storage location.
    Info,
    /// List category keys and their display labels.
    Categories,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct MonthArg {
    /// Month (1-12). Defaults to the current month.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    pub month: Option<u8>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TransactionFields {
    #[arg(long)]
    pub description: String,
    /// Amount; `.` or `,` are accepted as decimal separator.
    #[arg(long)]
    pub amount: String,
    /// `income` or `expense`.
    #[arg(long = "type")]
    pub kind: String,
    #[arg(long)]
    pub category: String,
    /// Date as YYYY-MM-DD.
    #[arg(long)]
    pub date: String,
    /// Month bucket (1-12). Defaults to the month of `--date`.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    pub month: Option<u8>,
}
