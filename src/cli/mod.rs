//! Thin command-line collaborator over [`FinanceStore`].

pub mod args;
pub mod output;

use std::{fs, path::PathBuf, str::FromStr};

use clap::Parser;

use crate::{
    config::{Config, ConfigManager},
    currency::{format_currency, format_date},
    domain::{Category, Month, TransactionDraft, TransactionId},
    errors::{FinanceError, Result},
    export::{backup_file_name, report_file_name, ReportStyle},
    storage::JsonFileStorage,
    FinanceStore, LoadOutcome,
};

use args::{Args, Command, MonthArg, TransactionFields};

/// Parses process arguments and runs one command.
pub fn run_cli() -> Result<()> {
    run(Args::parse())
}

pub fn run(args: Args) -> Result<()> {
    let manager = match args.home.clone() {
        Some(home) => ConfigManager::with_base_dir(home)?,
        None => ConfigManager::new()?,
    };
    let config = manager.load()?;
    crate::utils::init_tracing_with(config.log_filter.as_deref());
    let storage = JsonFileStorage::with_key(manager.data_dir(&config), &config.storage_key)?;
    let store = FinanceStore::open(Box::new(storage));
    if let LoadOutcome::Corrupted { reason } = store.load_outcome() {
        output::warning(format!("stored data was unreadable, starting empty: {reason}"));
    }
    Session { store, config }.dispatch(args.command)
}

struct Session {
    store: FinanceStore,
    config: Config,
}

impl Session {
    fn dispatch(mut self, command: Command) -> Result<()> {
        match command {
            Command::Add(fields) => self.add(fields),
            Command::Update { id, fields } => self.update(&id, fields),
            Command::Delete { id, month } => {
                let id = TransactionId::from_str(&id)?;
                self.store.delete_transaction(month_index(month), &id)?;
                output::success(format!("Transaction {id} removed"));
                Ok(())
            }
            Command::List(month) => self.list(month),
            Command::Totals { month, year } => self.totals(month, year),
            Command::Report(month) => self.report(month),
            Command::Export { json, output } => self.export(json, output),
            Command::Import { path } => {
                let summary = self.store.import_backup_file(&path)?;
                output::success(format!(
                    "Imported {} transactions from {}",
                    summary.transactions,
                    path.display()
                ));
                if !summary.ignored_keys.is_empty() {
                    output::warning(format!("ignored keys: {}", summary.ignored_keys.join(", ")));
                }
                Ok(())
            }
            Command::Clear { yes } => {
                if !yes {
                    return Err(FinanceError::InvalidField {
                        field: "confirmation",
                        value: "pass --yes to delete all data".into(),
                    });
                }
                self.store.clear_all_data()?;
                output::success("All data cleared");
                Ok(())
            }
            Command::Info => {
                let info = self.store.data_info();
                println!("Total de transações: {}", info.total_transactions);
                let last_update = info
                    .last_update
                    .map(|at| {
                        crate::currency::format_timestamp(
                            &self.config.locale_config(),
                            &at.with_timezone(&chrono::Local),
                        )
                    })
                    .unwrap_or_else(|| "Nunca".into());
                println!("Última atualização: {last_update}");
                println!("Armazenamento: {}", info.storage);
                Ok(())
            }
            Command::Categories => {
                let labels = self.config.category_labels();
                for category in Category::BUILT_IN.iter() {
                    println!("{:<12} {}", category.key(), labels.label(category));
                }
                Ok(())
            }
        }
    }

    fn add(&mut self, fields: TransactionFields) -> Result<()> {
        let (month, draft) = draft_from(fields)?;
        let txn = self.store.add_transaction(month, draft)?;
        output::success(format!("Transaction {} added", txn.id));
        Ok(())
    }

    fn update(&mut self, id: &str, fields: TransactionFields) -> Result<()> {
        let id = TransactionId::from_str(id)?;
        let (month, draft) = draft_from(fields)?;
        if self.store.update_transaction(month, &id, draft)? {
            output::success(format!("Transaction {id} updated"));
            Ok(())
        } else {
            Err(FinanceError::NotFound { month, id })
        }
    }

    fn list(&self, month: MonthArg) -> Result<()> {
        let month = self.resolve_month(&month);
        let locale = self.config.locale_config();
        let labels = self.config.category_labels();
        output::section(month.name());
        for txn in self.store.transactions_newest_first(month.index()) {
            println!(
                "{} | {} | {} | {} | {} | {}",
                txn.id,
                format_date(&locale, txn.date),
                txn.kind.report_label(),
                labels.label(&txn.category),
                format_currency(&locale, txn.amount),
                txn.description
            );
        }
        Ok(())
    }

    fn totals(&self, month: MonthArg, year: bool) -> Result<()> {
        let locale = self.config.locale_config();
        if year {
            output::section("Ano");
            output::totals(&locale, &self.store.year_totals());
        } else {
            let month = self.resolve_month(&month);
            output::section(month.name());
            output::totals(&locale, &self.store.month_totals(month.index()));
        }
        Ok(())
    }

    fn report(&self, month: MonthArg) -> Result<()> {
        let month = self.resolve_month(&month);
        let locale = self.config.locale_config();
        let report = self
            .store
            .monthly_report(month.index(), &self.config.category_labels())?;
        output::section(format!("Relatório de {}", month.name()));
        output::totals(&locale, &report.totals);
        if !report.income_by_category.is_empty() {
            println!("\nReceitas por categoria:");
            for (label, amount) in &report.income_by_category {
                println!("  {label}: {}", format_currency(&locale, *amount));
            }
        }
        if !report.expenses_by_category.is_empty() {
            println!("\nDespesas por categoria:");
            for (label, amount) in &report.expenses_by_category {
                println!("  {label}: {}", format_currency(&locale, *amount));
            }
        }
        Ok(())
    }

    fn export(&self, json: bool, target: Option<PathBuf>) -> Result<()> {
        let today = self.store.today();
        let (contents, default_name) = if json {
            (self.store.export_backup()?, backup_file_name(today))
        } else {
            let style = ReportStyle::new(
                self.config.locale_config(),
                self.config.category_labels(),
            );
            (self.store.export_report(&style), report_file_name(today))
        };
        let path = target.unwrap_or_else(|| PathBuf::from(default_name));
        fs::write(&path, contents)?;
        output::success(format!("Exported to {}", path.display()));
        Ok(())
    }

    fn resolve_month(&self, month: &MonthArg) -> Month {
        month
            .month
            .and_then(|m| Month::new(month_index(m)))
            .unwrap_or_else(|| Month::of(self.store.today()))
    }
}

fn month_index(one_based: u8) -> usize {
    usize::from(one_based.saturating_sub(1))
}

fn draft_from(fields: TransactionFields) -> Result<(usize, TransactionDraft)> {
    let draft = TransactionDraft::parse(
        &fields.description,
        &fields.amount,
        &fields.kind,
        &fields.category,
        &fields.date,
    )?;
    let month = fields
        .month
        .map(month_index)
        .unwrap_or_else(|| Month::of(draft.date).index());
    Ok((month, draft))
}
