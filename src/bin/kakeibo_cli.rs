use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use kakeibo_core::{
    config::{Config, ConfigManager},
    core::{
        services::{SelectionService, TransactionDraft, TransactionService},
        AppStore,
    },
    domain::{Balance, Displayable, Month, TransactionId, TransactionKind, TransactionPayload},
    storage::JsonFileStorage,
    utils::init_tracing_with_default,
};

/// Household income and expense book.
#[derive(Parser, Debug)]
#[command(name = "kakeibo_cli", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Monthly totals, daily balances and category breakdown.
    Report {
        /// Month to report on (defaults to the current month).
        #[arg(value_name = "YYYY-MM")]
        month: Option<Month>,
    },
    /// Records of a month, newest first.
    List {
        #[arg(value_name = "YYYY-MM")]
        month: Option<Month>,
        /// One-based page number.
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        page: Option<u64>,
    },
    /// Records of a single day.
    Day {
        #[arg(value_name = "YYYY-MM-DD")]
        date: NaiveDate,
    },
    /// Record an income or expense.
    Add(RecordArgs),
    /// Replace an existing record.
    Edit {
        id: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Remove records.
    Delete {
        #[arg(value_name = "ID", required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct RecordArgs {
    #[arg(value_name = "YYYY-MM-DD")]
    date: NaiveDate,
    /// `income` or `expense`.
    #[arg(value_name = "TYPE")]
    kind: TransactionKind,
    /// Category label, e.g. 食費 or 給与.
    category: String,
    #[arg(allow_negative_numbers = true)]
    amount: i64,
    #[arg(required = true, num_args = 1..)]
    content: Vec<String>,
}

impl RecordArgs {
    fn into_payload(self) -> Result<TransactionPayload, String> {
        let draft = TransactionDraft {
            date: self.date.format("%Y-%m-%d").to_string(),
            kind: self.kind,
            category: Some(self.category),
            amount: self.amount,
            content: self.content.join(" "),
        };
        TransactionService::validate(&draft).map_err(|errors| {
            errors
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect::<Vec<_>>()
                .join("\n")
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing_with_default("kakeibo_core=warn");
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), String> {
    let manager = ConfigManager::new().map_err(|err| err.to_string())?;
    let config = manager.load().map_err(|err| err.to_string())?;
    let storage = JsonFileStorage::new(config.transactions_path(manager.base_dir()));
    let store = AppStore::new(Arc::new(storage));
    store.load().await.map_err(|err| err.to_string())?;

    match command {
        Command::Report { month } => {
            if let Some(month) = month {
                store.select_month(month);
            }
            print_report(&store, &config);
        }
        Command::List { month, page } => {
            if let Some(month) = month {
                store.select_month(month);
            }
            let sorted = SelectionService::sorted_by_date_desc(&store.monthly_transactions());
            let pages = SelectionService::page_count(sorted.len(), config.rows_per_page).max(1);
            let index = page
                .map(|page| usize::try_from(page - 1).unwrap_or(usize::MAX))
                .unwrap_or(0)
                .min(pages - 1);
            for txn in SelectionService::page(&sorted, index, config.rows_per_page) {
                println!("{}  {}", txn.id(), txn.display_label());
            }
            println!("page {}/{}", index + 1, pages);
        }
        Command::Day { date } => {
            store.select_month(Month::of(date));
            for txn in store.daily_transactions(date) {
                println!("{}  {}", txn.id(), txn.display_label());
            }
        }
        Command::Add(record) => {
            let payload = record.into_payload()?;
            let created = store.create(payload).await.map_err(|err| err.to_string())?;
            println!("created {}", created.id());
        }
        Command::Edit { id, record } => {
            let id = TransactionId::new(id);
            if store.transaction(&id).is_none() {
                return Err(format!("transaction `{id}` not found"));
            }
            let payload = record.into_payload()?;
            store
                .update(payload, &id)
                .await
                .map_err(|err| err.to_string())?;
            println!("updated {id}");
        }
        Command::Delete { ids } => {
            let ids: Vec<TransactionId> = ids.into_iter().map(TransactionId::new).collect();
            let removed = store.delete(&ids).await.map_err(|err| err.to_string())?;
            println!("deleted {removed}");
        }
    }
    Ok(())
}

fn print_report(store: &AppStore, config: &Config) {
    let report = store.report();
    println!("{}", report.month);
    print_balance(config, "total", &report.totals);
    for (date, balance) in report.calendar_entries() {
        print_balance(config, &date.format("%Y-%m-%d").to_string(), &balance);
    }
    for kind in [TransactionKind::Income, TransactionKind::Expense] {
        for (category, amount) in report.category_totals(kind) {
            println!("  {kind:<8} {category:<6} {:>14}", config.format_amount(*amount));
        }
    }
}

fn print_balance(config: &Config, label: &str, balance: &Balance) {
    println!(
        "  {label:<10} income {:>14}  expense {:>14}  balance {:>14}",
        config.format_amount(balance.income()),
        config.format_amount(balance.expense()),
        config.format_amount(balance.balance())
    );
}
