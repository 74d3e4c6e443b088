//! Transaction CLI commands
//!
//! Maps subcommand arguments onto store operations. Parsing of amounts,
//! categories and dates happens here, so the store only ever sees typed
//! values.

use chrono::{Local, NaiveDateTime, Timelike};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{parse_timestamp, Category, Money, TransactionId, TransactionInput};
use crate::storage::TransactionStore;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Amount (e.g. "12.50")
        amount: String,
        /// Category (Salary, Sales, SideHustle, Allowances, Entertainment, Groceries, Subscriptions)
        category: String,
        /// Date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS), defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List transactions, most recent last
    List {
        /// Only income or only expense
        #[arg(short, long)]
        class: Option<String>,
        /// Number of transactions to show (defaults to the recent_limit setting)
        #[arg(short, long, conflicts_with = "all")]
        limit: Option<usize>,
        /// Show every transaction
        #[arg(short, long)]
        all: bool,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: TransactionId,
    },
    /// Edit a transaction; fields not given keep their current value
    Edit {
        /// Transaction ID
        id: TransactionId,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New description ("" clears it)
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: TransactionId,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    store: &TransactionStore,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TrackerResult<()> {
    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            date,
            description,
        } => {
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => now(),
            };
            let input = TransactionInput::new(parse_amount(&amount)?, category.parse()?, date)
                .with_description(description.unwrap_or_default());

            let txn = store.add(input)?;

            println!("Created transaction:");
            print!("{}", indent(&format_transaction_details(&txn, settings)));
        }

        TransactionCommands::List { class, limit, all } => {
            let mut transactions = match class {
                Some(class) => store.get_by_class_name(&class)?,
                None => store.get_all()?,
            };
            let total = transactions.len();

            if !all {
                let keep = limit.unwrap_or(settings.recent_limit);
                transactions.drain(..total.saturating_sub(keep));
            }

            print!("{}", format_transaction_register(&transactions, settings));
            println!("\nShowing {} of {} transactions", transactions.len(), total);
        }

        TransactionCommands::Show { id } => {
            let txn = store.get(id)?;
            print!("{}", format_transaction_details(&txn, settings));
        }

        TransactionCommands::Edit {
            id,
            amount,
            category,
            date,
            description,
        } => {
            let mut input = store.get(id)?.to_input();

            if let Some(amount) = amount {
                input.amount = parse_amount(&amount)?;
            }
            if let Some(category) = category {
                input.category = category.parse::<Category>()?;
            }
            if let Some(date) = date {
                input.date = parse_date(&date)?;
            }
            if let Some(description) = description {
                input.description = description;
            }

            let updated = store.update(id, input)?;

            println!("Updated transaction:");
            print!("{}", indent(&format_transaction_details(&updated, settings)));
        }

        TransactionCommands::Delete { id, force } => {
            let txn = store.get(id)?;

            if !force {
                println!("About to delete transaction:");
                print!("{}", indent(&format_transaction_details(&txn, settings)));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = store.delete(id)?;
            println!("Deleted transaction: {}", deleted);
        }
    }

    Ok(())
}

fn parse_amount(amount: &str) -> TrackerResult<Money> {
    Money::parse(amount).map_err(|e| {
        TrackerError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '12.50'. Error: {}",
            amount, e
        ))
    })
}

fn parse_date(date: &str) -> TrackerResult<NaiveDateTime> {
    parse_timestamp(date).ok_or_else(|| {
        TrackerError::Validation(format!(
            "Invalid date: '{}'. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS",
            date
        ))
    })
}

fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

fn indent(text: &str) -> String {
    text.lines().map(|line| format!("  {}\n", line)).collect()
}
