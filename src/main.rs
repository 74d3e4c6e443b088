use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use tracker::cli::{
    handle_balance_command, handle_categories_command, handle_export_command,
    handle_transaction_command, ExportArgs, TransactionCommands,
};
use tracker::config::{paths::TrackerPaths, settings::Settings};
use tracker::display::format_load_issues;
use tracker::logging::setup_logging;
use tracker::storage::{self, TransactionStore};

#[derive(Parser)]
#[command(
    name = "tracker",
    version,
    about = "Personal finance ledger",
    long_about = "Tracker records income and expense transactions in a single JSON \
                  file. Each transaction's category decides whether it counts as \
                  income or expense, and the balance is derived from that."
)]
struct Cli {
    /// Transaction file to use instead of the one in the data directory
    #[arg(long, env = "TRACKER_FILE", global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Show income, expense and balance totals
    Balance,

    /// List the categories and their class
    Categories,

    /// Export transactions as CSV
    Export(ExportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let paths = match TrackerPaths::new() {
        Ok(paths) => Some(paths),
        // An explicit file does not need a data directory
        Err(e) if cli.file.is_some() => {
            debug!(error = %e, "no data directory, using defaults");
            None
        }
        Err(e) => return Err(e.into()),
    };
    let settings = match &paths {
        Some(paths) => Settings::load_or_create(paths)?,
        None => Settings::default(),
    };

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("Tracker - personal finance ledger");
            println!();
            println!("Run 'tracker --help' for usage information.");
            return Ok(());
        }
    };

    let open_store = || -> Result<TransactionStore> {
        let store = match (&cli.file, &paths) {
            (Some(file), _) => TransactionStore::open(file.clone()),
            (None, Some(paths)) => storage::open_default(paths)?,
            (None, None) => bail!("no transaction file and no data directory"),
        };
        eprint!("{}", format_load_issues(store.load_issues()));
        Ok(store)
    };

    match command {
        Commands::Transaction(cmd) => {
            handle_transaction_command(&open_store()?, &settings, cmd)?;
        }
        Commands::Balance => handle_balance_command(&open_store()?, &settings)?,
        Commands::Categories => handle_categories_command()?,
        Commands::Export(args) => handle_export_command(&open_store()?, args)?,
        Commands::Config => {
            let store = open_store()?;
            println!("Tracker Configuration");
            println!("=====================");
            if let Some(paths) = &paths {
                println!("Data directory:    {}", paths.data_dir().display());
                println!("Settings file:     {}", paths.settings_file().display());
            }
            println!("Transaction file:  {}", store.path().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Recent limit:    {}", settings.recent_limit);
        }
    }

    Ok(())
}
