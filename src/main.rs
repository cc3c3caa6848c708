use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_account_command, handle_category_command, handle_operation_command,
    handle_report_command, AccountCommands, CategoryCommands, OperationCommands, ReportCommands,
};
use fintrack::{CachedLedger, Ledger, LedgerOps};

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance ledger with CSV/JSON/YAML import and export"
)]
struct Cli {
    /// Ledger state file, loaded before and saved after every command
    #[arg(long, default_value = "ledger.json", env = "FINTRACK_LEDGER")]
    ledger: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Operation management commands
    #[command(subcommand, alias = "op")]
    Operation(OperationCommands),

    /// Analytics over a time period
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export the ledger (csv writes a directory, json/yaml a single file)
    Export {
        /// csv, json or yaml
        format: String,
        /// Target directory (csv) or file (json/yaml)
        path: PathBuf,
    },

    /// Import serialized data into the ledger
    Import {
        /// csv, json or yaml
        format: String,
        /// Source directory (csv) or file (json/yaml)
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut engine = Ledger::new();
    if cli.ledger.exists() {
        engine.import_data("json", &cli.ledger).with_context(|| {
            format!("failed to load ledger state from {}", cli.ledger.display())
        })?;
    }
    let mut ledger = CachedLedger::new(engine);

    match cli.command {
        Commands::Account(cmd) => handle_account_command(&mut ledger, cmd)?,
        Commands::Category(cmd) => handle_category_command(&mut ledger, cmd)?,
        Commands::Operation(cmd) => handle_operation_command(&mut ledger, cmd)?,
        Commands::Report(cmd) => handle_report_command(&ledger, cmd)?,
        Commands::Export { format, path } => {
            ledger.export_data(&format, &path)?;
            println!("Exported ledger to {}", path.display());
        }
        Commands::Import { format, path } => {
            ledger.import_data(&format, &path)?;
            println!("Imported ledger data from {}", path.display());
        }
    }

    ledger
        .export_data("json", &cli.ledger)
        .with_context(|| format!("failed to save ledger state to {}", cli.ledger.display()))?;

    Ok(())
}
