//! Operation CLI commands

use clap::Subcommand;

use crate::display::format_operation_list;
use crate::error::LedgerResult;
use crate::ledger::LedgerOps;
use crate::models::Operation;

use super::{
    parse_account_id, parse_category_id, parse_datetime, parse_kind, parse_money,
    parse_operation_id,
};

/// Operation subcommands
#[derive(Subcommand)]
pub enum OperationCommands {
    /// Record a new operation against an account
    Add {
        /// income or expense
        kind: String,
        /// Amount (e.g., "50.00")
        amount: String,
        /// Account ID
        #[arg(short, long)]
        account: String,
        /// Category ID
        #[arg(short, long)]
        category: String,
        /// Timestamp (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS"); defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
    },
    /// List all operations
    List,
    /// Edit an operation, adjusting the account balance to the new amount
    Edit {
        /// Operation ID
        id: String,
        /// New amount
        amount: String,
        /// New timestamp (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS")
        date: String,
        /// New category ID
        #[arg(short, long)]
        category: String,
        /// New description; omit to clear it
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove an operation record without touching the account balance
    Remove {
        /// Operation ID
        id: String,
    },
}

/// Handle an operation command
pub fn handle_operation_command<L: LedgerOps>(
    ledger: &mut L,
    cmd: OperationCommands,
) -> LedgerResult<()> {
    match cmd {
        OperationCommands::Add {
            kind,
            amount,
            account,
            category,
            date,
            description,
        } => {
            let kind = parse_kind(&kind)?;
            let amount = parse_money(&amount)?;
            let account_id = parse_account_id(&account)?;
            let category_id = parse_category_id(&category)?;
            let date = match date {
                Some(raw) => parse_datetime(&raw)?,
                None => chrono::Local::now().naive_local(),
            };

            let operation =
                Operation::new(kind, account_id, amount, date, description, category_id)?;
            let id = operation.id();
            ledger.add_operation(operation)?;
            println!("Recorded {kind} of {amount}");
            println!("  ID: {id}");
        }

        OperationCommands::List => {
            print!("{}", format_operation_list(&ledger.operations()));
        }

        OperationCommands::Edit {
            id,
            amount,
            date,
            category,
            description,
        } => {
            let id = parse_operation_id(&id)?;
            let amount = parse_money(&amount)?;
            let date = parse_datetime(&date)?;
            let category_id = parse_category_id(&category)?;

            ledger.edit_operation(id, amount, date, description, category_id)?;
            println!("Updated operation {id}");
        }

        OperationCommands::Remove { id } => {
            let id = parse_operation_id(&id)?;
            ledger.remove_operation(id)?;
            println!("Removed operation {id}");
        }
    }
    Ok(())
}
