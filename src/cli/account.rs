//! Account CLI commands

use clap::Subcommand;

use crate::display::format_account_list;
use crate::error::LedgerResult;
use crate::ledger::LedgerOps;
use crate::models::Account;

use super::{parse_account_id, parse_money};

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Add {
        /// Account name
        name: String,
        /// Starting balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
    },
    /// List all accounts
    List,
    /// Rename an account
    Rename {
        /// Account ID
        id: String,
        /// New name
        name: String,
    },
    /// Remove an account; its operations are kept as-is
    Remove {
        /// Account ID
        id: String,
    },
}

/// Handle an account command
pub fn handle_account_command<L: LedgerOps>(
    ledger: &mut L,
    cmd: AccountCommands,
) -> LedgerResult<()> {
    match cmd {
        AccountCommands::Add { name, balance } => {
            let balance = parse_money(&balance)?;
            let account = Account::new(name, balance)?;
            println!("Created account: {}", account.name());
            println!("  Balance: {}", account.balance());
            println!("  ID: {}", account.id());
            ledger.add_account(account);
        }

        AccountCommands::List => {
            print!("{}", format_account_list(&ledger.accounts()));
        }

        AccountCommands::Rename { id, name } => {
            let id = parse_account_id(&id)?;
            ledger.edit_account(id, &name)?;
            println!("Renamed account {id} to '{name}'");
        }

        AccountCommands::Remove { id } => {
            let id = parse_account_id(&id)?;
            ledger.remove_account(id)?;
            println!("Removed account {id}");
        }
    }
    Ok(())
}
