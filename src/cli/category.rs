//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::LedgerResult;
use crate::ledger::LedgerOps;
use crate::models::Category;

use super::{parse_category_id, parse_kind};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// income or expense
        #[arg(short, long)]
        kind: String,
    },
    /// List all categories
    List,
    /// Change a category's name and kind
    Edit {
        /// Category ID
        id: String,
        /// New name
        name: String,
        /// income or expense
        #[arg(short, long)]
        kind: String,
    },
    /// Remove a category; its operations are kept as-is
    Remove {
        /// Category ID
        id: String,
    },
}

/// Handle a category command
pub fn handle_category_command<L: LedgerOps>(
    ledger: &mut L,
    cmd: CategoryCommands,
) -> LedgerResult<()> {
    match cmd {
        CategoryCommands::Add { name, kind } => {
            let kind = parse_kind(&kind)?;
            let category = Category::new(kind, name)?;
            println!("Created category: {} ({})", category.name(), category.kind());
            println!("  ID: {}", category.id());
            ledger.add_category(category);
        }

        CategoryCommands::List => {
            print!("{}", format_category_list(&ledger.categories()));
        }

        CategoryCommands::Edit { id, name, kind } => {
            let id = parse_category_id(&id)?;
            let kind = parse_kind(&kind)?;
            ledger.edit_category(id, &name, kind)?;
            println!("Updated category {id}");
        }

        CategoryCommands::Remove { id } => {
            let id = parse_category_id(&id)?;
            ledger.remove_category(id)?;
            println!("Removed category {id}");
        }
    }
    Ok(())
}
