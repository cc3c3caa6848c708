//! Report CLI commands

use clap::Subcommand;

use crate::display::format_category_totals;
use crate::error::LedgerResult;
use crate::ledger::LedgerOps;

use super::{parse_datetime, parse_range_end};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income minus expenses over a period, bounds inclusive
    Diff {
        /// Period start (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS")
        from: String,
        /// Period end
        to: String,
    },
    /// Operation totals per category over a period
    ByCategory {
        /// Period start (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS")
        from: String,
        /// Period end
        to: String,
    },
}

/// Handle a report command
pub fn handle_report_command<L: LedgerOps>(ledger: &L, cmd: ReportCommands) -> LedgerResult<()> {
    match cmd {
        ReportCommands::Diff { from, to } => {
            let start = parse_datetime(&from)?;
            let end = parse_range_end(&to)?;
            let difference = ledger.income_expense_difference(start, end);
            println!("Income - expenses from {from} to {to}: {difference}");
        }

        ReportCommands::ByCategory { from, to } => {
            let start = parse_datetime(&from)?;
            let end = parse_range_end(&to)?;
            let totals = ledger.operations_by_category(start, end);
            print!("{}", format_category_totals(&totals, &ledger.categories()));
        }
    }
    Ok(())
}
