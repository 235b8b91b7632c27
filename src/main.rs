use anyhow::Result;
use clap::{Parser, Subcommand};

use budget_grid::cli::{handle_config_command, handle_summary_command, SummaryArgs};
use budget_grid::config::{BudgetPaths, Settings};
use budget_grid::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "budget-grid",
    version,
    about = "Terminal budgeting spreadsheet with monthly running balances",
    long_about = "budget-grid lays income and expense rows out against a range of \
                  months and keeps opening balance, profit and closing balance in \
                  step as you edit."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI (default)
    #[command(alias = "ui")]
    Tui,

    /// Print the balance sheet for a ledger built from the command line
    Summary(SummaryArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&paths, &settings.log_filter)?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => budget_grid::tui::run_tui(&settings)?,
        Commands::Summary(args) => handle_summary_command(&settings, &args)?,
        Commands::Config => handle_config_command(&paths, &settings)?,
    }

    Ok(())
}
