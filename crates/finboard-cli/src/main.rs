mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::deadline::DeadlineArgs;
use commands::loans::{AmortizeArgs, LoansArgs, ScheduleArgs};

/// Loan amortization and deadline alerts
#[derive(Parser)]
#[command(
    name = "finboard",
    version,
    about = "Loan amortization and deadline alerts",
    long_about = "Prices fixed-rate loans with decimal precision: monthly payment, \
                  total interest, payoff date and month-by-month schedules. \
                  Summarises a loan book with 30-day deadline alerts and optional \
                  display-currency conversion."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment, total interest and payoff date for a loan
    Amortize(AmortizeArgs),
    /// Month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Days until a deadline and whether it raises an alert
    Deadline(DeadlineArgs),
    /// Summarise a loan book with upcoming-deadline alerts
    Loans(LoansArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Amortize(args) => commands::loans::run_amortize(args),
        Commands::Schedule(args) => commands::loans::run_schedule(args),
        Commands::Deadline(args) => commands::deadline::run_deadline(args),
        Commands::Loans(args) => commands::loans::run_loans(args),
        Commands::Version => {
            println!("finboard {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
