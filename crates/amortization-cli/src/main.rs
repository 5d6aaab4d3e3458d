mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::LoanArgs;

/// Loan amortization schedules and extra-payment comparison
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Loan amortization schedules and extra-payment comparison",
    long_about = "A CLI for building month-by-month loan amortization schedules \
                  with decimal precision. Compares a standard level-payment \
                  schedule against one with a constant extra monthly payment \
                  and reports the interest saved."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log computation details to stderr (AMORT_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build standard and accelerated schedules with their comparison
    Schedule(LoanArgs),
    /// Compare total interest with and without the extra payment
    Compare(LoanArgs),
    /// Month-by-month balances of both schedules for charting
    Balances(LoanArgs),
    /// Calculate the level monthly payment
    Payment(LoanArgs),
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
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Compare(args) => commands::loan::run_compare(args),
        Commands::Balances(args) => commands::loan::run_balances(args),
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
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
