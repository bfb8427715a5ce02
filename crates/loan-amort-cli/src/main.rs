mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{ExportArgs, LoanArgs};

/// Fixed-rate loan instalment and amortisation schedules
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Fixed-rate loan instalment and amortisation schedules",
    long_about = "A CLI for previewing fixed-rate instalment loans with decimal \
                  precision. Derives the equated monthly instalment, builds the \
                  full amortisation schedule, summarises lifetime cost, and \
                  exports the payment plan as CSV."
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
    /// Calculate the equated monthly instalment
    Payment(LoanArgs),
    /// Build the full month-by-month amortisation schedule
    Schedule(LoanArgs),
    /// Summarise lifetime cost (total paid, interest share)
    Summary(LoanArgs),
    /// Write the amortisation schedule to a CSV file
    Export(ExportArgs),
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

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Summary(args) => commands::loan::run_summary(args),
        Commands::Export(args) => commands::loan::run_export(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
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
