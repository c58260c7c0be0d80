mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::advisory::{ArbitrageArgs, CreditScoreArgs};
use commands::investments::SipProjectionArgs;
use commands::loans::LoanScheduleArgs;
use commands::projection::ComputeArgs;

/// Personal finance projections and loan-vs-SIP arbitrage advice
#[derive(Parser)]
#[command(
    name = "pfa",
    version,
    about = "Personal finance projections and loan-vs-SIP arbitrage advice",
    long_about = "A CLI for projecting household finances with decimal precision. \
                  Amortises loans, compounds SIPs, tracks inflation-adjusted net worth \
                  and compares loan rates against SIP returns."
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
    /// Run the full projection: schedules, net worth, advice and scores
    Compute(ComputeArgs),
    /// Month-by-month amortisation schedule for one loan
    LoanSchedule(LoanScheduleArgs),
    /// Month-by-month growth of one SIP
    SipProjection(SipProjectionArgs),
    /// Compare every loan against every SIP
    Arbitrage(ArbitrageArgs),
    /// Apply the EMI-vs-income credit score heuristic
    CreditScore(CreditScoreArgs),
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
        Commands::Compute(args) => commands::projection::run_compute(args),
        Commands::LoanSchedule(args) => commands::loans::run_loan_schedule(args),
        Commands::SipProjection(args) => commands::investments::run_sip_projection(args),
        Commands::Arbitrage(args) => commands::advisory::run_arbitrage(args),
        Commands::CreditScore(args) => commands::advisory::run_credit_score(args),
        Commands::Version => {
            println!("pfa {}", env!("CARGO_PKG_VERSION"));
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
