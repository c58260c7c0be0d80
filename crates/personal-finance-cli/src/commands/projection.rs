use clap::Args;
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::projection::{self, ProjectionInput};

use crate::input;

/// Arguments for a full projection report
#[derive(Args)]
pub struct ComputeArgs {
    /// Path to JSON input file (incomes, loans, sips, one_time_investments, ...)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to engine config (JSON or YAML)
    #[arg(long)]
    pub config: Option<String>,

    /// Override the input's annual inflation rate (percent)
    #[arg(long)]
    pub inflation: Option<Decimal>,

    /// Override the input's starting credit score
    #[arg(long, allow_hyphen_values = true)]
    pub credit_score: Option<i32>,
}

pub fn run_compute(args: ComputeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut proj_input: ProjectionInput = input::read_input(args.input.as_deref(), "compute")?;
    if let Some(inflation) = args.inflation {
        proj_input.inflation_rate = inflation;
    }
    if let Some(score) = args.credit_score {
        proj_input.credit_score = score;
    }
    let config = input::config::load_config(args.config.as_deref())?;
    debug!(
        "compute: {} incomes, {} loans, {} sips, {} one-time",
        proj_input.incomes.len(),
        proj_input.loans.len(),
        proj_input.sips.len(),
        proj_input.one_time_investments.len()
    );

    let result = projection::run_projection(&proj_input, &config)?;
    Ok(serde_json::to_value(result)?)
}
