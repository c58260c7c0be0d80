use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use personal_finance_core::advisory;
use personal_finance_core::income::IncomeSource;
use personal_finance_core::investments::Sip;
use personal_finance_core::loans::Loan;

use crate::input;

/// Arguments for the loan-vs-SIP arbitrage advice
#[derive(Args)]
pub struct ArbitrageArgs {
    /// Path to JSON file with `loans` and `sips` arrays
    #[arg(long)]
    pub input: Option<String>,

    /// Path to engine config (JSON or YAML)
    #[arg(long)]
    pub config: Option<String>,
}

/// Arguments for the EMI-vs-income credit score update
#[derive(Args)]
pub struct CreditScoreArgs {
    /// Path to JSON file with `credit_score`, `incomes` and `loans`
    #[arg(long)]
    pub input: Option<String>,

    /// Path to engine config (JSON or YAML)
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArbitrageInput {
    #[serde(default)]
    loans: Vec<Loan>,
    #[serde(default)]
    sips: Vec<Sip>,
}

#[derive(Debug, Deserialize)]
struct CreditScoreInput {
    credit_score: i32,
    #[serde(default)]
    incomes: Vec<IncomeSource>,
    #[serde(default)]
    loans: Vec<Loan>,
}

pub fn run_arbitrage(args: ArbitrageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let arb_input: ArbitrageInput = input::read_input(args.input.as_deref(), "arbitrage advice")?;
    let config = input::config::load_config(args.config.as_deref())?;
    let result = advisory::advise(&arb_input.loans, &arb_input.sips, &config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_credit_score(args: CreditScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cs_input: CreditScoreInput = input::read_input(args.input.as_deref(), "credit score")?;
    let config = input::config::load_config(args.config.as_deref())?;
    for (i, income) in cs_input.incomes.iter().enumerate() {
        income.validate(&format!("incomes[{i}]"))?;
    }
    for (i, loan) in cs_input.loans.iter().enumerate() {
        loan.validate(&format!("loans[{i}]"))?;
    }
    let update = advisory::update_credit_score(
        cs_input.credit_score,
        &cs_input.loans,
        &cs_input.incomes,
        &config,
    );
    Ok(serde_json::json!({ "result": update }))
}
