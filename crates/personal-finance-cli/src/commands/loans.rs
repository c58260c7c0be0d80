use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::loans::{self, InterestType, Loan};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InterestTypeArg {
    Simple,
    Compound,
}

impl From<InterestTypeArg> for InterestType {
    fn from(arg: InterestTypeArg) -> Self {
        match arg {
            InterestTypeArg::Simple => InterestType::Simple,
            InterestTypeArg::Compound => InterestType::Compound,
        }
    }
}

/// Arguments for a single loan's amortisation schedule
#[derive(Args)]
pub struct LoanScheduleArgs {
    /// Path to JSON file describing one loan
    #[arg(long)]
    pub input: Option<String>,

    /// Loan label (e.g. "Home")
    #[arg(long, default_value = "Loan")]
    pub loan_type: String,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Monthly instalment
    #[arg(long)]
    pub emi: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 9.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Interest accrual: simple (flat) or compound (reducing balance)
    #[arg(long, value_enum, default_value = "simple")]
    pub interest_type: InterestTypeArg,
}

pub fn run_loan_schedule(args: LoanScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: Loan = match (args.principal, args.emi, args.rate, args.tenure) {
        (Some(principal), Some(emi), Some(rate), Some(tenure_months)) => Loan {
            loan_type: args.loan_type,
            principal,
            emi,
            rate,
            tenure_months,
            interest_type: args.interest_type.into(),
            prepayment_allowed: true,
            penalty: Decimal::ZERO,
        },
        (None, None, None, None) => input::read_input(args.input.as_deref(), "loan schedule")?,
        _ => {
            return Err(
                "--principal, --emi, --rate and --tenure must be given together (or use --input)"
                    .into(),
            )
        }
    };
    let result = loans::build_loan_schedule(&loan)?;
    Ok(serde_json::to_value(result)?)
}
