use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::investments::{self, Sip};

use crate::input;

/// Arguments for a SIP growth projection
#[derive(Args)]
pub struct SipProjectionArgs {
    /// Path to JSON file describing one SIP
    #[arg(long)]
    pub input: Option<String>,

    /// Plan name
    #[arg(long, default_value = "SIP")]
    pub name: String,

    /// Monthly contribution
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Expected CAGR in percent (e.g. 12)
    #[arg(long, allow_hyphen_values = true)]
    pub cagr: Option<Decimal>,

    /// Contribution horizon in years
    #[arg(long)]
    pub horizon: Option<u32>,

    /// Months before the first contribution
    #[arg(long, default_value = "0")]
    pub delay: u32,
}

pub fn run_sip_projection(args: SipProjectionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip: Sip = match (args.amount, args.cagr, args.horizon) {
        (Some(amount), Some(cagr), Some(horizon_years)) => Sip {
            name: args.name,
            amount,
            cagr,
            horizon_years,
            delay_months: args.delay,
        },
        (None, None, None) => input::read_input(args.input.as_deref(), "SIP projection")?,
        _ => {
            return Err(
                "--amount, --cagr and --horizon must be given together (or use --input)".into(),
            )
        }
    };
    let result = investments::project_sip_growth(&sip)?;
    Ok(serde_json::to_value(result)?)
}
