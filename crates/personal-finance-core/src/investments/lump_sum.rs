use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PersonalFinanceError;
use crate::time_value::{checked_mul, compound, monthly_rate, months_between};
use crate::types::{Money, Percent};
use crate::PersonalFinanceResult;

/// A one-off investment (FD, bonus, gold, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneTimeInvestment {
    #[serde(default)]
    pub source: String,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Expected annual return in percent; zero holds the amount at face value
    #[serde(default)]
    pub expected_return: Percent,
}

impl OneTimeInvestment {
    pub fn validate(&self, field: &str) -> PersonalFinanceResult<()> {
        if self.amount < Decimal::ZERO {
            return Err(PersonalFinanceError::invalid(
                format!("{field}.amount"),
                "Investment amount must be >= 0",
            ));
        }
        if self.expected_return <= -Decimal::ONE_HUNDRED {
            return Err(PersonalFinanceError::invalid(
                format!("{field}.expected_return"),
                "Expected return must be greater than -100%",
            ));
        }
        Ok(())
    }

    /// Month on the projection timeline at which the money is invested.
    /// Undated investments, or ones dated on or before `as_of`, start at month 0.
    pub fn entry_month(&self, as_of: Option<NaiveDate>) -> u32 {
        match (as_of, self.date) {
            (Some(as_of), Some(date)) => months_between(as_of, date),
            _ => 0,
        }
    }

    /// Value at the end of `month`; zero before the money goes in.
    pub fn value_at_month(&self, month: u32, as_of: Option<NaiveDate>) -> PersonalFinanceResult<Money> {
        let entry = self.entry_month(as_of);
        if month < entry {
            return Ok(Decimal::ZERO);
        }
        let factor = compound(monthly_rate(self.expected_return), month - entry)?;
        checked_mul(self.amount, factor, "one-time investment growth")
    }
}
