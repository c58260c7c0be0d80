use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PersonalFinanceError;
use crate::time_value::checked_sum;
use crate::types::Money;
use crate::PersonalFinanceResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeType {
    #[default]
    Salary,
    Business,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    Monthly,
    Annual,
}

/// A single income stream as entered on the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub amount: Money,
    #[serde(default)]
    pub income_type: IncomeType,
    #[serde(default)]
    pub frequency: Frequency,
}

impl IncomeSource {
    /// Amount normalised to a monthly figure.
    pub fn monthly_amount(&self) -> Money {
        match self.frequency {
            Frequency::Monthly => self.amount,
            Frequency::Annual => self.amount / dec!(12),
        }
    }

    pub fn validate(&self, field: &str) -> PersonalFinanceResult<()> {
        if self.amount < Decimal::ZERO {
            return Err(PersonalFinanceError::invalid(
                format!("{field}.amount"),
                "Income amount must be >= 0",
            ));
        }
        Ok(())
    }
}

/// Monthly amount of the first listed income, which the credit heuristic
/// treats as the household's primary income. Zero when nothing is listed.
pub fn primary_monthly_income(incomes: &[IncomeSource]) -> Money {
    incomes
        .first()
        .map(IncomeSource::monthly_amount)
        .unwrap_or(Decimal::ZERO)
}

/// Sum of all incomes, normalised to monthly.
pub fn total_monthly_income(incomes: &[IncomeSource]) -> PersonalFinanceResult<Money> {
    checked_sum(incomes.iter().map(IncomeSource::monthly_amount), "monthly income")
}
