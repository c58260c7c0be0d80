use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::time_value::{checked_add, checked_mul, checked_sub, effective_annual_rate, monthly_rate};
use crate::types::*;
use crate::PersonalFinanceResult;

/// How interest accrues on a loan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterestType {
    /// Flat interest on the original principal every month
    #[default]
    Simple,
    /// Interest on the outstanding balance, recomputed every month
    Compound,
}

/// A loan as entered on the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    #[serde(default)]
    pub loan_type: String,
    pub principal: Money,
    pub emi: Money,
    /// Annual interest rate in percent
    pub rate: Percent,
    pub tenure_months: u32,
    #[serde(default)]
    pub interest_type: InterestType,
    #[serde(default = "default_prepayment_allowed")]
    pub prepayment_allowed: bool,
    /// Prepayment penalty in percent of the amount prepaid
    #[serde(default)]
    pub penalty: Percent,
}

/// Longest tenure accepted: 100 years of monthly instalments.
pub const MAX_TENURE_MONTHS: u32 = 1200;

fn default_prepayment_allowed() -> bool {
    true
}

impl Loan {
    /// Display label, falling back to the loan's 1-based position.
    pub fn label(&self, index: usize) -> String {
        let trimmed = self.loan_type.trim();
        if trimmed.is_empty() {
            format!("Loan {}", index + 1)
        } else {
            trimmed.to_string()
        }
    }

    /// Annual rate comparable with a SIP's CAGR, in percent.
    pub fn effective_annual_rate(&self) -> PersonalFinanceResult<Percent> {
        match self.interest_type {
            InterestType::Simple => Ok(self.rate),
            InterestType::Compound => effective_annual_rate(self.rate),
        }
    }

    pub fn validate(&self, field: &str) -> PersonalFinanceResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(PersonalFinanceError::invalid(
                format!("{field}.principal"),
                "Loan principal must be positive",
            ));
        }
        if self.emi < Decimal::ZERO {
            return Err(PersonalFinanceError::invalid(
                format!("{field}.emi"),
                "EMI must be >= 0",
            ));
        }
        if self.rate < Decimal::ZERO {
            return Err(PersonalFinanceError::invalid(
                format!("{field}.rate"),
                "Interest rate must be >= 0",
            ));
        }
        if self.tenure_months == 0 {
            return Err(PersonalFinanceError::invalid(
                format!("{field}.tenure_months"),
                "Tenure must be at least 1 month",
            ));
        }
        if self.tenure_months > MAX_TENURE_MONTHS {
            return Err(PersonalFinanceError::invalid(
                format!("{field}.tenure_months"),
                format!("Tenure must not exceed {MAX_TENURE_MONTHS} months"),
            ));
        }
        if self.penalty < Decimal::ZERO {
            return Err(PersonalFinanceError::invalid(
                format!("{field}.penalty"),
                "Prepayment penalty must be >= 0",
            ));
        }
        Ok(())
    }
}

/// A single month in the repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPeriod {
    pub month: u32,
    pub opening_balance: Money,
    pub interest: Money,
    pub principal_repaid: Money,
    pub payment: Money,
    pub balloon_payment: Money,
    pub closing_balance: Money,
}

/// Month-by-month outstanding balance for one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub loan: String,
    pub interest_type: InterestType,
    pub principal: Money,
    pub effective_annual_rate: Percent,
    pub periods: Vec<LoanPeriod>,
    pub total_interest: Money,
    pub total_paid: Money,
    /// Balance left after the last EMI, settled in the final month
    pub balloon_payment: Money,
}

impl LoanSchedule {
    /// Outstanding balance at the end of `month` (month 0 is the drawdown).
    pub fn balance_at_month(&self, month: u32) -> Money {
        if month == 0 {
            return self.principal;
        }
        self.periods
            .get(month as usize - 1)
            .map(|p| p.closing_balance)
            .unwrap_or(Decimal::ZERO)
    }

    /// Outstanding balance at the end of each loan year.
    pub fn yearly_balances(&self) -> Vec<Money> {
        let years = crate::time_value::years_covering(self.periods.len() as u32);
        (1..=years).map(|y| self.balance_at_month(y * 12)).collect()
    }

    /// Interest falling due after `month`.
    pub fn interest_after_month(&self, month: u32) -> Money {
        self.periods
            .iter()
            .skip(month as usize)
            .map(|p| p.interest)
            .sum()
    }
}

/// Build the monthly amortisation schedule for a single loan.
///
/// Fails with `InvalidLoan` when the EMI does not cover the first month's
/// interest, since such a loan never amortises. Any balance left after the
/// final EMI is settled as a balloon payment in the last month.
pub fn amortize_loan(loan: &Loan, index: usize) -> PersonalFinanceResult<LoanSchedule> {
    loan.validate(&format!("loans[{index}]"))?;
    let label = loan.label(index);

    let r = monthly_rate(loan.rate);
    let flat_interest = checked_mul(loan.principal, r, "flat interest")?;

    // Both interest types charge principal * r in the first month
    if loan.emi <= flat_interest {
        return Err(PersonalFinanceError::InvalidLoan {
            loan: label,
            reason: format!(
                "EMI {} does not exceed the first month's interest {}; the balance would never fall",
                loan.emi, flat_interest
            ),
        });
    }

    let mut periods = Vec::with_capacity(loan.tenure_months as usize);
    let mut balance = loan.principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;
    let mut balloon_total = Decimal::ZERO;

    for month in 1..=loan.tenure_months {
        let opening = balance;

        if opening.is_zero() {
            periods.push(LoanPeriod {
                month,
                opening_balance: Decimal::ZERO,
                interest: Decimal::ZERO,
                principal_repaid: Decimal::ZERO,
                payment: Decimal::ZERO,
                balloon_payment: Decimal::ZERO,
                closing_balance: Decimal::ZERO,
            });
            continue;
        }

        let interest = match loan.interest_type {
            InterestType::Simple => flat_interest,
            InterestType::Compound => checked_mul(opening, r, "periodic interest")?,
        };

        // Never repay more than is owed
        let principal_repaid = checked_sub(loan.emi, interest, "principal repayment")?.min(opening);
        let payment = checked_add(principal_repaid, interest, "loan payment")?;
        balance = opening - principal_repaid;

        let balloon = if month == loan.tenure_months && balance > Decimal::ZERO {
            balance
        } else {
            Decimal::ZERO
        };
        balance -= balloon;
        balloon_total += balloon;

        total_interest = checked_add(total_interest, interest, "total interest")?;
        let paid = checked_add(payment, balloon, "total paid")?;
        total_paid = checked_add(total_paid, paid, "total paid")?;

        periods.push(LoanPeriod {
            month,
            opening_balance: opening,
            interest,
            principal_repaid,
            payment,
            balloon_payment: balloon,
            closing_balance: balance,
        });
    }

    if balloon_total > Decimal::ZERO {
        warn!("{label}: EMI leaves {balloon_total} outstanding at month {}", loan.tenure_months);
    }
    debug!(
        "{label}: amortised {} over {} months, interest {total_interest}",
        loan.principal, loan.tenure_months
    );

    Ok(LoanSchedule {
        loan: label,
        interest_type: loan.interest_type,
        principal: loan.principal,
        effective_annual_rate: loan.effective_annual_rate()?,
        periods,
        total_interest,
        total_paid,
        balloon_payment: balloon_total,
    })
}

/// Amortise a single loan and wrap it in the standard output envelope.
pub fn build_loan_schedule(loan: &Loan) -> PersonalFinanceResult<ComputationOutput<LoanSchedule>> {
    let start = Instant::now();
    let schedule = amortize_loan(loan, 0)?;

    let mut warnings = Vec::new();
    if schedule.balloon_payment > Decimal::ZERO {
        warnings.push(balloon_warning(&schedule, loan.tenure_months));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly loan amortisation (flat or reducing balance)",
        &serde_json::json!({
            "loan": schedule.loan,
            "principal": loan.principal.to_string(),
            "emi": loan.emi.to_string(),
            "rate_pct": loan.rate.to_string(),
            "tenure_months": loan.tenure_months,
            "interest_type": format!("{:?}", loan.interest_type),
        }),
        warnings,
        elapsed,
        schedule,
    ))
}

pub(crate) fn balloon_warning(schedule: &LoanSchedule, tenure_months: u32) -> String {
    format!(
        "{}: EMI does not clear the loan within {} months; {} settled as a balloon payment",
        schedule.loan, tenure_months, schedule.balloon_payment
    )
}
