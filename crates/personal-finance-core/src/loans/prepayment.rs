use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::loans::amortization::{Loan, LoanSchedule};
use crate::time_value::checked_mul;
use crate::types::{to_rate, Money, Percent};
use crate::PersonalFinanceResult;

/// What clearing a loan right after its first EMI would save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentAnalysis {
    pub loan: String,
    pub prepayment_allowed: bool,
    pub penalty_pct: Percent,
    /// Balance that would be prepaid (end of month 1)
    pub outstanding: Money,
    pub interest_avoided: Money,
    pub penalty_cost: Money,
    pub net_saving: Money,
    /// Prepaying is allowed and beats the penalty
    pub worthwhile: bool,
}

/// Evaluate a full prepayment after the first instalment.
pub fn analyse_prepayment(
    loan: &Loan,
    schedule: &LoanSchedule,
) -> PersonalFinanceResult<PrepaymentAnalysis> {
    let outstanding = schedule.balance_at_month(1);
    let interest_avoided = schedule.interest_after_month(1);
    let penalty_cost = checked_mul(outstanding, to_rate(loan.penalty), "prepayment penalty")?;

    let net_saving = interest_avoided - penalty_cost;
    Ok(PrepaymentAnalysis {
        loan: schedule.loan.clone(),
        prepayment_allowed: loan.prepayment_allowed,
        penalty_pct: loan.penalty,
        outstanding,
        interest_avoided,
        penalty_cost,
        net_saving,
        worthwhile: loan.prepayment_allowed && net_saving > Decimal::ZERO,
    })
}
