use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::income::{primary_monthly_income, IncomeSource};
use crate::loans::Loan;
use crate::types::Money;

/// Outcome of the EMI-versus-income credit heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditScoreUpdate {
    pub previous: i32,
    pub updated: i32,
    pub emi_exceeds_income: bool,
    /// The update hit the configured floor or ceiling
    pub clamped: bool,
}

/// Whether any single EMI is larger than the primary monthly income.
pub fn emi_exceeds_income(loans: &[Loan], primary_income: Money) -> bool {
    loans.iter().any(|l| l.emi > primary_income)
}

/// Apply the placeholder credit heuristic: penalise an EMI above the primary
/// income, otherwise reward, and clamp to the configured range.
pub fn update_credit_score(
    score: i32,
    loans: &[Loan],
    incomes: &[IncomeSource],
    config: &EngineConfig,
) -> CreditScoreUpdate {
    let overloaded = emi_exceeds_income(loans, primary_monthly_income(incomes));
    let delta = if overloaded {
        config.emi_overload_penalty.saturating_neg()
    } else {
        config.healthy_emi_reward
    };

    let raw = score.saturating_add(delta);
    let updated = raw.clamp(config.credit_score_min, config.credit_score_max);
    let clamped = updated != raw;
    if clamped {
        warn!("credit score {raw} clamped to {updated}");
    }
    debug!("credit score {score} -> {updated} (emi overload: {overloaded})");

    CreditScoreUpdate {
        previous: score,
        updated,
        emi_exceeds_income: overloaded,
        clamped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::income::{Frequency, IncomeType};
    use crate::loans::InterestType;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn income(amount: Decimal) -> IncomeSource {
        IncomeSource {
            amount,
            income_type: IncomeType::Salary,
            frequency: Frequency::Monthly,
        }
    }

    fn loan_with_emi(emi: Decimal) -> Loan {
        Loan {
            loan_type: "Personal".into(),
            principal: dec!(100_000),
            emi,
            rate: dec!(10),
            tenure_months: 12,
            interest_type: InterestType::Simple,
            prepayment_allowed: true,
            penalty: Decimal::ZERO,
        }
    }

    #[test]
    fn test_emi_above_income_penalised() {
        let u = update_credit_score(
            750,
            &[loan_with_emi(dec!(9_000))],
            &[income(dec!(8_000))],
            &EngineConfig::default(),
        );
        assert_eq!(u.updated, 730);
        assert!(u.emi_exceeds_income);
        assert!(!u.clamped);
    }

    #[test]
    fn test_affordable_emi_rewarded() {
        let u = update_credit_score(
            750,
            &[loan_with_emi(dec!(9_000))],
            &[income(dec!(9_000))],
            &EngineConfig::default(),
        );
        assert_eq!(u.updated, 760);
    }

    #[test]
    fn test_no_loans_rewarded() {
        let u = update_credit_score(700, &[], &[], &EngineConfig::default());
        assert_eq!(u.updated, 710);
    }

    #[test]
    fn test_only_first_income_counts() {
        let incomes = vec![income(dec!(1_000)), income(dec!(50_000))];
        let u = update_credit_score(
            750,
            &[loan_with_emi(dec!(9_000))],
            &incomes,
            &EngineConfig::default(),
        );
        assert!(u.emi_exceeds_income);
    }

    #[test]
    fn test_annual_income_normalised() {
        let incomes = vec![IncomeSource {
            amount: dec!(120_000),
            income_type: IncomeType::Business,
            frequency: Frequency::Annual,
        }];
        let u = update_credit_score(
            750,
            &[loan_with_emi(dec!(9_000))],
            &incomes,
            &EngineConfig::default(),
        );
        assert!(!u.emi_exceeds_income);
    }

    #[test]
    fn test_unvalidated_extreme_penalty_saturates() {
        let cfg = EngineConfig {
            emi_overload_penalty: i32::MIN,
            ..EngineConfig::default()
        };
        let u = update_credit_score(750, &[loan_with_emi(dec!(9_000))], &[income(dec!(8_000))], &cfg);
        assert_eq!(u.updated, cfg.credit_score_max);
        assert!(u.clamped);
    }

    #[test]
    fn test_extremes_clamped() {
        let cfg = EngineConfig::default();
        for score in [i32::MIN, -50, 0, 299, 895, 900, 5_000, i32::MAX] {
            for emi in [dec!(1), dec!(1_000_000)] {
                let u = update_credit_score(score, &[loan_with_emi(emi)], &[income(dec!(500))], &cfg);
                assert!(
                    (300..=900).contains(&u.updated),
                    "score {score} emi {emi} gave {}",
                    u.updated
                );
            }
        }
        let u = update_credit_score(895, &[], &[], &cfg);
        assert_eq!(u.updated, 900);
        assert!(u.clamped);
    }
}
