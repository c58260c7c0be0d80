use serde::{Deserialize, Serialize};

use crate::error::PersonalFinanceError;
use crate::PersonalFinanceResult;

/// Tunable constants for the advisory heuristics.
///
/// Every field has a default, so a partial JSON/YAML document only needs to
/// name the values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lowest credit score the update may produce.
    pub credit_score_min: i32,
    /// Highest credit score the update may produce.
    pub credit_score_max: i32,
    /// Points removed when an EMI exceeds the primary income.
    pub emi_overload_penalty: i32,
    /// Points added when every EMI fits within the primary income.
    pub healthy_emi_reward: i32,
    /// Arbitrage score when SIP and loan counts are equal.
    pub arbitrage_baseline: i32,
    /// Arbitrage score change per unit of (SIP count - loan count).
    pub arbitrage_step: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            credit_score_min: 300,
            credit_score_max: 900,
            emi_overload_penalty: 20,
            healthy_emi_reward: 10,
            arbitrage_baseline: 50,
            arbitrage_step: 10,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> PersonalFinanceResult<()> {
        if self.credit_score_min > self.credit_score_max {
            return Err(PersonalFinanceError::invalid(
                "config.credit_score_min",
                "credit_score_min must be <= credit_score_max",
            ));
        }
        if self.emi_overload_penalty < 0 || self.healthy_emi_reward < 0 {
            return Err(PersonalFinanceError::invalid(
                "config.emi_overload_penalty",
                "credit score penalty and reward must be >= 0",
            ));
        }
        if !(0..=100).contains(&self.arbitrage_baseline) {
            return Err(PersonalFinanceError::invalid(
                "config.arbitrage_baseline",
                "arbitrage_baseline must lie in [0, 100]",
            ));
        }
        if self.arbitrage_step < 0 {
            return Err(PersonalFinanceError::invalid(
                "config.arbitrage_step",
                "arbitrage_step must be >= 0 so more SIPs never lower the score",
            ));
        }
        Ok(())
    }
}
