use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::EngineConfig;
use crate::investments::Sip;
use crate::loans::Loan;
use crate::time_value::checked_sub;
use crate::types::*;
use crate::PersonalFinanceResult;

/// Which side of a loan/SIP pair the spare cash should go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preference {
    PrepayLoan,
    ContinueSip,
}

/// One loan/SIP pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateComparison {
    pub loan: String,
    pub sip: String,
    pub loan_effective_rate: Percent,
    pub sip_cagr: Percent,
    /// Loan rate minus SIP CAGR; positive favours prepayment
    pub spread: Percent,
    pub preference: Preference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageAdvice {
    pub comparisons: Vec<RateComparison>,
    pub alerts: Vec<String>,
    pub recommendations: Vec<String>,
    pub arbitrage_score: u8,
}

/// Compare every loan against every SIP, loans outer and SIPs inner.
///
/// A loan whose effective annual rate beats the SIP's CAGR raises an alert to
/// prepay it; otherwise (ties included) the SIP should continue.
pub fn compare_rates(loans: &[Loan], sips: &[Sip]) -> PersonalFinanceResult<Vec<RateComparison>> {
    let mut comparisons = Vec::with_capacity(loans.len() * sips.len());

    for (li, loan) in loans.iter().enumerate() {
        let loan_label = loan.label(li);
        let loan_rate = loan.effective_annual_rate()?;

        for (si, sip) in sips.iter().enumerate() {
            let preference = if loan_rate > sip.cagr {
                Preference::PrepayLoan
            } else {
                Preference::ContinueSip
            };
            comparisons.push(RateComparison {
                loan: loan_label.clone(),
                sip: sip.label(si),
                loan_effective_rate: loan_rate,
                sip_cagr: sip.cagr,
                spread: checked_sub(loan_rate, sip.cagr, "rate spread")?,
                preference,
            });
        }
    }

    Ok(comparisons)
}

impl RateComparison {
    pub fn message(&self) -> String {
        match self.preference {
            Preference::PrepayLoan => format!(
                "Consider repaying loan ({}) with higher interest than SIP ({})",
                self.loan, self.sip
            ),
            Preference::ContinueSip => format!(
                "Continue SIP ({}) instead of loan prepayment ({})",
                self.sip, self.loan
            ),
        }
    }
}

/// Split comparisons into alerts and recommendations, preserving pair order.
pub fn advice_messages(comparisons: &[RateComparison]) -> (Vec<String>, Vec<String>) {
    let mut alerts = Vec::new();
    let mut recommendations = Vec::new();
    for c in comparisons {
        match c.preference {
            Preference::PrepayLoan => alerts.push(c.message()),
            Preference::ContinueSip => recommendations.push(c.message()),
        }
    }
    (alerts, recommendations)
}

/// Count-based arbitrage score: `baseline + (sips - loans) * step`, clamped
/// to [0, 100]. Rates play no part.
pub fn arbitrage_score(sip_count: usize, loan_count: usize, config: &EngineConfig) -> u8 {
    let diff = sip_count as i64 - loan_count as i64;
    let raw = (config.arbitrage_baseline as i64)
        .saturating_add(diff.saturating_mul(config.arbitrage_step as i64));
    raw.clamp(0, 100) as u8
}

/// Full loan-versus-SIP advice for the CLI and bindings.
pub fn advise(
    loans: &[Loan],
    sips: &[Sip],
    config: &EngineConfig,
) -> PersonalFinanceResult<ComputationOutput<ArbitrageAdvice>> {
    let start = Instant::now();
    config.validate()?;
    for (i, loan) in loans.iter().enumerate() {
        loan.validate(&format!("loans[{i}]"))?;
    }
    for (i, sip) in sips.iter().enumerate() {
        sip.validate(&format!("sips[{i}]"))?;
    }

    let comparisons = compare_rates(loans, sips)?;
    let (alerts, recommendations) = advice_messages(&comparisons);
    let score = arbitrage_score(sips.len(), loans.len(), config);

    let mut warnings = Vec::new();
    if loans.is_empty() || sips.is_empty() {
        warnings.push("No loan/SIP pairs to compare; only the count-based score applies".into());
    }
    if comparisons.iter().any(|c| c.spread == Decimal::ZERO) {
        warnings.push("Equal loan rate and CAGR treated as a reason to continue the SIP".into());
    }
    debug!(
        "arbitrage: {} pairs, {} alerts, score {score}",
        comparisons.len(),
        alerts.len()
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Pairwise loan effective rate vs SIP CAGR; count-based arbitrage score",
        &serde_json::json!({
            "loans": loans.len(),
            "sips": sips.len(),
            "baseline": config.arbitrage_baseline,
            "step": config.arbitrage_step,
        }),
        warnings,
        elapsed,
        ArbitrageAdvice {
            comparisons,
            alerts,
            recommendations,
            arbitrage_score: score,
        },
    ))
}
