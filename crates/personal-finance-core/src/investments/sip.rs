use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::time_value::{checked_add, checked_mul, monthly_rate};
use crate::types::*;
use crate::PersonalFinanceResult;

/// A systematic investment plan: a fixed monthly contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sip {
    #[serde(default)]
    pub name: String,
    /// Monthly contribution
    pub amount: Money,
    /// Expected compound annual growth, in percent
    pub cagr: Percent,
    pub horizon_years: u32,
    #[serde(default)]
    pub delay_months: u32,
}

/// Longest contribution horizon accepted.
pub const MAX_HORIZON_YEARS: u32 = 100;
/// Longest start delay accepted.
pub const MAX_DELAY_MONTHS: u32 = 1200;

impl Sip {
    pub fn label(&self, index: usize) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            format!("SIP {}", index + 1)
        } else {
            trimmed.to_string()
        }
    }

    /// Months covered by the schedule: the delay plus the contribution horizon.
    pub fn total_months(&self) -> u32 {
        self.delay_months.saturating_add(self.horizon_years.saturating_mul(12))
    }

    pub fn validate(&self, field: &str) -> PersonalFinanceResult<()> {
        if self.amount < Decimal::ZERO {
            return Err(PersonalFinanceError::invalid(
                format!("{field}.amount"),
                "SIP amount must be >= 0",
            ));
        }
        if self.cagr <= -Decimal::ONE_HUNDRED {
            return Err(PersonalFinanceError::invalid(
                format!("{field}.cagr"),
                "CAGR must be greater than -100%",
            ));
        }
        if self.horizon_years == 0 {
            return Err(PersonalFinanceError::invalid(
                format!("{field}.horizon_years"),
                "Horizon must be at least 1 year",
            ));
        }
        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(PersonalFinanceError::invalid(
                format!("{field}.horizon_years"),
                format!("Horizon must not exceed {MAX_HORIZON_YEARS} years"),
            ));
        }
        if self.delay_months > MAX_DELAY_MONTHS {
            return Err(PersonalFinanceError::invalid(
                format!("{field}.delay_months"),
                format!("Delay must not exceed {MAX_DELAY_MONTHS} months"),
            ));
        }
        Ok(())
    }

    /// Lazy month-by-month projection. Each call starts from month 1, so the
    /// sequence can be replayed as often as needed.
    pub fn projection(&self) -> SipProjection {
        SipProjection {
            amount: self.amount,
            growth: Decimal::ONE + monthly_rate(self.cagr),
            delay_months: self.delay_months,
            total_months: self.total_months(),
            month: 0,
            value: Decimal::ZERO,
            invested: Decimal::ZERO,
            failed: false,
        }
    }
}

/// Value of a SIP at the end of one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipPeriod {
    pub month: u32,
    pub contribution: Money,
    pub growth: Money,
    pub invested: Money,
    pub value: Money,
}

/// Iterator over a SIP's month-end values.
///
/// Contributions are made at the start of each month after the delay and the
/// running value compounds at cagr / 12 for the month. Yields an error once
/// (then stops) if a value overflows.
#[derive(Debug, Clone)]
pub struct SipProjection {
    amount: Money,
    growth: Decimal,
    delay_months: u32,
    total_months: u32,
    month: u32,
    value: Money,
    invested: Money,
    failed: bool,
}

impl SipProjection {
    fn step(&mut self) -> PersonalFinanceResult<SipPeriod> {
        self.month += 1;
        let contribution = if self.month > self.delay_months {
            self.amount
        } else {
            Decimal::ZERO
        };
        let opening = checked_add(self.value, contribution, "SIP contribution")?;
        let closing = checked_mul(opening, self.growth, "SIP growth")?;
        self.invested = checked_add(self.invested, contribution, "SIP invested")?;
        self.value = closing;

        Ok(SipPeriod {
            month: self.month,
            contribution,
            growth: closing - opening,
            invested: self.invested,
            value: closing,
        })
    }
}

impl Iterator for SipProjection {
    type Item = PersonalFinanceResult<SipPeriod>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.month >= self.total_months {
            return None;
        }
        let period = self.step();
        if period.is_err() {
            self.failed = true;
        }
        Some(period)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.failed {
            0
        } else {
            (self.total_months - self.month) as usize
        };
        (0, Some(remaining))
    }
}

/// Validate a SIP and return its lazy projection.
pub fn project_sip(sip: &Sip, index: usize) -> PersonalFinanceResult<SipProjection> {
    sip.validate(&format!("sips[{index}]"))?;
    Ok(sip.projection())
}

/// Month-by-month value schedule for one SIP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipSchedule {
    pub sip: String,
    pub cagr: Percent,
    pub periods: Vec<SipPeriod>,
    pub total_invested: Money,
    pub final_value: Money,
    pub gain: Money,
}

impl SipSchedule {
    /// Value at the end of `month`. A finished SIP holds its final value.
    pub fn value_at_month(&self, month: u32) -> Money {
        if month == 0 {
            return Decimal::ZERO;
        }
        self.periods
            .get(month as usize - 1)
            .map(|p| p.value)
            .unwrap_or(self.final_value)
    }

    pub fn yearly_values(&self) -> Vec<Money> {
        let years = crate::time_value::years_covering(self.periods.len() as u32);
        (1..=years).map(|y| self.value_at_month(y * 12)).collect()
    }
}

/// Run a SIP projection to completion.
pub fn build_sip_schedule(sip: &Sip, index: usize) -> PersonalFinanceResult<SipSchedule> {
    let periods = project_sip(sip, index)?.collect::<PersonalFinanceResult<Vec<_>>>()?;

    let total_invested = periods.last().map(|p| p.invested).unwrap_or(Decimal::ZERO);
    let final_value = periods.last().map(|p| p.value).unwrap_or(Decimal::ZERO);
    let label = sip.label(index);

    debug!(
        "{label}: {} months, invested {total_invested}, value {final_value}",
        periods.len()
    );

    Ok(SipSchedule {
        sip: label,
        cagr: sip.cagr,
        periods,
        total_invested,
        final_value,
        gain: final_value - total_invested,
    })
}

/// Project a single SIP and wrap it in the standard output envelope.
pub fn project_sip_growth(sip: &Sip) -> PersonalFinanceResult<ComputationOutput<SipSchedule>> {
    let start = Instant::now();
    let schedule = build_sip_schedule(sip, 0)?;

    let mut warnings = Vec::new();
    if sip.cagr < Decimal::ZERO {
        warnings.push(format!(
            "{}: negative CAGR of {}% shrinks the corpus every month",
            schedule.sip, sip.cagr
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SIP growth (monthly contributions compounded at CAGR / 12)",
        &serde_json::json!({
            "sip": schedule.sip,
            "monthly_amount": sip.amount.to_string(),
            "cagr_pct": sip.cagr.to_string(),
            "horizon_years": sip.horizon_years,
            "delay_months": sip.delay_months,
        }),
        warnings,
        elapsed,
        schedule,
    ))
}
