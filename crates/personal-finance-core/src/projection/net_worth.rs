use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::investments::{OneTimeInvestment, SipSchedule};
use crate::loans::LoanSchedule;
use crate::time_value::{checked_add, checked_sub, deflate, years_covering};
use crate::types::{Money, Percent};
use crate::PersonalFinanceResult;

/// Net worth at the end of one projection year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthPoint {
    pub year: u32,
    pub sip_value: Money,
    pub one_time_value: Money,
    pub loan_outstanding: Money,
    pub nominal: Money,
    /// Nominal deflated to today's money
    pub real: Money,
}

/// Years the trajectory must span so every loan, SIP and dated investment is
/// visible. Never less than one.
pub fn projection_years(
    loans: &[LoanSchedule],
    sips: &[SipSchedule],
    one_time: &[OneTimeInvestment],
    as_of: Option<NaiveDate>,
) -> u32 {
    let loan_months = loans.iter().map(|l| l.periods.len() as u32).max().unwrap_or(0);
    let sip_months = sips.iter().map(|s| s.periods.len() as u32).max().unwrap_or(0);
    let entry_months = one_time
        .iter()
        .map(|o| o.entry_month(as_of))
        .max()
        .unwrap_or(0);

    years_covering(loan_months.max(sip_months).max(entry_months)).max(1)
}

/// Yearly net worth: SIP values plus one-time investments minus outstanding
/// loan balances, reported both nominal and deflated by `inflation`.
pub fn net_worth_trajectory(
    loans: &[LoanSchedule],
    sips: &[SipSchedule],
    one_time: &[OneTimeInvestment],
    as_of: Option<NaiveDate>,
    inflation: Percent,
) -> PersonalFinanceResult<Vec<NetWorthPoint>> {
    let years = projection_years(loans, sips, one_time, as_of);
    let mut points = Vec::with_capacity(years as usize);

    for year in 1..=years {
        let month = year * 12;

        let mut sip_value = Decimal::ZERO;
        for s in sips {
            sip_value = checked_add(sip_value, s.value_at_month(month), "net worth SIP total")?;
        }

        let mut one_time_value = Decimal::ZERO;
        for o in one_time {
            one_time_value = checked_add(
                one_time_value,
                o.value_at_month(month, as_of)?,
                "net worth one-time total",
            )?;
        }

        let mut loan_outstanding = Decimal::ZERO;
        for l in loans {
            loan_outstanding =
                checked_add(loan_outstanding, l.balance_at_month(month), "net worth loan total")?;
        }

        let assets = checked_add(sip_value, one_time_value, "net worth assets")?;
        let nominal = checked_sub(assets, loan_outstanding, "net worth")?;
        let real = deflate(nominal, inflation, year)?;

        points.push(NetWorthPoint {
            year,
            sip_value,
            one_time_value,
            loan_outstanding,
            nominal,
            real,
        });
    }

    Ok(points)
}
