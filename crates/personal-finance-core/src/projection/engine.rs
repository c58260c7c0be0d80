use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::advisory::{advice_messages, arbitrage_score, compare_rates, update_credit_score};
use crate::config::EngineConfig;
use crate::error::PersonalFinanceError;
use crate::income::{total_monthly_income, IncomeSource};
use crate::investments::{build_sip_schedule, OneTimeInvestment, Sip, SipSchedule};
use crate::loans::amortization::balloon_warning;
use crate::loans::{amortize_loan, analyse_prepayment, Loan, LoanSchedule, PrepaymentAnalysis};
use crate::projection::net_worth::{net_worth_trajectory, NetWorthPoint};
use crate::time_value::{checked_div, checked_sum};
use crate::types::*;
use crate::PersonalFinanceResult;

fn default_credit_score() -> i32 {
    750
}

/// Immutable snapshot of everything the form collected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    #[serde(default)]
    pub incomes: Vec<IncomeSource>,
    #[serde(default)]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub sips: Vec<Sip>,
    #[serde(default)]
    pub one_time_investments: Vec<OneTimeInvestment>,
    /// Annual inflation in percent
    #[serde(default)]
    pub inflation_rate: Percent,
    #[serde(default = "default_credit_score")]
    pub credit_score: i32,
    /// Date the projection starts from; places dated one-time investments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub currency: Currency,
}

impl ProjectionInput {
    /// Validate every field, reporting the first offending one by path.
    pub fn validate(&self) -> PersonalFinanceResult<()> {
        for (i, income) in self.incomes.iter().enumerate() {
            income.validate(&format!("incomes[{i}]"))?;
        }
        for (i, loan) in self.loans.iter().enumerate() {
            loan.validate(&format!("loans[{i}]"))?;
        }
        for (i, sip) in self.sips.iter().enumerate() {
            sip.validate(&format!("sips[{i}]"))?;
        }
        for (i, inv) in self.one_time_investments.iter().enumerate() {
            inv.validate(&format!("one_time_investments[{i}]"))?;
        }
        if self.inflation_rate <= -Decimal::ONE_HUNDRED {
            return Err(PersonalFinanceError::invalid(
                "inflation_rate",
                "Inflation must be greater than -100%",
            ));
        }
        Ok(())
    }
}

/// Headline monthly figures for the overview panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub monthly_income: Money,
    pub monthly_emi: Money,
    pub monthly_sip: Money,
    /// Total EMI over total income; None without income
    pub emi_to_income: Option<Rate>,
    pub total_loan_principal: Money,
    pub total_loan_interest: Money,
    pub total_sip_invested: Money,
    pub total_sip_value: Money,
    pub total_one_time: Money,
}

/// Everything the renderer needs, rebuilt from scratch on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub currency: Currency,
    pub net_worth: Vec<NetWorthPoint>,
    pub loan_schedules: Vec<LoanSchedule>,
    pub sip_schedules: Vec<SipSchedule>,
    pub prepayment: Vec<PrepaymentAnalysis>,
    pub alerts: Vec<String>,
    pub recommendations: Vec<String>,
    pub arbitrage_score: u8,
    pub credit_score: i32,
    pub summary: ReportSummary,
}

/// Run the full projection. All-or-nothing: the first failing loan, SIP or
/// overflow aborts the whole report.
pub fn build_report(
    input: &ProjectionInput,
    config: &EngineConfig,
) -> PersonalFinanceResult<(Report, Vec<String>)> {
    input.validate()?;
    config.validate()?;
    let mut warnings: Vec<String> = Vec::new();

    let loan_schedules = input
        .loans
        .iter()
        .enumerate()
        .map(|(i, loan)| amortize_loan(loan, i))
        .collect::<PersonalFinanceResult<Vec<_>>>()?;
    for (loan, sched) in input.loans.iter().zip(&loan_schedules) {
        if sched.balloon_payment > Decimal::ZERO {
            warnings.push(balloon_warning(sched, loan.tenure_months));
        }
    }

    let sip_schedules = input
        .sips
        .iter()
        .enumerate()
        .map(|(i, sip)| build_sip_schedule(sip, i))
        .collect::<PersonalFinanceResult<Vec<_>>>()?;

    let net_worth = net_worth_trajectory(
        &loan_schedules,
        &sip_schedules,
        &input.one_time_investments,
        input.as_of,
        input.inflation_rate,
    )?;
    debug!("net worth projected over {} years", net_worth.len());

    let comparisons = compare_rates(&input.loans, &input.sips)?;
    let (alerts, mut recommendations) = advice_messages(&comparisons);

    let prepayment = input
        .loans
        .iter()
        .zip(&loan_schedules)
        .map(|(loan, sched)| analyse_prepayment(loan, sched))
        .collect::<PersonalFinanceResult<Vec<_>>>()?;
    for p in prepayment.iter().filter(|p| !p.prepayment_allowed) {
        recommendations.push(format!(
            "Prepayment not allowed for loan ({}); keep paying EMI",
            p.loan
        ));
    }

    let score = arbitrage_score(input.sips.len(), input.loans.len(), config);
    let credit = update_credit_score(input.credit_score, &input.loans, &input.incomes, config);
    if credit.clamped {
        warnings.push(format!(
            "Credit score clamped to the {}-{} range",
            config.credit_score_min, config.credit_score_max
        ));
    }

    let summary = summarise(input, &loan_schedules, &sip_schedules)?;

    info!(
        "report: {} loans, {} SIPs, {} alerts, score {score}, credit {}",
        loan_schedules.len(),
        sip_schedules.len(),
        alerts.len(),
        credit.updated
    );

    let report = Report {
        currency: input.currency.clone(),
        net_worth,
        loan_schedules,
        sip_schedules,
        prepayment,
        alerts,
        recommendations,
        arbitrage_score: score,
        credit_score: credit.updated,
        summary,
    };
    Ok((report, warnings))
}

fn summarise(
    input: &ProjectionInput,
    loans: &[LoanSchedule],
    sips: &[SipSchedule],
) -> PersonalFinanceResult<ReportSummary> {
    let monthly_income = total_monthly_income(&input.incomes)?;
    let monthly_emi = checked_sum(input.loans.iter().map(|l| l.emi), "monthly EMI")?;
    let emi_to_income = if monthly_income > Decimal::ZERO {
        Some(checked_div(monthly_emi, monthly_income, "EMI to income")?)
    } else {
        None
    };

    Ok(ReportSummary {
        monthly_income,
        monthly_emi,
        monthly_sip: checked_sum(input.sips.iter().map(|s| s.amount), "monthly SIP")?,
        emi_to_income,
        total_loan_principal: checked_sum(loans.iter().map(|l| l.principal), "loan principal")?,
        total_loan_interest: checked_sum(loans.iter().map(|l| l.total_interest), "loan interest")?,
        total_sip_invested: checked_sum(sips.iter().map(|s| s.total_invested), "SIP invested")?,
        total_sip_value: checked_sum(sips.iter().map(|s| s.final_value), "SIP value")?,
        total_one_time: checked_sum(
            input.one_time_investments.iter().map(|o| o.amount),
            "one-time investments",
        )?,
    })
}

/// Compute a report from the raw form lists with the default configuration.
pub fn compute(
    incomes: &[IncomeSource],
    loans: &[Loan],
    sips: &[Sip],
    one_time_investments: &[OneTimeInvestment],
    inflation_rate: Percent,
    credit_score: i32,
) -> PersonalFinanceResult<Report> {
    let input = ProjectionInput {
        incomes: incomes.to_vec(),
        loans: loans.to_vec(),
        sips: sips.to_vec(),
        one_time_investments: one_time_investments.to_vec(),
        inflation_rate,
        credit_score,
        as_of: None,
        currency: Currency::default(),
    };
    build_report(&input, &EngineConfig::default()).map(|(report, _)| report)
}

/// Run the projection and wrap the report in the standard output envelope.
pub fn run_projection(
    input: &ProjectionInput,
    config: &EngineConfig,
) -> PersonalFinanceResult<ComputationOutput<Report>> {
    let start = Instant::now();
    let (report, warnings) = build_report(input, config)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Personal finance projection: amortisation, SIP compounding, inflation-adjusted net worth, loan-vs-SIP arbitrage",
        &serde_json::json!({
            "inflation_rate_pct": input.inflation_rate.to_string(),
            "starting_credit_score": input.credit_score,
            "as_of": input.as_of,
            "config": config,
        }),
        warnings,
        elapsed,
        report,
    ))
}
