use personal_finance_core::investments::{build_sip_schedule, Sip};
use personal_finance_core::loans::{amortize_loan, InterestType, Loan};
use personal_finance_core::PersonalFinanceError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Loan schedules: non-increasing, closed by the end of tenure, or rejected
// ===========================================================================

fn loan_grid() -> Vec<Loan> {
    let mut loans = Vec::new();
    for interest_type in [InterestType::Simple, InterestType::Compound] {
        for principal in [dec!(10_000), dec!(250_000), dec!(5_000_000)] {
            for rate in [dec!(0), dec!(7.5), dec!(14), dec!(36)] {
                for tenure_months in [1, 12, 60, 240] {
                    for emi_fraction in [dec!(0.001), dec!(0.02), dec!(0.1), dec!(1.5)] {
                        loans.push(Loan {
                            loan_type: format!("{interest_type:?}-{principal}-{rate}"),
                            principal,
                            emi: principal * emi_fraction,
                            rate,
                            tenure_months,
                            interest_type,
                            prepayment_allowed: true,
                            penalty: Decimal::ZERO,
                        });
                    }
                }
            }
        }
    }
    loans
}

#[test]
fn test_loan_schedules_non_increasing_and_closed() {
    let mut valid = 0;
    let mut rejected = 0;

    for (i, loan) in loan_grid().iter().enumerate() {
        match amortize_loan(loan, i) {
            Ok(sched) => {
                valid += 1;
                assert_eq!(sched.periods.len(), loan.tenure_months as usize);

                let mut previous = loan.principal;
                for p in &sched.periods {
                    assert!(
                        p.closing_balance <= previous,
                        "{} month {} rose from {} to {}",
                        sched.loan,
                        p.month,
                        previous,
                        p.closing_balance
                    );
                    assert!(p.closing_balance >= Decimal::ZERO);
                    previous = p.closing_balance;
                }
                assert_eq!(sched.periods.last().unwrap().closing_balance, Decimal::ZERO);
            }
            Err(PersonalFinanceError::InvalidLoan { .. }) => {
                rejected += 1;
                let monthly_interest = loan.principal * loan.rate / dec!(1200);
                assert!(loan.emi <= monthly_interest + dec!(0.0000001));
            }
            Err(other) => panic!("unexpected error {other:?}"),
        }
    }

    assert!(valid > 0);
    assert!(rejected > 0);
}

#[test]
fn test_total_paid_covers_principal_and_interest() {
    for (i, loan) in loan_grid().iter().enumerate() {
        if let Ok(sched) = amortize_loan(loan, i) {
            let repaid: Decimal = sched
                .periods
                .iter()
                .map(|p| p.principal_repaid + p.balloon_payment)
                .sum();
            let tolerance = dec!(0.000001);
            assert!((repaid - loan.principal).abs() < tolerance, "{}", sched.loan);
            assert!(
                (sched.total_paid - loan.principal - sched.total_interest).abs() < tolerance,
                "{}",
                sched.loan
            );
        }
    }
}

#[test]
fn test_compound_interest_never_exceeds_simple() {
    let base = Loan {
        loan_type: "Home".into(),
        principal: dec!(1_000_000),
        emi: dec!(20_000),
        rate: dec!(9),
        tenure_months: 72,
        interest_type: InterestType::Simple,
        prepayment_allowed: true,
        penalty: Decimal::ZERO,
    };
    let flat = amortize_loan(&base, 0).unwrap();
    let reducing = amortize_loan(
        &Loan {
            interest_type: InterestType::Compound,
            ..base
        },
        0,
    )
    .unwrap();
    assert!(reducing.total_interest < flat.total_interest);
}

// ===========================================================================
// SIP schedules: non-decreasing for non-negative CAGR
// ===========================================================================

#[test]
fn test_sip_values_non_decreasing() {
    for cagr in [dec!(0), dec!(4), dec!(12), dec!(25), dec!(60)] {
        for amount in [dec!(0), dec!(500), dec!(25_000)] {
            for horizon_years in [1, 5, 30] {
                for delay_months in [0, 1, 18] {
                    let sip = Sip {
                        name: format!("cagr-{cagr}"),
                        amount,
                        cagr,
                        horizon_years,
                        delay_months,
                    };
                    let sched = build_sip_schedule(&sip, 0).unwrap();
                    assert_eq!(
                        sched.periods.len() as u32,
                        delay_months + horizon_years * 12
                    );
                    let mut previous = Decimal::ZERO;
                    for p in &sched.periods {
                        assert!(p.value >= previous, "{} month {}", sched.sip, p.month);
                        previous = p.value;
                    }
                    assert_eq!(sched.total_invested, amount * Decimal::from(horizon_years * 12));
                }
            }
        }
    }
}

#[test]
fn test_negative_cagr_loses_value() {
    let sip = Sip {
        name: "Falling".into(),
        amount: dec!(1_000),
        cagr: dec!(-20),
        horizon_years: 3,
        delay_months: 0,
    };
    let sched = build_sip_schedule(&sip, 0).unwrap();
    assert!(sched.final_value < sched.total_invested);
    assert!(sched.gain < Decimal::ZERO);
}

#[test]
fn test_sip_yearly_values_match_month_ends() {
    let sip = Sip {
        name: "Hybrid".into(),
        amount: dec!(2_000),
        cagr: dec!(10),
        horizon_years: 3,
        delay_months: 0,
    };
    let sched = build_sip_schedule(&sip, 0).unwrap();
    let yearly = sched.yearly_values();
    assert_eq!(yearly.len(), 3);
    assert_eq!(yearly[0], sched.periods[11].value);
    assert_eq!(yearly[2], sched.final_value);
}
