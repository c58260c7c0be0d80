use personal_finance_core::advisory::{advise, arbitrage_score, update_credit_score, Preference};
use personal_finance_core::income::{Frequency, IncomeSource, IncomeType};
use personal_finance_core::investments::Sip;
use personal_finance_core::loans::{InterestType, Loan};
use personal_finance_core::EngineConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn loan(label: &str, rate: Decimal, emi: Decimal) -> Loan {
    Loan {
        loan_type: label.into(),
        principal: dec!(500_000),
        emi,
        rate,
        tenure_months: 60,
        interest_type: InterestType::Simple,
        prepayment_allowed: true,
        penalty: Decimal::ZERO,
    }
}

fn sip(name: &str, cagr: Decimal) -> Sip {
    Sip {
        name: name.into(),
        amount: dec!(3_000),
        cagr,
        horizon_years: 10,
        delay_months: 0,
    }
}

// ===========================================================================
// Arbitrage score
// ===========================================================================

#[test]
fn test_score_always_in_range() {
    let cfg = EngineConfig::default();
    for sips in 0..40 {
        for loans in 0..40 {
            let s = arbitrage_score(sips, loans, &cfg);
            assert!(s <= 100);
        }
    }
}

#[test]
fn test_more_sips_never_lower_score() {
    let configs = [
        EngineConfig::default(),
        EngineConfig {
            arbitrage_baseline: 0,
            arbitrage_step: 1,
            ..EngineConfig::default()
        },
        EngineConfig {
            arbitrage_baseline: 100,
            arbitrage_step: 35,
            ..EngineConfig::default()
        },
    ];
    for cfg in &configs {
        for loans in 0..15 {
            let mut previous = arbitrage_score(0, loans, cfg);
            for sips in 1..30 {
                let s = arbitrage_score(sips, loans, cfg);
                assert!(s >= previous, "loans {loans} sips {sips}");
                previous = s;
            }
        }
    }
}

#[test]
fn test_score_ignores_rates() {
    let cfg = EngineConfig::default();
    let cheap = advise(&[loan("A", dec!(1), dec!(20_000))], &[sip("X", dec!(30))], &cfg).unwrap();
    let dear = advise(&[loan("A", dec!(30), dec!(20_000))], &[sip("X", dec!(1))], &cfg).unwrap();
    assert_eq!(cheap.result.arbitrage_score, dear.result.arbitrage_score);
    assert_ne!(
        cheap.result.comparisons[0].preference,
        dear.result.comparisons[0].preference
    );
}

// ===========================================================================
// Advice messages
// ===========================================================================

#[test]
fn test_advice_is_cross_product_in_order() {
    let loans = vec![
        loan("Gold", dec!(11), dec!(20_000)),
        loan("", dec!(6), dec!(20_000)),
    ];
    let sips = vec![sip("Smallcap", dec!(15)), sip("", dec!(9))];
    let out = advise(&loans, &sips, &EngineConfig::default()).unwrap().result;

    assert_eq!(out.comparisons.len(), 4);
    assert_eq!(
        out.alerts,
        vec!["Consider repaying loan (Gold) with higher interest than SIP (SIP 2)".to_string()]
    );
    assert_eq!(
        out.recommendations,
        vec![
            "Continue SIP (Smallcap) instead of loan prepayment (Gold)".to_string(),
            "Continue SIP (Smallcap) instead of loan prepayment (Loan 2)".to_string(),
            "Continue SIP (SIP 2) instead of loan prepayment (Loan 2)".to_string(),
        ]
    );
    assert_eq!(out.comparisons[1].preference, Preference::PrepayLoan);
    assert_eq!(out.comparisons[1].spread, dec!(2));
}

#[test]
fn test_advice_rejects_invalid_sip() {
    let err = advise(&[], &[sip("Bad", dec!(-150))], &EngineConfig::default());
    assert!(err.is_err());
}

// ===========================================================================
// Credit score
// ===========================================================================

#[test]
fn test_credit_score_stays_in_custom_range() {
    let cfg = EngineConfig {
        credit_score_min: 1,
        credit_score_max: 999,
        emi_overload_penalty: 500,
        healthy_emi_reward: 500,
        ..EngineConfig::default()
    };
    let incomes = vec![IncomeSource {
        amount: dec!(15_000),
        income_type: IncomeType::Other,
        frequency: Frequency::Monthly,
    }];
    for score in [-1_000, 1, 250, 500, 750, 999, 10_000] {
        for emi in [dec!(5_000), dec!(50_000)] {
            let u = update_credit_score(score, &[loan("Edu", dec!(9), emi)], &incomes, &cfg);
            assert!((1..=999).contains(&u.updated));
        }
    }
}

#[test]
fn test_credit_penalty_uses_any_loan() {
    let incomes = vec![IncomeSource {
        amount: dec!(40_000),
        income_type: IncomeType::Salary,
        frequency: Frequency::Monthly,
    }];
    let loans = vec![
        loan("Small", dec!(9), dec!(10_000)),
        loan("Huge", dec!(9), dec!(45_000)),
    ];
    let u = update_credit_score(800, &loans, &incomes, &EngineConfig::default());
    assert_eq!(u.updated, 780);
    assert!(u.emi_exceeds_income);
}
