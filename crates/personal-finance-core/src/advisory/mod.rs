pub mod arbitrage;
pub mod credit_score;

pub use arbitrage::{
    advice_messages, advise, arbitrage_score, compare_rates, ArbitrageAdvice, Preference,
    RateComparison,
};
pub use credit_score::{emi_exceeds_income, update_credit_score, CreditScoreUpdate};
