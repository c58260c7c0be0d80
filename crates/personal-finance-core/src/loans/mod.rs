pub mod amortization;
pub mod prepayment;

pub use amortization::{amortize_loan, build_loan_schedule, InterestType, Loan, LoanPeriod, LoanSchedule};
pub use prepayment::{analyse_prepayment, PrepaymentAnalysis};
