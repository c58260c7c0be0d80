pub mod advisory;
pub mod config;
pub mod error;
pub mod income;
pub mod investments;
pub mod loans;
pub mod projection;
pub mod time_value;
pub mod types;

pub use config::EngineConfig;
pub use error::PersonalFinanceError;
pub use projection::{compute, run_projection, ProjectionInput, Report};
pub use types::*;

/// Standard result type for all personal-finance operations
pub type PersonalFinanceResult<T> = Result<T, PersonalFinanceError>;
