pub mod engine;
pub mod net_worth;

pub use engine::{build_report, compute, run_projection, ProjectionInput, Report, ReportSummary};
pub use net_worth::{net_worth_trajectory, projection_years, NetWorthPoint};
