pub mod lump_sum;
pub mod sip;

pub use lump_sum::OneTimeInvestment;
pub use sip::{build_sip_schedule, project_sip, project_sip_growth, Sip, SipPeriod, SipProjection, SipSchedule};
