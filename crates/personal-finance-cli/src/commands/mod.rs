pub mod advisory;
pub mod investments;
pub mod loans;
pub mod projection;
