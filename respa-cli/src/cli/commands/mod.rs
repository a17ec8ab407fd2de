//! Command handlers

pub mod import;
pub mod serve;
pub mod units;
