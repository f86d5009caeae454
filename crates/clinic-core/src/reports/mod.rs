//! Reporting: fee summaries, the fee register export and dashboard stats.

mod fees;
mod dashboard;

pub use fees::*;
pub use dashboard::*;
