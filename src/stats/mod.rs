//! Stats module - descriptive statistics, correlation and moments

mod calculator;
mod correlation;
mod moments;

pub use calculator::{ColumnSummary, GroupMean, StatsCalculator};
pub use correlation::{pearson, CorrelationMatrix};
pub use moments::Moments;
