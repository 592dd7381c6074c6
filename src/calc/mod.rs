//! Energy usage and savings calculations over appliance profiles.

/// Per-day slicing of month timelines.
pub mod day;
pub mod report;
pub mod savings;
/// On-time accumulation.
pub mod usage;

pub use day::{day_profile, savings_for_day, usage_for_day};
pub use report::{DayUsage, UsageReport};
pub use savings::savings;
pub use usage::usage;
