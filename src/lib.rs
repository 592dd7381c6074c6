//! Appliance energy usage and auto-off savings from sparse state-change events.

/// Usage, savings, per-day slicing, and reporting.
pub mod calc;
pub mod config;
pub mod error;
/// CSV import of events and export of reports.
pub mod io;
pub mod profile;
pub mod runner;

#[cfg(feature = "api")]
pub mod api;

pub use calc::{savings, usage, usage_for_day};
pub use error::{DayError, EnergyError};
