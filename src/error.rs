//! Error types for profile validation and energy calculations.

use std::fmt;

use thiserror::Error;

/// Reason a day number was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayError {
    /// The value has a fractional part (or is not a finite number).
    NotInteger,
    /// The value lies outside `[1, DAYS_PER_YEAR]`.
    OutOfRange,
}

impl fmt::Display for DayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInteger => write!(f, "must be an integer"),
            Self::OutOfRange => write!(f, "day out of range"),
        }
    }
}

/// Failure raised while validating a profile or computing a metric.
///
/// Every variant aborts the whole computation; no partial totals are returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnergyError {
    /// The profile is structurally unusable (unparseable, or `events` missing).
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    /// A state name is not part of the alphabet for this calculation.
    #[error("invalid state \"{found}\", expected one of: {}", .allowed.join(", "))]
    InvalidState {
        found: String,
        allowed: &'static [&'static str],
    },

    /// An event timestamp is missing, not a number, negative, fractional, or
    /// past the timeline end. `timestamp` is the offending value as received.
    #[error("invalid event timestamp {timestamp}, expected an integer in [0, {limit})")]
    InvalidTimestamp { timestamp: String, limit: u32 },

    /// The requested day number cannot be used.
    #[error("invalid day: {0}")]
    InvalidDay(DayError),

    /// Event `index` is earlier than the event before it.
    #[error("event {index} is out of order: timestamps must be non-decreasing")]
    UnorderedEvents { index: usize },

    /// A day range whose first day comes after its last.
    #[error("invalid day range {first}..={last}: first day must not exceed last day")]
    InvalidDayRange { first: u32, last: u32 },
}

impl From<DayError> for EnergyError {
    fn from(reason: DayError) -> Self {
        Self::InvalidDay(reason)
    }
}
