//! Fixed time axis: period length, year length, and day addressing.

use std::fmt;

use serde::Serialize;

use crate::error::DayError;

/// Number of timestamp units (minutes) in one period (a day).
pub const PERIOD_LENGTH: u32 = 1440;

/// Number of uniform-length days in the calendar.
pub const DAYS_PER_YEAR: u32 = 365;

/// Exclusive upper bound of a month/year timeline.
pub const YEAR_LENGTH: u32 = PERIOD_LENGTH * DAYS_PER_YEAR;

/// A validated day number in `[1, DAYS_PER_YEAR]`.
///
/// # Examples
///
/// ```
/// use appliance_energy::profile::period::{Day, PERIOD_LENGTH};
///
/// let day = Day::new(3).unwrap();
/// assert_eq!(day.start(), 2 * PERIOD_LENGTH);
/// assert_eq!(day.end(), 3 * PERIOD_LENGTH - 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Day(u32);

impl Day {
    /// First day of the calendar.
    pub const FIRST: Day = Day(1);
    /// Last day of the calendar.
    pub const LAST: Day = Day(DAYS_PER_YEAR);

    /// Creates a day from an integer day number.
    ///
    /// # Errors
    ///
    /// Returns [`DayError::OutOfRange`] outside `[1, DAYS_PER_YEAR]`.
    pub fn new(number: i64) -> Result<Self, DayError> {
        if (1..=i64::from(DAYS_PER_YEAR)).contains(&number) {
            Ok(Self(number as u32))
        } else {
            Err(DayError::OutOfRange)
        }
    }

    /// Creates a day from an arbitrary number, as received from untyped input.
    ///
    /// Integrality is checked before range, so `3.5` is `NotInteger` and
    /// `-5` is `OutOfRange`.
    ///
    /// # Errors
    ///
    /// Returns [`DayError::NotInteger`] for fractional or non-finite values and
    /// [`DayError::OutOfRange`] for integers outside the calendar.
    pub fn from_number(value: f64) -> Result<Self, DayError> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(DayError::NotInteger);
        }
        if value < 1.0 || value > f64::from(DAYS_PER_YEAR) {
            return Err(DayError::OutOfRange);
        }
        Ok(Self(value as u32))
    }

    /// One-based day number.
    pub fn number(self) -> u32 {
        self.0
    }

    /// Absolute timestamp of the first minute of this day.
    pub fn start(self) -> u32 {
        (self.0 - 1) * PERIOD_LENGTH
    }

    /// Absolute timestamp of the last minute of this day (inclusive).
    pub fn end(self) -> u32 {
        self.0 * PERIOD_LENGTH - 1
    }

    /// Returns `true` when `timestamp` falls inside `[start, end]`.
    pub fn contains(self, timestamp: u32) -> bool {
        timestamp >= self.start() && timestamp <= self.end()
    }

    /// Iterates days from `self` through `last`, inclusive.
    pub fn through(self, last: Day) -> impl Iterator<Item = Day> {
        (self.0..=last.0).map(Day)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_calendar_bounds() {
        assert_eq!(Day::new(1), Ok(Day::FIRST));
        assert_eq!(Day::new(365), Ok(Day::LAST));
    }

    #[test]
    fn new_rejects_out_of_range() {
        for n in [-5, 0, 366] {
            assert_eq!(Day::new(n), Err(DayError::OutOfRange), "day {n}");
        }
    }

    #[test]
    fn from_number_checks_integrality_first() {
        assert_eq!(Day::from_number(3.76), Err(DayError::NotInteger));
        assert_eq!(Day::from_number(3.5), Err(DayError::NotInteger));
        assert_eq!(Day::from_number(-0.5), Err(DayError::NotInteger));
        assert_eq!(Day::from_number(f64::NAN), Err(DayError::NotInteger));
        assert_eq!(Day::from_number(0.0), Err(DayError::OutOfRange));
        assert_eq!(Day::from_number(366.0), Err(DayError::OutOfRange));
        assert_eq!(Day::from_number(12.0).map(Day::number), Ok(12));
    }

    #[test]
    fn window_bounds() {
        let day = Day::new(2).unwrap();
        assert_eq!(day.start(), 1440);
        assert_eq!(day.end(), 2879);
        assert!(day.contains(1440));
        assert!(day.contains(2879));
        assert!(!day.contains(1439));
        assert!(!day.contains(2880));
    }

    #[test]
    fn last_day_ends_before_year_length() {
        assert_eq!(Day::LAST.end(), YEAR_LENGTH - 1);
    }

    #[test]
    fn through_is_inclusive() {
        let days: Vec<u32> = Day::FIRST
            .through(Day::new(3).unwrap())
            .map(Day::number)
            .collect();
        assert_eq!(days, vec![1, 2, 3]);
    }
}
