//! Multi-day usage reporting over a month-long timeline.

use std::fmt;

use serde::Serialize;

use super::day::day_profile;
use super::usage::on_minutes;
use crate::error::EnergyError;
use crate::profile::{Day, PERIOD_LENGTH, Power, Profile, YEAR_LENGTH};

/// Usage figures for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayUsage {
    pub day: Day,
    /// Minutes the appliance was on.
    pub on_minutes: u32,
    /// `PERIOD_LENGTH - on_minutes`.
    pub off_minutes: u32,
    /// Share of the day spent on, in percent.
    pub duty_cycle_pct: f32,
}

impl DayUsage {
    fn new(day: Day, on_minutes: u32) -> Self {
        Self {
            day,
            on_minutes,
            off_minutes: PERIOD_LENGTH - on_minutes,
            duty_cycle_pct: 100.0 * on_minutes as f32 / PERIOD_LENGTH as f32,
        }
    }
}

/// Aggregate usage over an inclusive range of days.
///
/// Every per-day figure is the same value [`usage_for_day`] reports for that
/// day, so the report and single-day queries cannot disagree.
///
/// [`usage_for_day`]: super::usage_for_day
#[derive(Debug, Clone, Serialize)]
pub struct UsageReport {
    /// One entry per day, ascending.
    pub days: Vec<DayUsage>,
    /// Sum of on-minutes across all days.
    pub total_on_minutes: u64,
    /// Mean on-minutes per day.
    pub mean_on_minutes: f32,
    /// First day reaching the maximum on-minutes.
    pub peak_day: Day,
    /// Days with no usage at all.
    pub idle_days: usize,
    /// Days on for the whole period.
    pub full_days: usize,
}

impl UsageReport {
    /// Computes the report for days `first..=last` of `month`.
    ///
    /// # Errors
    ///
    /// Returns [`EnergyError::InvalidDayRange`] when `first > last`, and the
    /// timeline errors of [`Profile::check_timeline`] for a malformed month.
    pub fn for_days(month: &Profile<Power>, first: Day, last: Day) -> Result<Self, EnergyError> {
        if first > last {
            return Err(EnergyError::InvalidDayRange {
                first: first.number(),
                last: last.number(),
            });
        }
        month.check_timeline(YEAR_LENGTH)?;

        let days: Vec<DayUsage> = first
            .through(last)
            .map(|day| {
                let sliced = day_profile(month, day);
                DayUsage::new(day, on_minutes(sliced.initial, &sliced.events))
            })
            .collect();

        let total: u64 = days.iter().map(|d| u64::from(d.on_minutes)).sum();
        let mut peak = &days[0];
        for d in &days[1..] {
            if d.on_minutes > peak.on_minutes {
                peak = d;
            }
        }

        Ok(Self {
            total_on_minutes: total,
            mean_on_minutes: total as f32 / days.len() as f32,
            peak_day: peak.day,
            idle_days: days.iter().filter(|d| d.on_minutes == 0).count(),
            full_days: days
                .iter()
                .filter(|d| d.on_minutes == PERIOD_LENGTH)
                .count(),
            days,
        })
    }
}

impl fmt::Display for UsageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Usage Report ---")?;
        for d in &self.days {
            writeln!(
                f,
                "day {:>3} | on={:>4} min  off={:>4} min  duty={:>5.1}%",
                d.day, d.on_minutes, d.off_minutes, d.duty_cycle_pct
            )?;
        }
        writeln!(f, "Total usage:     {} min", self.total_on_minutes)?;
        writeln!(f, "Mean per day:    {:.1} min", self.mean_on_minutes)?;
        writeln!(f, "Peak day:        {}", self.peak_day)?;
        writeln!(f, "Idle days:       {}", self.idle_days)?;
        write!(f, "Full days:       {}", self.full_days)
    }
}
