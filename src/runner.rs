//! Executes one configured analysis end to end.

use std::fmt;
use std::path::Path;

use log::info;
use serde::Serialize;
use thiserror::Error;

use crate::calc::{UsageReport, savings, usage, usage_for_day};
use crate::config::{AnalysisConfig, ConfigError};
use crate::error::{DayError, EnergyError};
use crate::profile::{Day, Power, SwitchState};

/// Failure of a configured run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("{}", join_config_errors(.0))]
    Config(Vec<ConfigError>),

    #[error(transparent)]
    Energy(#[from] EnergyError),
}

impl From<ConfigError> for RunError {
    fn from(err: ConfigError) -> Self {
        Self::Config(vec![err])
    }
}

impl From<DayError> for RunError {
    fn from(err: DayError) -> Self {
        Self::Energy(err.into())
    }
}

fn join_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result of one analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Outcome {
    /// Minutes on during a single period.
    Usage { minutes: u32 },
    /// Minutes saved by automatic shutoffs during a single period.
    Savings { minutes: u32 },
    /// Minutes on during one day of a month timeline.
    Day { day: Day, minutes: u32 },
    /// Per-day report over a range of days.
    Month(UsageReport),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage { minutes } => write!(f, "Usage: {minutes} min"),
            Self::Savings { minutes } => write!(f, "Savings: {minutes} min"),
            Self::Day { day, minutes } => write!(f, "Day {day} usage: {minutes} min"),
            Self::Month(report) => write!(f, "{report}"),
        }
    }
}

/// Validates `config`, resolves its profile, and runs the selected calculation.
///
/// `base_dir` anchors relative paths in the profile source (normally the
/// directory holding the scenario file).
///
/// # Errors
///
/// Returns [`RunError::Config`] with every validation error at once, or
/// [`RunError::Energy`] when the profile or day fails validation.
pub fn run(config: &AnalysisConfig, base_dir: &Path) -> Result<Outcome, RunError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(RunError::Config(errors));
    }

    let raw = config.resolve_profile(base_dir)?;
    let a = &config.analysis;
    info!("running {} analysis", a.mode);

    let outcome = match a.mode.as_str() {
        "savings" => {
            let profile = raw.into_profile::<SwitchState>()?;
            Outcome::Savings {
                minutes: savings(&profile)?,
            }
        }
        "day" => {
            let profile = raw.into_profile::<Power>()?;
            let day = Day::new(a.day.unwrap_or_default())?;
            Outcome::Day {
                day,
                minutes: usage_for_day(&profile, day)?,
            }
        }
        "month" => {
            let profile = raw.into_profile::<Power>()?;
            let first = Day::new(a.first_day)?;
            let last = Day::new(a.last_day)?;
            Outcome::Month(UsageReport::for_days(&profile, first, last)?)
        }
        _ => {
            let profile = raw.into_profile::<Power>()?;
            Outcome::Usage {
                minutes: usage(&profile)?,
            }
        }
    };

    Ok(outcome)
}
