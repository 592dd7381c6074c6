//! Event and profile records, typed and untyped.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::{Alphabet, Power, SwitchState};
use crate::error::EnergyError;

/// A single state change at a point on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event<S> {
    /// State entered at `timestamp`.
    pub state: S,
    /// Minutes since the start of the timeline.
    pub timestamp: u32,
}

impl<S> Event<S> {
    pub fn new(state: S, timestamp: u32) -> Self {
        Self { state, timestamp }
    }
}

/// Initial state plus the ordered state changes over a timeline.
///
/// For single-period calculations timestamps lie in `[0, PERIOD_LENGTH)`;
/// month profiles span up to `YEAR_LENGTH`.
///
/// # Examples
///
/// ```
/// use appliance_energy::profile::{Event, Power, Profile};
///
/// let profile = Profile::new(
///     Power::On,
///     vec![Event::new(Power::Off, 126), Event::new(Power::On, 833)],
/// );
/// assert_eq!(profile.events.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile<S> {
    /// State in effect at timestamp 0.
    pub initial: S,
    /// State changes, ascending by timestamp.
    pub events: Vec<Event<S>>,
}

impl<S: Alphabet> Profile<S> {
    pub fn new(initial: S, events: Vec<Event<S>>) -> Self {
        Self { initial, events }
    }

    /// Checks that every timestamp is below `limit` and that timestamps never
    /// decrease.
    ///
    /// # Errors
    ///
    /// Returns [`EnergyError::InvalidTimestamp`] for the first timestamp at or
    /// past `limit`, or [`EnergyError::UnorderedEvents`] for the first event
    /// that precedes its predecessor.
    pub fn check_timeline(&self, limit: u32) -> Result<(), EnergyError> {
        let mut previous = 0;
        for (index, event) in self.events.iter().enumerate() {
            if event.timestamp >= limit {
                return Err(EnergyError::InvalidTimestamp {
                    timestamp: event.timestamp.to_string(),
                    limit,
                });
            }
            if event.timestamp < previous {
                return Err(EnergyError::UnorderedEvents { index });
            }
            previous = event.timestamp;
        }
        Ok(())
    }
}

impl Profile<SwitchState> {
    /// Projects a three-state profile onto on/off, treating `AutoOff` as `Off`.
    pub fn to_power(&self) -> Profile<Power> {
        Profile {
            initial: self.initial.into(),
            events: self
                .events
                .iter()
                .map(|e| Event::new(e.state.into(), e.timestamp))
                .collect(),
        }
    }
}

/// A field value from untyped input, kept as-is until its type is checked.
///
/// Accepts any TOML, JSON, or CSV value, so a wrongly typed state or
/// timestamp reaches validation instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<RawValue>),
    Table(BTreeMap<String, RawValue>),
}

impl RawValue {
    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::List(_) => f.write_str("<array>"),
            Self::Table(_) => f.write_str("<table>"),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for RawValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

/// An event as received from untyped input (TOML, JSON, CSV).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawEvent {
    #[serde(default)]
    pub state: Option<RawValue>,
    #[serde(default)]
    pub timestamp: Option<RawValue>,
}

/// A profile as received from untyped input.
///
/// Convert with [`RawProfile::into_profile`], which applies all structural,
/// state, and timestamp validation for the chosen alphabet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawProfile {
    #[serde(default)]
    pub initial: Option<RawValue>,
    #[serde(default)]
    pub events: Option<Vec<RawEvent>>,
}

impl RawProfile {
    /// Parses a profile from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`EnergyError::InvalidProfile`] when the text is not a profile record.
    pub fn from_toml_str(s: &str) -> Result<Self, EnergyError> {
        toml::from_str(s).map_err(|e| EnergyError::InvalidProfile(e.to_string()))
    }

    /// Parses a profile from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`EnergyError::InvalidProfile`] when the text is not a profile record.
    #[cfg(feature = "api")]
    pub fn from_json_str(s: &str) -> Result<Self, EnergyError> {
        serde_json::from_str(s).map_err(|e| EnergyError::InvalidProfile(e.to_string()))
    }

    /// Validates this profile against alphabet `S`.
    ///
    /// Checks run in order: `events` present, `initial` in the alphabet, then
    /// each event's timestamp followed by its state. A timestamp here only
    /// has to be a non-negative integer. Timeline bounds and ordering depend
    /// on the calculation and are checked there by
    /// [`Profile::check_timeline`], after every event has passed this pass.
    /// So a bad state on a later event is reported ahead of an out-of-range
    /// timestamp on an earlier one.
    ///
    /// # Errors
    ///
    /// Returns the first [`EnergyError`] encountered.
    pub fn into_profile<S: Alphabet>(self) -> Result<Profile<S>, EnergyError> {
        let raw_events = self.events.ok_or_else(|| {
            EnergyError::InvalidProfile("`events` must be a sequence".to_string())
        })?;
        let initial = parse_state::<S>(self.initial.as_ref())?;

        let events = raw_events
            .into_iter()
            .map(|raw| {
                let timestamp = parse_timestamp(raw.timestamp.as_ref())?;
                let state = parse_state::<S>(raw.state.as_ref())?;
                Ok(Event::new(state, timestamp))
            })
            .collect::<Result<Vec<_>, EnergyError>>()?;

        Ok(Profile { initial, events })
    }
}

impl<S: Alphabet> From<&Profile<S>> for RawProfile {
    fn from(profile: &Profile<S>) -> Self {
        Self {
            initial: Some(profile.initial.name().into()),
            events: Some(
                profile
                    .events
                    .iter()
                    .map(|e| RawEvent {
                        state: Some(e.state.name().into()),
                        timestamp: Some(e.timestamp.into()),
                    })
                    .collect(),
            ),
        }
    }
}

fn parse_state<S: Alphabet>(value: Option<&RawValue>) -> Result<S, EnergyError> {
    value
        .and_then(RawValue::as_text)
        .and_then(S::parse)
        .ok_or_else(|| EnergyError::InvalidState {
            found: value.map_or_else(|| "<missing>".to_string(), RawValue::to_string),
            allowed: S::NAMES,
        })
}

fn parse_timestamp(value: Option<&RawValue>) -> Result<u32, EnergyError> {
    let invalid = |timestamp: String| EnergyError::InvalidTimestamp {
        timestamp,
        limit: u32::MAX,
    };
    let number = match value {
        Some(RawValue::Number(n)) => *n,
        Some(RawValue::Text(s)) => return Err(invalid(format!("{s:?}"))),
        Some(other) => return Err(invalid(other.to_string())),
        None => return Err(invalid("<missing>".to_string())),
    };
    let in_range = number >= 0.0 && number <= f64::from(u32::MAX);
    if !number.is_finite() || number.fract() != 0.0 || !in_range {
        return Err(invalid(number.to_string()));
    }
    Ok(number as u32)
}
