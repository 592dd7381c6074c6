//! State alphabets used by the calculations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A closed set of appliance states with stable textual names.
///
/// Usage calculations run over [`Power`]; savings calculations run over
/// [`SwitchState`], which adds the automatic shutoff.
pub trait Alphabet: Copy + Eq + fmt::Debug {
    /// Every valid name, in declaration order.
    const NAMES: &'static [&'static str];

    /// Parses a state name, returning `None` when it is not in the alphabet.
    fn parse(name: &str) -> Option<Self>;

    /// Textual name of this state.
    fn name(self) -> &'static str;

    /// Returns `true` when the appliance draws power in this state.
    fn is_on(self) -> bool;
}

/// Two-state alphabet for plain on/off usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Power {
    On,
    Off,
}

impl Alphabet for Power {
    const NAMES: &'static [&'static str] = &["on", "off"];

    fn parse(name: &str) -> Option<Self> {
        match name {
            "on" => Some(Self::On),
            "off" => Some(Self::Off),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }

    fn is_on(self) -> bool {
        self == Self::On
    }
}

/// Three-state alphabet distinguishing manual and automatic shutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwitchState {
    On,
    /// Switched off by hand.
    Off,
    /// Switched off by the energy-saving device.
    AutoOff,
}

impl Alphabet for SwitchState {
    const NAMES: &'static [&'static str] = &["on", "off", "auto-off"];

    fn parse(name: &str) -> Option<Self> {
        match name {
            "on" => Some(Self::On),
            "off" => Some(Self::Off),
            "auto-off" => Some(Self::AutoOff),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::AutoOff => "auto-off",
        }
    }

    fn is_on(self) -> bool {
        self == Self::On
    }
}

impl From<SwitchState> for Power {
    /// An automatic shutoff still leaves the appliance off.
    fn from(state: SwitchState) -> Self {
        match state {
            SwitchState::On => Power::On,
            SwitchState::Off | SwitchState::AutoOff => Power::Off,
        }
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_parse() {
        for name in SwitchState::NAMES {
            let state = SwitchState::parse(name).map(SwitchState::name);
            assert_eq!(state, Some(*name));
        }
        for name in Power::NAMES {
            assert_eq!(Power::parse(name).map(Power::name), Some(*name));
        }
    }

    #[test]
    fn power_rejects_auto_off() {
        assert_eq!(Power::parse("auto-off"), None);
        assert_eq!(Power::parse("ON"), None);
    }

    #[test]
    fn auto_off_collapses_to_off() {
        assert_eq!(Power::from(SwitchState::AutoOff), Power::Off);
        assert_eq!(Power::from(SwitchState::On), Power::On);
    }

    #[test]
    fn only_on_draws_power() {
        assert!(SwitchState::On.is_on());
        assert!(!SwitchState::AutoOff.is_on());
        assert!(!Power::Off.is_on());
    }
}
