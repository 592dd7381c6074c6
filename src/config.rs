//! TOML-based analysis configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::io::import::read_events_csv;
use crate::profile::synth::{MAX_SESSIONS_PER_DAY, SyntheticProfile};
use crate::profile::{DAYS_PER_YEAR, Day, PERIOD_LENGTH, RawEvent, RawProfile, RawValue};

/// Analysis modes understood by the runner.
pub const MODES: &[&str] = &["usage", "savings", "day", "month"];

/// Top-level analysis configuration parsed from TOML.
///
/// Load from TOML with [`AnalysisConfig::from_toml_file`] or pick a built-in
/// profile with [`AnalysisConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// What to compute.
    #[serde(default)]
    pub analysis: AnalysisSection,
    /// Where the appliance history comes from.
    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Calculation selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisSection {
    /// One of [`MODES`].
    pub mode: String,
    /// Day number for `"day"` mode.
    pub day: Option<i64>,
    /// First day of the `"month"` report (inclusive).
    pub first_day: i64,
    /// Last day of the `"month"` report (inclusive).
    pub last_day: i64,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            mode: "usage".to_string(),
            day: None,
            first_day: 1,
            last_day: 30,
        }
    }
}

/// Appliance history source: inline events, a CSV file, or a generator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Initial state name.
    pub initial: Option<RawValue>,
    /// Inline events.
    pub events: Option<Vec<RawEvent>>,
    /// CSV file with a `state,timestamp` header, relative to the scenario file.
    pub csv: Option<PathBuf>,
    /// Seeded synthetic history.
    pub synthetic: Option<SyntheticConfig>,
}

/// Synthetic profile generator parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntheticConfig {
    /// Random seed.
    pub seed: u64,
    /// Days covered (1 for single-period modes).
    pub days: u32,
    /// On-sessions per day.
    pub sessions_per_day: u32,
    /// Chance a session ends in an automatic shutoff (`"savings"` mode only).
    pub auto_off_probability: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            days: 30,
            sessions_per_day: 3,
            auto_off_probability: 0.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"analysis.day"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

fn inline(initial: &str, events: &[(&str, u32)]) -> ProfileConfig {
    ProfileConfig {
        initial: Some(initial.into()),
        events: Some(
            events
                .iter()
                .map(|&(state, timestamp)| RawEvent {
                    state: Some(state.into()),
                    timestamp: Some(timestamp.into()),
                })
                .collect(),
        ),
        ..ProfileConfig::default()
    }
}

impl AnalysisConfig {
    /// Appliance on for the whole day.
    pub fn always_on() -> Self {
        Self {
            analysis: AnalysisSection::default(),
            profile: inline("on", &[]),
        }
    }

    /// Weekday office appliance over the first five days of the month.
    pub fn office_hours() -> Self {
        let mut events = Vec::new();
        for day in 0..5 {
            let offset = day * PERIOD_LENGTH;
            events.push(("on", offset + 8 * 60));
            events.push(("off", offset + 12 * 60));
            events.push(("on", offset + 13 * 60));
            events.push(("off", offset + 18 * 60));
        }
        Self {
            analysis: AnalysisSection {
                mode: "month".to_string(),
                first_day: 1,
                last_day: 7,
                ..AnalysisSection::default()
            },
            profile: inline("off", &events),
        }
    }

    /// Single day with automatic shutoffs and a redundant manual off.
    pub fn auto_off() -> Self {
        Self {
            analysis: AnalysisSection {
                mode: "savings".to_string(),
                ..AnalysisSection::default()
            },
            profile: inline(
                "off",
                &[
                    ("on", 100),
                    ("off", 150),
                    ("on", 200),
                    ("auto-off", 500),
                    ("off", 800),
                    ("on", 933),
                    ("off", 1010),
                    ("on", 1250),
                    ("auto-off", 1320),
                ],
            ),
        }
    }

    /// Thirty generated days reported as a month.
    pub fn synthetic_month() -> Self {
        Self {
            analysis: AnalysisSection {
                mode: "month".to_string(),
                ..AnalysisSection::default()
            },
            profile: ProfileConfig {
                synthetic: Some(SyntheticConfig::default()),
                ..ProfileConfig::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["always_on", "office_hours", "auto_off", "synthetic_month"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "always_on" => Ok(Self::always_on()),
            "office_hours" => Ok(Self::office_hours()),
            "auto_off" => Ok(Self::auto_off()),
            "synthetic_month" => Ok(Self::synthetic_month()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Returns `true` for modes computed over a single period.
    pub fn is_single_period(&self) -> bool {
        matches!(self.analysis.mode.as_str(), "usage" | "savings")
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. Profile contents
    /// (states, timestamps) are validated by the calculation itself.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let a = &self.analysis;

        if !MODES.contains(&a.mode.as_str()) {
            errors.push(ConfigError {
                field: "analysis.mode".into(),
                message: format!("must be one of {}, got \"{}\"", MODES.join(", "), a.mode),
            });
        }

        if a.mode == "day" {
            match a.day {
                None => errors.push(ConfigError {
                    field: "analysis.day".into(),
                    message: "required when mode is \"day\"".into(),
                }),
                Some(n) => {
                    if let Err(e) = Day::new(n) {
                        errors.push(ConfigError {
                            field: "analysis.day".into(),
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        if a.mode == "month" {
            for (field, value) in [
                ("analysis.first_day", a.first_day),
                ("analysis.last_day", a.last_day),
            ] {
                if let Err(e) = Day::new(value) {
                    errors.push(ConfigError {
                        field: field.into(),
                        message: e.to_string(),
                    });
                }
            }
            if a.first_day > a.last_day {
                errors.push(ConfigError {
                    field: "analysis.first_day".into(),
                    message: "must be <= analysis.last_day".into(),
                });
            }
        }

        let p = &self.profile;
        let sources = [p.events.is_some(), p.csv.is_some(), p.synthetic.is_some()]
            .iter()
            .filter(|&&s| s)
            .count();
        if sources > 1 {
            errors.push(ConfigError {
                field: "profile".into(),
                message: "choose one of `events`, `csv`, or `synthetic`".into(),
            });
        }

        if let Some(syn) = &p.synthetic {
            if p.initial.is_some() {
                errors.push(ConfigError {
                    field: "profile.initial".into(),
                    message: "not allowed with `synthetic` (generated profiles start off)".into(),
                });
            }
            if !(1..=DAYS_PER_YEAR).contains(&syn.days) {
                errors.push(ConfigError {
                    field: "profile.synthetic.days".into(),
                    message: format!("must be in [1, {DAYS_PER_YEAR}]"),
                });
            } else if self.is_single_period() && syn.days != 1 {
                errors.push(ConfigError {
                    field: "profile.synthetic.days".into(),
                    message: format!("must be 1 for mode \"{}\"", a.mode),
                });
            }
            if !(1..=MAX_SESSIONS_PER_DAY).contains(&syn.sessions_per_day) {
                errors.push(ConfigError {
                    field: "profile.synthetic.sessions_per_day".into(),
                    message: format!("must be in [1, {MAX_SESSIONS_PER_DAY}]"),
                });
            }
            if !(0.0..=1.0).contains(&syn.auto_off_probability) {
                errors.push(ConfigError {
                    field: "profile.synthetic.auto_off_probability".into(),
                    message: "must be in [0.0, 1.0]".into(),
                });
            } else if a.mode != "savings" && syn.auto_off_probability > 0.0 {
                errors.push(ConfigError {
                    field: "profile.synthetic.auto_off_probability".into(),
                    message: "must be 0.0 unless mode is \"savings\"".into(),
                });
            }
        }

        errors
    }

    /// Resolves the configured source into an untyped profile.
    ///
    /// Relative CSV paths are resolved against `base_dir`. A missing source
    /// yields a profile without `events`, which the calculation rejects.
    /// Call [`validate`](Self::validate) first; generator parameters are
    /// assumed in range.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the CSV file cannot be read or parsed.
    pub fn resolve_profile(&self, base_dir: &Path) -> Result<RawProfile, ConfigError> {
        let p = &self.profile;

        if let Some(syn) = &p.synthetic {
            let generated = SyntheticProfile::new(
                syn.days,
                syn.sessions_per_day,
                syn.auto_off_probability,
                syn.seed,
            )
            .generate();
            return Ok(RawProfile::from(&generated));
        }

        let events = match &p.csv {
            Some(csv_path) => {
                let path = base_dir.join(csv_path);
                let events = read_events_csv(&path).map_err(|e| ConfigError {
                    field: "profile.csv".to_string(),
                    message: format!("cannot load \"{}\": {e}", path.display()),
                })?;
                Some(events)
            }
            None => p.events.clone(),
        };

        Ok(RawProfile {
            initial: p.initial.clone(),
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Power, SwitchState};

    #[test]
    fn default_config_is_valid() {
        let errors = AnalysisConfig::default().validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = AnalysisConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in AnalysisConfig::PRESETS {
            let cfg = AnalysisConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[analysis]
mode = "day"
day = 3

[profile]
initial = "on"
events = [
  { state = "off", timestamp = 500 },
  { state = "on", timestamp = 3000 },
]
"#;
        let cfg = AnalysisConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| &*c.analysis.mode), Some("day"));
        assert_eq!(cfg.as_ref().and_then(|c| c.analysis.day), Some(3));
        assert_eq!(
            cfg.as_ref()
                .and_then(|c| c.profile.events.as_ref())
                .map(Vec::len),
            Some(2)
        );
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[analysis]
mode = "usage"
bogus_field = true
"#;
        assert!(AnalysisConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_bad_mode() {
        let mut cfg = AnalysisConfig::always_on();
        cfg.analysis.mode = "weekly".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "analysis.mode"));
    }

    #[test]
    fn validation_requires_day_for_day_mode() {
        let mut cfg = AnalysisConfig::always_on();
        cfg.analysis.mode = "day".to_string();
        assert!(cfg.validate().iter().any(|e| e.field == "analysis.day"));

        cfg.analysis.day = Some(366);
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "analysis.day" && e.message == "day out of range")
        );

        cfg.analysis.day = Some(12);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn validation_catches_reversed_month_range() {
        let mut cfg = AnalysisConfig::office_hours();
        cfg.analysis.first_day = 10;
        cfg.analysis.last_day = 3;
        assert!(cfg.validate().iter().any(|e| e.field == "analysis.first_day"));
    }

    #[test]
    fn validation_rejects_multiple_sources() {
        let mut cfg = AnalysisConfig::always_on();
        cfg.profile.csv = Some(PathBuf::from("events.csv"));
        assert!(cfg.validate().iter().any(|e| e.field == "profile"));
    }

    #[test]
    fn validation_limits_synthetic_for_single_period() {
        let mut cfg = AnalysisConfig::synthetic_month();
        cfg.analysis.mode = "usage".to_string();
        assert!(
            cfg.validate()
                .iter()
                .any(|e| e.field == "profile.synthetic.days")
        );
    }

    #[test]
    fn validation_rejects_auto_off_outside_savings() {
        let mut cfg = AnalysisConfig::synthetic_month();
        if let Some(syn) = cfg.profile.synthetic.as_mut() {
            syn.auto_off_probability = 0.5;
        }
        assert!(
            cfg.validate()
                .iter()
                .any(|e| e.field == "profile.synthetic.auto_off_probability")
        );
    }

    #[test]
    fn inline_profile_resolves() {
        let raw = AnalysisConfig::auto_off()
            .resolve_profile(Path::new("."))
            .unwrap();
        let profile = raw.into_profile::<SwitchState>().unwrap();
        assert_eq!(profile.events.len(), 9);
    }

    #[test]
    fn missing_source_resolves_without_events() {
        let cfg = AnalysisConfig::from_toml_str("[profile]\ninitial = \"on\"\n").unwrap();
        let raw = cfg.resolve_profile(Path::new(".")).unwrap();
        assert!(raw.events.is_none());
    }

    #[test]
    fn synthetic_profile_resolves_to_power_states() {
        let raw = AnalysisConfig::synthetic_month()
            .resolve_profile(Path::new("."))
            .unwrap();
        let profile = raw.into_profile::<Power>();
        assert!(profile.is_ok());
    }

    #[test]
    fn missing_csv_is_reported() {
        let mut cfg = AnalysisConfig::default();
        cfg.profile.csv = Some(PathBuf::from("does/not/exist.csv"));
        let err = cfg.resolve_profile(Path::new(".")).unwrap_err();
        assert_eq!(err.field, "profile.csv");
    }
}
