//! Appliance state histories: alphabets, events, profiles, and the time axis.

/// Period length, calendar bounds, and day addressing.
pub mod period;
pub mod state;
/// Seeded synthetic profile generation.
pub mod synth;
pub mod types;

pub use period::{DAYS_PER_YEAR, Day, PERIOD_LENGTH, YEAR_LENGTH};
pub use state::{Alphabet, Power, SwitchState};
pub use types::{Event, Profile, RawEvent, RawProfile, RawValue};
