//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use appliance_energy::profile::{
    Alphabet, Day, Event, Power, Profile, RawEvent, RawProfile, RawValue,
};

/// Builds a typed profile from `(state, timestamp)` pairs.
pub fn profile<S: Alphabet>(initial: S, events: &[(S, u32)]) -> Profile<S> {
    Profile::new(
        initial,
        events.iter().map(|&(s, t)| Event::new(s, t)).collect(),
    )
}

/// Builds an untyped profile from state names and raw timestamps.
pub fn raw_profile(initial: Option<&str>, events: &[(&str, f64)]) -> RawProfile {
    RawProfile {
        initial: initial.map(RawValue::from),
        events: Some(
            events
                .iter()
                .map(|&(state, timestamp)| RawEvent {
                    state: Some(state.into()),
                    timestamp: Some(timestamp.into()),
                })
                .collect(),
        ),
    }
}

/// Validated day number; panics on invalid input.
pub fn day(n: i64) -> Day {
    Day::new(n).expect("test day should be valid")
}

/// Month timeline spanning five days of alternating usage.
pub fn reference_month() -> Profile<Power> {
    use Power::{Off, On};
    profile(
        On,
        &[
            (Off, 500),
            (On, 900),
            (Off, 1400),
            (On, 1700),
            (Off, 1900),
            (On, 2599),
            (Off, 2900),
            (On, 3000),
            (Off, 3500),
            (On, 4000),
            (Off, 4420),
            (On, 4500),
        ],
    )
}
