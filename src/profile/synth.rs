//! Seeded generator for synthetic multi-day appliance profiles.

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::period::{DAYS_PER_YEAR, PERIOD_LENGTH};
use super::state::SwitchState;
use super::types::{Event, Profile};

/// Upper bound on sessions per day; each session needs two distinct minutes.
pub const MAX_SESSIONS_PER_DAY: u32 = 32;

/// Generates appliance profiles with random on-sessions.
///
/// Each day receives `sessions_per_day` non-overlapping sessions. A session
/// starts with `On` and ends with `AutoOff` (with probability
/// `auto_off_probability`) or a manual `Off`. The appliance starts off.
///
/// # Examples
///
/// ```
/// use appliance_energy::profile::synth::SyntheticProfile;
///
/// let a = SyntheticProfile::new(2, 3, 0.5, 42).generate();
/// let b = SyntheticProfile::new(2, 3, 0.5, 42).generate();
/// assert_eq!(a, b);
/// assert_eq!(a.events.len(), 2 * 3 * 2);
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticProfile {
    /// Number of consecutive days to cover.
    pub days: u32,
    /// On-sessions per day.
    pub sessions_per_day: u32,
    /// Chance that a session is ended by the device rather than by hand.
    pub auto_off_probability: f64,
    rng: StdRng,
}

impl SyntheticProfile {
    /// Creates a generator.
    ///
    /// # Panics
    ///
    /// Panics if `days` is outside `[1, DAYS_PER_YEAR]`, `sessions_per_day` is
    /// outside `[1, MAX_SESSIONS_PER_DAY]`, or the probability is outside
    /// `[0, 1]`. The config layer validates these before construction.
    pub fn new(days: u32, sessions_per_day: u32, auto_off_probability: f64, seed: u64) -> Self {
        assert!((1..=DAYS_PER_YEAR).contains(&days), "days out of range");
        assert!(
            (1..=MAX_SESSIONS_PER_DAY).contains(&sessions_per_day),
            "sessions_per_day out of range"
        );
        assert!(
            (0.0..=1.0).contains(&auto_off_probability),
            "auto_off_probability must be in [0, 1]"
        );
        Self {
            days,
            sessions_per_day,
            auto_off_probability,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produces a timestamp-ordered three-state profile.
    pub fn generate(&mut self) -> Profile<SwitchState> {
        let per_day = self.sessions_per_day as usize * 2;
        let mut events = Vec::with_capacity(self.days as usize * per_day);

        for day in 0..self.days {
            let offset = day * PERIOD_LENGTH;
            let cuts = self.distinct_minutes(per_day);
            for pair in cuts.chunks_exact(2) {
                let end_state = if self.rng.random_bool(self.auto_off_probability) {
                    SwitchState::AutoOff
                } else {
                    SwitchState::Off
                };
                events.push(Event::new(SwitchState::On, offset + pair[0]));
                events.push(Event::new(end_state, offset + pair[1]));
            }
        }

        Profile::new(SwitchState::Off, events)
    }

    /// Draws `count` distinct minutes of a day in ascending order.
    fn distinct_minutes(&mut self, count: usize) -> Vec<u32> {
        let mut minutes = rand::seq::index::sample(&mut self.rng, PERIOD_LENGTH as usize, count)
            .into_iter()
            .map(|m| m as u32)
            .collect::<Vec<_>>();
        minutes.sort_unstable();
        minutes
    }
}
