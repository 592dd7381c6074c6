//! Per-day slicing of month-long timelines.

use log::debug;

use super::savings::{SavingsScan, savings};
use super::usage::usage;
use crate::error::EnergyError;
use crate::profile::{Alphabet, Day, Event, Power, Profile, SwitchState, YEAR_LENGTH};

/// Rewrites a month profile into the single-period profile of `day`.
///
/// The initial state is the state of the last event strictly before the day
/// starts (or the month's initial state). [`savings_for_day`] replaces it
/// with the state of the savings scan at the day start. Events in `[day.start(), day.end()]`
/// are kept with timestamps shifted to the day's origin, so an event at the
/// exact start of the day lands on minute 0 and one at the exact end lands on
/// `PERIOD_LENGTH - 1`.
///
/// The month profile is assumed ordered; callers go through
/// [`Profile::check_timeline`] first.
pub fn day_profile<S: Alphabet>(month: &Profile<S>, day: Day) -> Profile<S> {
    let start = day.start();
    let initial = month
        .events
        .iter()
        .take_while(|e| e.timestamp < start)
        .last()
        .map_or(month.initial, |e| e.state);

    let events = month
        .events
        .iter()
        .filter(|e| day.contains(e.timestamp))
        .map(|e| Event::new(e.state, e.timestamp - start))
        .collect::<Vec<_>>();

    debug!(
        "day {day}: carried-in state {}, {} events in window",
        initial.name(),
        events.len()
    );
    Profile::new(initial, events)
}

/// Minutes the appliance was on during `day` of a month-long timeline.
///
/// # Errors
///
/// Returns [`EnergyError::InvalidTimestamp`] for any timestamp at or past
/// `YEAR_LENGTH` and [`EnergyError::UnorderedEvents`] for decreasing
/// timestamps. Day numbers are validated when the [`Day`] is built.
///
/// # Examples
///
/// ```
/// use appliance_energy::calc::usage_for_day;
/// use appliance_energy::profile::{Day, Event, Power, Profile};
///
/// let month = Profile::new(
///     Power::On,
///     vec![
///         Event::new(Power::Off, 500),
///         Event::new(Power::On, 900),
///         Event::new(Power::Off, 1400),
///         Event::new(Power::On, 1700),
///     ],
/// );
/// let day = Day::new(1).unwrap();
/// assert_eq!(usage_for_day(&month, day), Ok(500 + (1400 - 900)));
/// ```
pub fn usage_for_day(month: &Profile<Power>, day: Day) -> Result<u32, EnergyError> {
    month.check_timeline(YEAR_LENGTH)?;
    usage(&day_profile(month, day))
}

/// Minutes saved by automatic shutoffs during `day` of a month-long timeline.
///
/// The events before the day are scanned the same way [`savings`] scans a
/// period. A day starts in `AutoOff` only when a savings interval is still
/// open at midnight, so a manual `Off` that follows an `AutoOff` keeps the
/// saving running into the next day, and an `AutoOff` sent to an appliance
/// that was already off never starts one.
///
/// # Errors
///
/// Same conditions as [`usage_for_day`].
pub fn savings_for_day(month: &Profile<SwitchState>, day: Day) -> Result<u32, EnergyError> {
    month.check_timeline(YEAR_LENGTH)?;
    let start = day.start();
    let mut scan = SavingsScan::new(month.initial);
    for event in month.events.iter().take_while(|e| e.timestamp < start) {
        scan.step(event);
    }

    let mut sliced = day_profile(month, day);
    sliced.initial = scan.resume_state();
    savings(&sliced)
}
