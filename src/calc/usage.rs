//! On-time accumulation over a single period.

use log::debug;

use crate::error::EnergyError;
use crate::profile::{Alphabet, Event, PERIOD_LENGTH, Power, Profile};

/// Total minutes the appliance was on during one period.
///
/// Scans events in order, adding the span since the previous event whenever
/// the appliance was on, then closes the final interval at `PERIOD_LENGTH`.
/// Repeated states and same-minute events add zero by construction.
///
/// # Errors
///
/// Returns [`EnergyError::InvalidTimestamp`] for any timestamp outside
/// `[0, PERIOD_LENGTH)` and [`EnergyError::UnorderedEvents`] for decreasing
/// timestamps.
///
/// # Examples
///
/// ```
/// use appliance_energy::calc::usage;
/// use appliance_energy::profile::{Event, PERIOD_LENGTH, Power, Profile};
///
/// let profile = Profile::new(
///     Power::On,
///     vec![Event::new(Power::Off, 126), Event::new(Power::On, 833)],
/// );
/// assert_eq!(usage(&profile), Ok(126 + (PERIOD_LENGTH - 833)));
/// ```
pub fn usage(profile: &Profile<Power>) -> Result<u32, EnergyError> {
    profile.check_timeline(PERIOD_LENGTH)?;
    let total = on_minutes(profile.initial, &profile.events);
    debug!("usage: {} events, {total} minutes on", profile.events.len());
    Ok(total)
}

/// Unchecked scan shared by the single-period and per-day calculations.
pub(crate) fn on_minutes<S: Alphabet>(initial: S, events: &[Event<S>]) -> u32 {
    let mut total = 0;
    let mut currently_on = initial.is_on();
    let mut last_timestamp = 0;

    for event in events {
        if currently_on {
            total += event.timestamp - last_timestamp;
        }
        currently_on = event.state.is_on();
        last_timestamp = event.timestamp;
    }

    if currently_on {
        total += PERIOD_LENGTH - last_timestamp;
    }
    total
}
