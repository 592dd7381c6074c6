//! Savings attributable to automatic shutoffs over a single period.

use log::debug;

use crate::error::EnergyError;
use crate::profile::{Event, PERIOD_LENGTH, Profile, SwitchState};

/// Total minutes the appliance stayed off because the device switched it off.
///
/// A savings interval opens at an `AutoOff` that interrupts an `On` state and
/// stays open, through any later `Off` or `AutoOff` events, until the next
/// `On`. An `AutoOff` on an appliance that is already off opens nothing, so
/// time after a manual `Off` is never counted.
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
/// use appliance_energy::calc::savings;
/// use appliance_energy::profile::{Event, Profile, SwitchState};
///
/// let profile = Profile::new(
///     SwitchState::Off,
///     vec![
///         Event::new(SwitchState::On, 100),
///         Event::new(SwitchState::AutoOff, 500),
///         Event::new(SwitchState::Off, 800),
///         Event::new(SwitchState::On, 933),
///     ],
/// );
/// assert_eq!(savings(&profile), Ok(933 - 500));
/// ```
pub fn savings(profile: &Profile<SwitchState>) -> Result<u32, EnergyError> {
    profile.check_timeline(PERIOD_LENGTH)?;
    let total = auto_off_minutes(profile.initial, &profile.events);
    debug!("savings: {} events, {total} minutes saved", profile.events.len());
    Ok(total)
}

pub(crate) fn auto_off_minutes(initial: SwitchState, events: &[Event<SwitchState>]) -> u32 {
    let mut scan = SavingsScan::new(initial);
    let mut total: u32 = events.iter().map(|event| scan.step(event)).sum();
    if let Some(since) = scan.auto_off_since {
        total += PERIOD_LENGTH - since;
    }
    total
}

/// Running state of the savings scan over an event sequence.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SavingsScan {
    currently_on: bool,
    // Start of the open savings interval, if any.
    auto_off_since: Option<u32>,
}

impl SavingsScan {
    pub(crate) fn new(initial: SwitchState) -> Self {
        Self {
            currently_on: initial == SwitchState::On,
            auto_off_since: (initial == SwitchState::AutoOff).then_some(0),
        }
    }

    /// Applies one event and returns the minutes of the interval it closes.
    pub(crate) fn step(&mut self, event: &Event<SwitchState>) -> u32 {
        let mut closed = 0;
        match (self.auto_off_since, event.state) {
            (Some(since), SwitchState::On) => {
                closed = event.timestamp - since;
                self.auto_off_since = None;
            }
            (None, SwitchState::AutoOff) if self.currently_on => {
                self.auto_off_since = Some(event.timestamp);
            }
            _ => {}
        }
        self.currently_on = event.state == SwitchState::On;
        closed
    }

    /// Initial state that makes a fresh scan behave like this one.
    ///
    /// `AutoOff` only while a savings interval is open; an appliance that is
    /// off for any other reason restarts as `Off`.
    pub(crate) fn resume_state(&self) -> SwitchState {
        if self.auto_off_since.is_some() {
            SwitchState::AutoOff
        } else if self.currently_on {
            SwitchState::On
        } else {
            SwitchState::Off
        }
    }
}
