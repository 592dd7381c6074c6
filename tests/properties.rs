//! Randomized invariants over seeded synthetic profiles.

mod common;

use appliance_energy::calc::{UsageReport, day_profile, savings_for_day};
use appliance_energy::profile::synth::SyntheticProfile;
use appliance_energy::profile::{Event, PERIOD_LENGTH, Power, Profile, SwitchState};
use appliance_energy::{savings, usage, usage_for_day};
use common::{day, profile};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Random single-day on/off sequence with possible duplicates and same-minute events.
fn random_day(rng: &mut StdRng) -> Profile<Power> {
    let count = rng.random_range(0..40);
    let mut stamps: Vec<u32> = (0..count)
        .map(|_| rng.random_range(0..PERIOD_LENGTH))
        .collect();
    stamps.sort_unstable();
    let events = stamps
        .into_iter()
        .map(|t| {
            let state = if rng.random_bool(0.5) {
                Power::On
            } else {
                Power::Off
            };
            Event::new(state, t)
        })
        .collect();
    let initial = if rng.random_bool(0.5) {
        Power::On
    } else {
        Power::Off
    };
    Profile::new(initial, events)
}

#[test]
fn usage_is_bounded_by_period() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let p = random_day(&mut rng);
        let total = usage(&p).expect("generated profile is valid");
        assert!(total <= PERIOD_LENGTH, "usage {total} exceeds period");
    }
}

#[test]
fn inserting_same_minute_duplicate_keeps_total() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let p = random_day(&mut rng);
        if p.events.is_empty() {
            continue;
        }
        // Insert a flipped event immediately before an existing one at the same
        // minute; the existing event overwrites it with zero elapsed time.
        let idx = rng.random_range(0..p.events.len());
        let target = p.events[idx];
        let flipped = if target.state == Power::On {
            Power::Off
        } else {
            Power::On
        };
        let mut with_dupe = p.clone();
        with_dupe
            .events
            .insert(idx, Event::new(flipped, target.timestamp));
        assert_eq!(usage(&p), usage(&with_dupe));
    }
}

#[test]
fn savings_fit_inside_off_time() {
    for seed in 0..50 {
        let p = SyntheticProfile::new(1, 4, 0.5, seed).generate();
        let saved = savings(&p).expect("generated profile is valid");
        let on = usage(&p.to_power()).expect("generated profile is valid");
        assert!(saved + on <= PERIOD_LENGTH, "seed {seed}");
    }
}

#[test]
fn manual_only_profiles_save_nothing() {
    for seed in 0..50 {
        let p = SyntheticProfile::new(1, 5, 0.0, seed).generate();
        assert_eq!(savings(&p), Ok(0), "seed {seed}");
    }
}

#[test]
fn report_matches_day_queries_on_synthetic_month() {
    let month = SyntheticProfile::new(30, 3, 0.0, 99).generate().to_power();
    let report = UsageReport::for_days(&month, day(1), day(30)).unwrap();
    for d in &report.days {
        assert_eq!(Ok(d.on_minutes), usage_for_day(&month, d.day));
    }
}

#[test]
fn day_slices_keep_every_event_once() {
    let month = SyntheticProfile::new(10, 6, 0.3, 5).generate();
    let sliced: usize = (1..=10)
        .map(|n| day_profile(&month, day(n)).events.len())
        .sum();
    assert_eq!(sliced, month.events.len());
}

#[test]
fn per_day_savings_are_bounded() {
    let month = SyntheticProfile::new(7, 4, 0.7, 3).generate();
    for n in 1..=7 {
        let saved = savings_for_day(&month, day(n)).unwrap();
        assert!(saved <= PERIOD_LENGTH);
    }
}

#[test]
fn calls_from_many_threads_agree() {
    let month = SyntheticProfile::new(30, 3, 0.0, 12).generate().to_power();
    let expected: Vec<u32> = (1..=30)
        .map(|n| usage_for_day(&month, day(n)).unwrap())
        .collect();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    (1..=30)
                        .map(|n| usage_for_day(&month, day(n)).unwrap())
                        .collect::<Vec<u32>>()
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn synthetic_auto_off_starts_from_off() {
    let p = SyntheticProfile::new(1, 2, 1.0, 8).generate();
    assert_eq!(p.initial, SwitchState::Off);
    assert!(savings(&p).unwrap() > 0);
}

/// Random multi-day three-state timeline, including redundant offs and
/// auto-offs sent to an appliance that is already off.
fn random_switch_month(rng: &mut StdRng, days: u32) -> Profile<SwitchState> {
    const STATES: [SwitchState; 3] = [SwitchState::On, SwitchState::Off, SwitchState::AutoOff];
    let count = rng.random_range(0..12 * days);
    let mut stamps: Vec<u32> = (0..count)
        .map(|_| rng.random_range(0..days * PERIOD_LENGTH))
        .collect();
    stamps.sort_unstable();
    let events: Vec<(SwitchState, u32)> = stamps
        .into_iter()
        .map(|t| (STATES[rng.random_range(0..STATES.len())], t))
        .collect();
    let initial = STATES[rng.random_range(0..STATES.len())];
    profile(initial, &events)
}

/// Savings over the whole timeline, with open intervals running to its end.
fn timeline_savings(month: &Profile<SwitchState>, end: u32) -> u32 {
    let mut total = 0;
    let mut currently_on = month.initial == SwitchState::On;
    let mut since = (month.initial == SwitchState::AutoOff).then_some(0);
    for e in &month.events {
        match (since, e.state) {
            (Some(start), SwitchState::On) => {
                total += e.timestamp - start;
                since = None;
            }
            (None, SwitchState::AutoOff) if currently_on => since = Some(e.timestamp),
            _ => {}
        }
        currently_on = e.state == SwitchState::On;
    }
    if let Some(start) = since {
        total += end - start;
    }
    total
}

#[test]
fn per_day_savings_partition_the_timeline() {
    let mut rng = StdRng::seed_from_u64(2024);
    let days = 6;
    for _ in 0..300 {
        let month = random_switch_month(&mut rng, days);
        let power = month.to_power();
        let mut summed = 0;
        for n in 1..=i64::from(days) {
            let saved = savings_for_day(&month, day(n)).expect("generated month is valid");
            let on = usage_for_day(&power, day(n)).expect("generated month is valid");
            assert!(saved + on <= PERIOD_LENGTH, "day {n} of {month:?}");
            summed += saved;
        }
        assert_eq!(
            summed,
            timeline_savings(&month, days * PERIOD_LENGTH),
            "{month:?}"
        );
    }
}
