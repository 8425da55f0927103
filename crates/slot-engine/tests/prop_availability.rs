//! Property-based tests for slot generation and day resolution using proptest.
//!
//! These tests verify laws that must hold for *any* schedule and ledger, not
//! just the specific scenarios in `resolver_tests.rs`.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;
use slot_engine::clock::minutes_of_day;
use slot_engine::{
    generate_candidate_slots, resolve_day, resolve_range, Booking, DayStatus, ScheduleConfig,
    SlotReason,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn time(minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap()
}

/// Weekly schedule with random working days, hours and granularity.
fn arb_schedule() -> impl Strategy<Value = ScheduleConfig> {
    (
        prop::collection::btree_set(0u8..=6, 0..=7),
        6u32 * 60..=12 * 60,
        2u32 * 60..=10 * 60,
        prop_oneof![Just(10u32), Just(15), Just(20), Just(30), Just(60)],
    )
        .prop_map(|(days, open, length, granularity)| {
            ScheduleConfig::weekly(days, time(open), time(open + length), granularity)
        })
}

/// A date in 2025-2027. Day is capped at 28 to avoid invalid month/day combos.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2025i32..=2027, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_duration() -> impl Strategy<Value = u32> {
    prop_oneof![Just(15u32), Just(30), Just(45), Just(60), Just(90), Just(120)]
}

/// Bookings on `date` starting between 06:00 and 21:45.
fn arb_bookings(date: NaiveDate) -> impl Strategy<Value = Vec<Booking>> {
    prop::collection::vec((24u32..=87, 1i64..=180), 0..8).prop_map(move |rows| {
        rows.into_iter()
            .map(|(quarter, minutes)| Booking::new("salon-1", date, time(quarter * 15), minutes))
            .collect()
    })
}

fn arb_day_case() -> impl Strategy<Value = (ScheduleConfig, NaiveDate, u32, Vec<Booking>)> {
    (arb_schedule(), arb_date(), arb_duration())
        .prop_flat_map(|(schedule, date, duration)| {
            (Just(schedule), Just(date), Just(duration), arb_bookings(date))
        })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every generated slot finishes by closing time.
    #[test]
    fn prop_slots_fit_before_closing(
        schedule in arb_schedule(),
        date in arb_date(),
        duration in arb_duration(),
    ) {
        let slots = generate_candidate_slots(&schedule, date, duration);
        let weekday = date.weekday().num_days_from_sunday() as u8;

        if let Some(hours) = schedule.hours_by_day.get(&weekday) {
            let close = minutes_of_day(hours.close);
            for slot in &slots {
                prop_assert!(minutes_of_day(*slot) + i64::from(duration) <= close);
            }
        }
    }

    /// Slots are strictly ascending and spaced by the granularity.
    #[test]
    fn prop_slots_ascend_on_granularity(
        schedule in arb_schedule(),
        date in arb_date(),
        duration in arb_duration(),
    ) {
        let slots = generate_candidate_slots(&schedule, date, duration);
        for pair in slots.windows(2) {
            prop_assert_eq!(
                pair[1] - pair[0],
                Duration::minutes(i64::from(schedule.slot_granularity_minutes))
            );
        }
    }

    /// Days outside the working set are closed with no slots.
    #[test]
    fn prop_non_working_days_are_closed(
        schedule in arb_schedule(),
        date in arb_date(),
        duration in arb_duration(),
    ) {
        let weekday = date.weekday().num_days_from_sunday() as u8;
        prop_assume!(!schedule.working_days.contains(&weekday));

        let day = resolve_day(&schedule, &[], date, duration);
        prop_assert_eq!(day.status, DayStatus::Closed);
        prop_assert!(day.time_slots.is_empty());
    }

    /// A slot is booked iff its interval overlaps some booking (half-open).
    #[test]
    fn prop_overlap_law((schedule, date, duration, bookings) in arb_day_case()) {
        let day = resolve_day(&schedule, &bookings, date, duration);

        for slot in &day.time_slots {
            let start = minutes_of_day(slot.time);
            let end = start + i64::from(duration);
            let overlaps_any = bookings.iter().any(|b| {
                let (b_start, b_end) = b.interval();
                start < b_end && b_start < end
            });
            prop_assert_eq!(slot.reason == Some(SlotReason::Booked), overlaps_any);
            prop_assert_eq!(slot.available, !overlaps_any);
        }
    }

    /// Counts and status are derived from the slot list.
    #[test]
    fn prop_aggregation_law((schedule, date, duration, bookings) in arb_day_case()) {
        let day = resolve_day(&schedule, &bookings, date, duration);

        prop_assert_eq!(day.total_slots, day.time_slots.len());
        prop_assert_eq!(
            day.available_slots,
            day.time_slots.iter().filter(|s| s.available).count()
        );
        prop_assert_eq!(
            day.status,
            DayStatus::classify(day.available_slots, day.total_slots, 0.3)
        );
        for slot in &day.time_slots {
            prop_assert_eq!(slot.available, slot.reason.is_none());
        }
    }

    /// Same inputs, same output.
    #[test]
    fn prop_resolve_is_idempotent((schedule, date, duration, bookings) in arb_day_case()) {
        let first = resolve_day(&schedule, &bookings, date, duration);
        let second = resolve_day(&schedule, &bookings, date, duration);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    /// A range of N days has N consecutive entries.
    #[test]
    fn prop_range_is_complete(
        schedule in arb_schedule(),
        start in arb_date(),
        days in 1i64..=62,
        duration in arb_duration(),
    ) {
        let range = resolve_range(&schedule, &[], start, days, duration);

        prop_assert_eq!(range.len() as i64, days);
        for (i, day) in range.iter().enumerate() {
            prop_assert_eq!(day.date, start + Duration::days(i as i64));
        }
    }
}
