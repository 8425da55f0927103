//! Tests for multi-day aggregation, quick suggestions and next-available.

use chrono::{Days, Duration, NaiveDate, NaiveTime};
use slot_engine::range::resolve_range_with_threshold;
use slot_engine::{
    next_available, quick_suggestions, resolve_day, resolve_range, Booking, DayStatus,
    ScheduleConfig, ScheduleException,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn monday() -> NaiveDate {
    date(2026, 3, 16)
}

fn booking(day: NaiveDate, start: NaiveTime, minutes: i64) -> Booking {
    Booking::new("salon-1", day, start, minutes)
}

// ── Completeness ────────────────────────────────────────────────────────────

#[test]
fn thirty_day_range_has_one_entry_per_day() {
    let days = resolve_range(&ScheduleConfig::generic_default(), &[], monday(), 30, 30);

    assert_eq!(days.len(), 30);
    for (i, day) in days.iter().enumerate() {
        assert_eq!(day.date, monday() + Duration::days(i as i64));
    }
}

#[test]
fn closed_days_are_kept_in_the_range() {
    let days = resolve_range(&ScheduleConfig::generic_default(), &[], monday(), 7, 30);

    let statuses: Vec<DayStatus> = days.iter().map(|d| d.status).collect();
    assert_eq!(
        statuses,
        vec![
            DayStatus::Available, // Mon
            DayStatus::Available,
            DayStatus::Available,
            DayStatus::Available,
            DayStatus::Available,
            DayStatus::Available, // Sat
            DayStatus::Closed,    // Sun
        ]
    );
}

#[test]
fn non_positive_day_count_is_empty() {
    let schedule = ScheduleConfig::generic_default();
    assert!(resolve_range(&schedule, &[], monday(), 0, 30).is_empty());
    assert!(resolve_range(&schedule, &[], monday(), -5, 30).is_empty());
}

#[test]
fn window_stops_at_the_last_representable_date() {
    let start = NaiveDate::MAX.checked_sub_days(Days::new(4)).unwrap();

    let days = resolve_range(&ScheduleConfig::generic_default(), &[], start, 10, 30);

    assert_eq!(days.len(), 5);
    assert_eq!(days.last().map(|d| d.date), Some(NaiveDate::MAX));
}

// ── Independence of days ────────────────────────────────────────────────────

#[test]
fn range_matches_day_by_day_resolution() {
    let schedule = ScheduleConfig::generic_default()
        .with_exception(ScheduleException::closed(date(2026, 3, 18)))
        .with_exception(ScheduleException::blocked(date(2026, 3, 19), t(12, 0), t(13, 0)));
    let bookings = vec![
        booking(date(2026, 3, 16), t(9, 0), 120),
        booking(date(2026, 3, 17), t(14, 0), 60),
        booking(date(2026, 3, 20), t(9, 0), 9 * 60),
        // Outside the window.
        booking(date(2026, 4, 30), t(9, 0), 60),
    ];

    let range = resolve_range(&schedule, &bookings, monday(), 10, 30);

    for day in &range {
        assert_eq!(day, &resolve_day(&schedule, &bookings, day.date, 30));
    }
    assert_eq!(range[2].status, DayStatus::Closed);
    assert_eq!(range[4].status, DayStatus::Full);
}

#[test]
fn booking_only_affects_its_own_date() {
    let bookings = vec![booking(date(2026, 3, 17), t(9, 0), 9 * 60)];
    let range = resolve_range(&ScheduleConfig::generic_default(), &bookings, monday(), 3, 30);

    assert_eq!(range[0].status, DayStatus::Available);
    assert_eq!(range[1].status, DayStatus::Full);
    assert_eq!(range[2].status, DayStatus::Available);
}

#[test]
fn range_threshold_is_applied_to_every_day() {
    let bookings = vec![booking(monday(), t(9, 0), 4 * 60)];
    // 10 of 18 open on Monday → 55%.
    let strict = resolve_range_with_threshold(
        &ScheduleConfig::generic_default(),
        &bookings,
        monday(),
        2,
        30,
        0.6,
    );
    assert_eq!(strict[0].status, DayStatus::Limited);
    assert_eq!(strict[1].status, DayStatus::Available);
}

// ── Quick suggestions ───────────────────────────────────────────────────────

#[test]
fn suggestions_take_three_times_from_available_days() {
    let bookings = vec![booking(monday(), t(9, 0), 60)];
    let range = resolve_range(&ScheduleConfig::generic_default(), &bookings, monday(), 2, 30);

    let suggestions = quick_suggestions(&range, 3);

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].date, monday());
    assert_eq!(suggestions[0].times, vec![t(10, 0), t(10, 30), t(11, 0)]);
    assert_eq!(suggestions[1].times, vec![t(9, 0), t(9, 30), t(10, 0)]);
}

#[test]
fn suggestions_skip_limited_full_and_closed_days() {
    let bookings = vec![
        // Monday limited: 3 of 18 open.
        booking(monday(), t(9, 0), 7 * 60 + 30),
        // Tuesday full.
        booking(date(2026, 3, 17), t(9, 0), 9 * 60),
    ];
    let schedule = ScheduleConfig::generic_default()
        .with_exception(ScheduleException::closed(date(2026, 3, 18)));
    let range = resolve_range(&schedule, &bookings, monday(), 4, 30);
    assert_eq!(range[0].status, DayStatus::Limited);

    let suggestions = quick_suggestions(&range, 3);

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].date, date(2026, 3, 19));
}

#[test]
fn suggestions_return_fewer_times_when_fewer_are_open() {
    let schedule = ScheduleConfig::weekly([1], t(9, 0), t(10, 0), 30);
    let range = resolve_range(&schedule, &[], monday(), 1, 30);

    let suggestions = quick_suggestions(&range, 3);
    assert_eq!(suggestions[0].times, vec![t(9, 0), t(9, 30)]);
}

#[test]
fn suggestions_serialize_times_as_hhmm() {
    let schedule = ScheduleConfig::weekly([1], t(9, 0), t(10, 0), 30);
    let range = resolve_range(&schedule, &[], monday(), 1, 30);
    let json = serde_json::to_value(quick_suggestions(&range, 1)).unwrap();

    assert_eq!(
        json,
        serde_json::json!([{"date": "2026-03-16", "times": ["09:00"]}])
    );
}

// ── Next available ──────────────────────────────────────────────────────────

#[test]
fn next_available_skips_full_and_closed_days() {
    let bookings = vec![booking(date(2026, 3, 21), t(9, 0), 9 * 60)];
    // Saturday full, Sunday closed → Monday 09:00.
    let range = resolve_range(
        &ScheduleConfig::generic_default(),
        &bookings,
        date(2026, 3, 21),
        3,
        30,
    );

    assert_eq!(next_available(&range), Some((date(2026, 3, 23), t(9, 0))));
}

#[test]
fn next_available_includes_limited_days() {
    let bookings = vec![booking(monday(), t(9, 0), 7 * 60 + 30)];
    let range = resolve_range(&ScheduleConfig::generic_default(), &bookings, monday(), 1, 30);

    assert_eq!(next_available(&range), Some((monday(), t(16, 30))));
}

#[test]
fn next_available_is_none_when_nothing_is_open() {
    let sunday = date(2026, 3, 15);
    let range = resolve_range(&ScheduleConfig::generic_default(), &[], sunday, 1, 30);
    assert_eq!(next_available(&range), None);
}
