//! Tests for time-of-day helpers.

use chrono::NaiveTime;
use slot_engine::clock::{
    minutes_of_day, overlaps, parse_hhmm, time_from_minutes, MINUTES_PER_DAY,
};

#[test]
fn minutes_roundtrip_through_time() {
    let t = NaiveTime::from_hms_opt(17, 30, 0).unwrap();
    assert_eq!(minutes_of_day(t), 1050);
    assert_eq!(time_from_minutes(1050), Some(t));
}

#[test]
fn midnight_and_beyond_have_no_time() {
    assert_eq!(time_from_minutes(MINUTES_PER_DAY), None);
    assert_eq!(time_from_minutes(-1), None);
    assert_eq!(time_from_minutes(0), NaiveTime::from_hms_opt(0, 0, 0));
}

#[test]
fn parse_accepts_optional_seconds() {
    assert_eq!(parse_hhmm("09:00"), NaiveTime::from_hms_opt(9, 0, 0));
    assert_eq!(parse_hhmm("09:00:00"), NaiveTime::from_hms_opt(9, 0, 0));
    assert_eq!(parse_hhmm("9am"), None);
    assert_eq!(parse_hhmm("25:00"), None);
}

#[test]
fn adjacent_intervals_do_not_overlap() {
    // 09:00-10:00 vs 10:00-11:00
    assert!(!overlaps(540, 600, 600, 660));
    assert!(!overlaps(600, 660, 540, 600));
    // One minute of overlap is enough.
    assert!(overlaps(540, 601, 600, 660));
}

#[test]
fn containment_is_overlap() {
    assert!(overlaps(540, 720, 600, 630));
    assert!(overlaps(600, 630, 540, 720));
}
