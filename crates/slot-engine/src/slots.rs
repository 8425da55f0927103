//! Candidate slot generation.
//!
//! Emits every start time `open + k * granularity` whose service still ends
//! by closing time. Starts that would run past closing are never emitted,
//! so slot totals only count bookable-in-principle times.

use chrono::{NaiveDate, NaiveTime};

use crate::clock;
use crate::schedule::{DayWindow, ScheduleConfig};

/// Service duration used for slot math; zero falls back to the schedule's
/// granularity.
pub fn effective_duration(schedule: &ScheduleConfig, service_duration_minutes: u32) -> i64 {
    if service_duration_minutes == 0 {
        i64::from(schedule.effective_granularity())
    } else {
        i64::from(service_duration_minutes)
    }
}

/// Generate the ordered candidate start times for `date`.
///
/// Returns an empty list when the date is not a working day (and no
/// custom-hours exception opens it) or an exception closes it. Has no
/// knowledge of bookings.
pub fn generate_candidate_slots(
    schedule: &ScheduleConfig,
    date: NaiveDate,
    service_duration_minutes: u32,
) -> Vec<NaiveTime> {
    match schedule.day_window(date) {
        Some(window) => candidate_minutes(
            &window,
            i64::from(schedule.effective_granularity()),
            effective_duration(schedule, service_duration_minutes),
        )
        .into_iter()
        .filter_map(clock::time_from_minutes)
        .collect(),
        None => Vec::new(),
    }
}

/// Candidate starts in minutes since midnight for an already resolved window.
pub(crate) fn candidate_minutes(window: &DayWindow, granularity: i64, duration: i64) -> Vec<i64> {
    let mut starts = Vec::new();
    let mut time = window.open;
    while time + duration <= window.close {
        starts.push(time);
        time += granularity;
    }
    starts
}
