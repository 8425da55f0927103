//! Multi-day aggregation.
//!
//! Resolves each calendar day of a window independently and returns one
//! entry per day, closed days included, so the calendar can decorate every
//! date. The booking list is partitioned by date once up front instead of
//! being rescanned for every day.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::clock::hhmm_list;
use crate::config::DEFAULT_LIMITED_THRESHOLD;
use crate::resolver::{self, DayAvailability, DayStatus};
use crate::schedule::ScheduleConfig;

/// A day offered as a quick suggestion with its first few open times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub date: NaiveDate,
    #[serde(with = "hhmm_list")]
    pub times: Vec<NaiveTime>,
}

/// Resolve `number_of_days` consecutive days starting at `start_date`.
///
/// Returns `number_of_days` entries with `entries[i].date == start_date + i
/// days`, or an empty list when `number_of_days <= 0`. The window never runs
/// past `NaiveDate::MAX`, so a window reaching it is shorter. Callers bound
/// `number_of_days`; the facade clamps it to `EngineConfig::max_range_days`.
pub fn resolve_range(
    schedule: &ScheduleConfig,
    bookings: &[Booking],
    start_date: NaiveDate,
    number_of_days: i64,
    service_duration_minutes: u32,
) -> Vec<DayAvailability> {
    resolve_range_with_threshold(
        schedule,
        bookings,
        start_date,
        number_of_days,
        service_duration_minutes,
        DEFAULT_LIMITED_THRESHOLD,
    )
}

/// [`resolve_range`] with an explicit `limited` threshold.
pub fn resolve_range_with_threshold(
    schedule: &ScheduleConfig,
    bookings: &[Booking],
    start_date: NaiveDate,
    number_of_days: i64,
    service_duration_minutes: u32,
    limited_threshold: f64,
) -> Vec<DayAvailability> {
    if number_of_days <= 0 {
        return Vec::new();
    }

    let dates = window_dates(start_date, number_of_days);
    let last_date = match dates.last() {
        Some(last) => *last,
        None => return Vec::new(),
    };

    let by_date = partition_by_date(bookings, start_date, last_date);
    let no_bookings: Vec<&Booking> = Vec::new();

    dates
        .into_iter()
        .map(|date| {
            let day_bookings = by_date.get(&date).unwrap_or(&no_bookings);
            resolver::resolve_partitioned(
                schedule,
                day_bookings,
                date,
                service_duration_minutes,
                limited_threshold,
            )
        })
        .collect()
}

/// Consecutive dates from `start_date`, `NaiveDate::MAX` included.
pub(crate) fn window_dates(start_date: NaiveDate, number_of_days: i64) -> Vec<NaiveDate> {
    (0..number_of_days.max(0) as u64)
        .map_while(|offset| start_date.checked_add_days(Days::new(offset)))
        .collect()
}

/// Group bookings inside `[first, last]` by their date.
fn partition_by_date(
    bookings: &[Booking],
    first: NaiveDate,
    last: NaiveDate,
) -> BTreeMap<NaiveDate, Vec<&Booking>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&Booking>> = BTreeMap::new();
    for booking in bookings
        .iter()
        .filter(|b| b.date >= first && b.date <= last)
    {
        by_date.entry(booking.date).or_default().push(booking);
    }
    by_date
}

/// Quick suggestions over an already resolved range.
///
/// Keeps days whose status is `available` with at least one open slot, in
/// date order, and takes up to `per_day` open times from each. `limited`
/// days are deliberately not suggested.
pub fn quick_suggestions(days: &[DayAvailability], per_day: usize) -> Vec<Suggestion> {
    days.iter()
        .filter(|day| day.status == DayStatus::Available && day.available_slots > 0)
        .map(|day| Suggestion {
            date: day.date,
            times: day.available_times().take(per_day).collect(),
        })
        .collect()
}

/// The earliest open slot across a resolved range, `limited` days included.
pub fn next_available(days: &[DayAvailability]) -> Option<(NaiveDate, NaiveTime)> {
    days.iter()
        .find_map(|day| day.available_times().next().map(|time| (day.date, time)))
}
