//! Per-day slot availability.
//!
//! Intersects the candidate slots of a date with the bookings and blocked
//! intervals of that date, then summarises the day into a [`DayStatus`].
//! Conflicts use the half-open rule `t < b_end && b_start < t + duration`,
//! so a slot that starts exactly when a booking ends is free.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::clock::{self, hhmm};
use crate::config::DEFAULT_LIMITED_THRESHOLD;
use crate::schedule::ScheduleConfig;
use crate::slots;

/// Why a slot cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotReason {
    /// Overlaps an existing booking.
    Booked,
    /// Starts inside opening hours but the service would end after closing.
    TooCloseToClosing,
    /// The date is closed, or the start is outside opening hours.
    OutsideHours,
    /// Overlaps a blocked interval (break, maintenance).
    Blocked,
}

impl SlotReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotReason::Booked => "booked",
            SlotReason::TooCloseToClosing => "too-close-to-closing",
            SlotReason::OutsideHours => "outside-hours",
            SlotReason::Blocked => "blocked",
        }
    }
}

/// A candidate appointment start and whether it can be booked.
///
/// `reason` is present only when `available` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<SlotReason>,
}

impl TimeSlot {
    pub fn available(time: NaiveTime) -> Self {
        Self {
            time,
            available: true,
            reason: None,
        }
    }

    pub fn unavailable(time: NaiveTime, reason: SlotReason) -> Self {
        Self {
            time,
            available: false,
            reason: Some(reason),
        }
    }
}

/// Aggregate bookability of one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Available,
    Limited,
    Full,
    Closed,
}

impl DayStatus {
    /// Derive the status from slot counts.
    ///
    /// - `closed` when there are no slots at all
    /// - `full` when there are slots but none is available
    /// - `limited` when `available / total < limited_threshold`
    /// - `available` otherwise
    pub fn classify(available_slots: usize, total_slots: usize, limited_threshold: f64) -> Self {
        if total_slots == 0 {
            DayStatus::Closed
        } else if available_slots == 0 {
            DayStatus::Full
        } else if (available_slots as f64 / total_slots as f64) < limited_threshold {
            DayStatus::Limited
        } else {
            DayStatus::Available
        }
    }
}

/// Slot grid and summary for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub available_slots: usize,
    pub total_slots: usize,
    pub time_slots: Vec<TimeSlot>,
}

impl DayAvailability {
    pub fn closed(date: NaiveDate) -> Self {
        Self {
            date,
            status: DayStatus::Closed,
            available_slots: 0,
            total_slots: 0,
            time_slots: Vec::new(),
        }
    }

    /// Start times that can be booked, in ascending order.
    pub fn available_times(&self) -> impl Iterator<Item = NaiveTime> + '_ {
        self.time_slots
            .iter()
            .filter(|slot| slot.available)
            .map(|slot| slot.time)
    }
}

/// Resolve the availability of `date` using the default limited threshold.
///
/// `bookings` must already be restricted to the vendor or professional being
/// queried. They may span several dates; only rows on `date` count.
pub fn resolve_day(
    schedule: &ScheduleConfig,
    bookings: &[Booking],
    date: NaiveDate,
    service_duration_minutes: u32,
) -> DayAvailability {
    resolve_day_with_threshold(
        schedule,
        bookings,
        date,
        service_duration_minutes,
        DEFAULT_LIMITED_THRESHOLD,
    )
}

/// Resolve the availability of `date` with an explicit `limited` threshold.
///
/// Identical to [`resolve_day`] otherwise.
pub fn resolve_day_with_threshold(
    schedule: &ScheduleConfig,
    bookings: &[Booking],
    date: NaiveDate,
    service_duration_minutes: u32,
    limited_threshold: f64,
) -> DayAvailability {
    let on_date: Vec<&Booking> = bookings.iter().filter(|b| b.date == date).collect();
    resolve_partitioned(
        schedule,
        &on_date,
        date,
        service_duration_minutes,
        limited_threshold,
    )
}

/// Resolve a date whose bookings have already been selected.
pub(crate) fn resolve_partitioned(
    schedule: &ScheduleConfig,
    day_bookings: &[&Booking],
    date: NaiveDate,
    service_duration_minutes: u32,
    limited_threshold: f64,
) -> DayAvailability {
    let Some(window) = schedule.day_window(date) else {
        return DayAvailability::closed(date);
    };

    let duration = slots::effective_duration(schedule, service_duration_minutes);
    let starts = slots::candidate_minutes(
        &window,
        i64::from(schedule.effective_granularity()),
        duration,
    );
    if starts.is_empty() {
        return DayAvailability::closed(date);
    }

    let busy = busy_intervals(day_bookings);
    let time_slots: Vec<TimeSlot> = starts
        .into_iter()
        .filter_map(|start| {
            let time = clock::time_from_minutes(start)?;
            Some(evaluate(time, start, duration, &busy, &window.blocked))
        })
        .collect();

    let total_slots = time_slots.len();
    let available_slots = time_slots.iter().filter(|slot| slot.available).count();

    DayAvailability {
        date,
        status: DayStatus::classify(available_slots, total_slots, limited_threshold),
        available_slots,
        total_slots,
        time_slots,
    }
}

/// Re-validate a single requested start time against the current ledger.
///
/// This is the write-time guard a booking flow runs right before confirming:
/// unlike [`resolve_day`] it accepts any start time, aligned to the slot
/// granularity or not, and reports structural rejections too.
///
/// - `outside-hours` when the date is closed or `time` is outside `[open, close)`
/// - `too-close-to-closing` when the service would end after closing
/// - `booked` / `blocked` on overlap, bookings taking precedence
pub fn check_slot(
    schedule: &ScheduleConfig,
    bookings: &[Booking],
    date: NaiveDate,
    time: NaiveTime,
    service_duration_minutes: u32,
) -> TimeSlot {
    let Some(window) = schedule.day_window(date) else {
        return TimeSlot::unavailable(time, SlotReason::OutsideHours);
    };

    let start = clock::minutes_of_day(time);
    if start < window.open || start >= window.close {
        return TimeSlot::unavailable(time, SlotReason::OutsideHours);
    }

    let duration = slots::effective_duration(schedule, service_duration_minutes);
    if start + duration > window.close {
        return TimeSlot::unavailable(time, SlotReason::TooCloseToClosing);
    }

    let on_date: Vec<&Booking> = bookings.iter().filter(|b| b.date == date).collect();
    let busy = busy_intervals(&on_date);
    evaluate(time, start, duration, &busy, &window.blocked)
}

fn evaluate(
    time: NaiveTime,
    start: i64,
    duration: i64,
    busy: &[(i64, i64)],
    blocked: &[(i64, i64)],
) -> TimeSlot {
    let end = start + duration;
    let conflicts = |intervals: &[(i64, i64)]| {
        intervals
            .iter()
            .any(|&(b_start, b_end)| clock::overlaps(start, end, b_start, b_end))
    };

    if conflicts(busy) {
        TimeSlot::unavailable(time, SlotReason::Booked)
    } else if conflicts(blocked) {
        TimeSlot::unavailable(time, SlotReason::Blocked)
    } else {
        TimeSlot::available(time)
    }
}

/// Occupied intervals of the given bookings. Cancelled rows are ignored;
/// malformed rows are skipped with a warning so one bad record cannot blank
/// out the day.
fn busy_intervals(bookings: &[&Booking]) -> Vec<(i64, i64)> {
    bookings
        .iter()
        .filter(|b| b.occupies_time())
        .filter(|b| {
            if b.is_well_formed() {
                true
            } else {
                tracing::warn!(
                    vendor_id = %b.vendor_id,
                    professional_id = ?b.professional_id,
                    date = %b.date,
                    start_time = %b.start_time,
                    duration_minutes = b.duration_minutes,
                    "skipping malformed booking"
                );
                false
            }
        })
        .map(|b| b.interval())
        .collect()
}
