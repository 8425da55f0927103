//! Weekly business hours, date exceptions and the generic default schedule.
//!
//! A [`ScheduleConfig`] belongs to a vendor, or overrides the vendor's for a
//! single professional. Weekdays are indexed `0 = Sunday ..= 6 = Saturday`.
//! Exceptions for a date always take precedence over the weekly hours.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock::{self, hhmm};
use crate::error::{EngineError, Result};

/// Step between candidate slot starts when none (or zero) is configured.
pub const DEFAULT_GRANULARITY_MINUTES: u32 = 30;

/// Opening and closing time for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    #[serde(with = "hhmm")]
    pub open: NaiveTime,
    #[serde(with = "hhmm")]
    pub close: NaiveTime,
}

impl DayHours {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self { open, close }
    }
}

/// A sub-interval of an open day that cannot be booked (lunch break,
/// maintenance window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedInterval {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

/// What a date exception does to the weekly default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ExceptionKind {
    /// The whole date is closed (holiday, vacation).
    Closed,
    /// Partial closure: the date opens with these hours instead. Also opens
    /// a weekday that is normally not worked.
    CustomHours { hours: DayHours },
    /// The date keeps its hours but these intervals are blocked.
    Blocked { intervals: Vec<BlockedInterval> },
}

/// A date-specific override to the weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleException {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub kind: ExceptionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ScheduleException {
    pub fn closed(date: NaiveDate) -> Self {
        Self {
            date,
            kind: ExceptionKind::Closed,
            note: None,
        }
    }

    pub fn custom_hours(date: NaiveDate, open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            date,
            kind: ExceptionKind::CustomHours {
                hours: DayHours::new(open, close),
            },
            note: None,
        }
    }

    pub fn blocked(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            date,
            kind: ExceptionKind::Blocked {
                intervals: vec![BlockedInterval { start, end }],
            },
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Weekly hours plus exceptions for a vendor or professional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    pub working_days: BTreeSet<u8>,
    pub hours_by_day: BTreeMap<u8, DayHours>,
    #[serde(default = "default_granularity")]
    pub slot_granularity_minutes: u32,
    #[serde(default)]
    pub exceptions: Vec<ScheduleException>,
}

fn default_granularity() -> u32 {
    DEFAULT_GRANULARITY_MINUTES
}

/// Open window of a single date in minutes since midnight, with the blocked
/// sub-intervals that apply to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayWindow {
    pub open: i64,
    pub close: i64,
    pub blocked: Vec<(i64, i64)>,
}

/// `0 = Sunday ..= 6 = Saturday`.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

impl ScheduleConfig {
    /// Same hours on every listed weekday, no exceptions.
    pub fn weekly(
        working_days: impl IntoIterator<Item = u8>,
        open: NaiveTime,
        close: NaiveTime,
        slot_granularity_minutes: u32,
    ) -> Self {
        let working_days: BTreeSet<u8> = working_days.into_iter().collect();
        let hours_by_day = working_days
            .iter()
            .map(|&day| (day, DayHours::new(open, close)))
            .collect();
        Self {
            working_days,
            hours_by_day,
            slot_granularity_minutes,
            exceptions: Vec::new(),
        }
    }

    /// Schedule used when a vendor has none configured: Monday to Saturday,
    /// 09:00–18:00, 30-minute slots.
    pub fn generic_default() -> Self {
        Self::weekly(
            1..=6,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            DEFAULT_GRANULARITY_MINUTES,
        )
    }

    pub fn with_exception(mut self, exception: ScheduleException) -> Self {
        self.exceptions.push(exception);
        self
    }

    /// Granularity actually used for slot generation; zero falls back to the
    /// default so generation always terminates.
    pub fn effective_granularity(&self) -> u32 {
        if self.slot_granularity_minutes == 0 {
            DEFAULT_GRANULARITY_MINUTES
        } else {
            self.slot_granularity_minutes
        }
    }

    /// Resolve the open window for `date`.
    ///
    /// Returns `None` when the date is closed: not a working day without a
    /// custom-hours exception, any `Closed` exception, or hours that do not
    /// satisfy `open < close`. When several custom-hours exceptions exist
    /// for the date, the last one wins; blocked intervals accumulate.
    pub fn day_window(&self, date: NaiveDate) -> Option<DayWindow> {
        let weekday = weekday_index(date);
        let mut hours = if self.working_days.contains(&weekday) {
            self.hours_by_day.get(&weekday).copied()
        } else {
            None
        };
        let mut blocked = Vec::new();

        for exception in self.exceptions.iter().filter(|e| e.date == date) {
            match &exception.kind {
                ExceptionKind::Closed => return None,
                ExceptionKind::CustomHours { hours: custom } => hours = Some(*custom),
                ExceptionKind::Blocked { intervals } => {
                    blocked.extend(
                        intervals
                            .iter()
                            .map(|b| (clock::minutes_of_day(b.start), clock::minutes_of_day(b.end)))
                            .filter(|(start, end)| start < end),
                    );
                }
            }
        }

        let hours = hours?;
        let open = clock::minutes_of_day(hours.open);
        let close = clock::minutes_of_day(hours.close);
        if open >= close {
            tracing::warn!(
                %date,
                open = %hours.open,
                close = %hours.close,
                "ignoring day with open >= close"
            );
            return None;
        }

        Some(DayWindow { open, close, blocked })
    }

    /// Check the invariants a stored schedule must satisfy.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidSchedule` when a weekday index is out of
    /// range, a working day has no hours, any hours have `open >= close`, a
    /// blocked interval is empty, or the granularity is zero.
    pub fn validate(&self) -> Result<()> {
        if self.slot_granularity_minutes == 0 {
            return Err(EngineError::InvalidSchedule(
                "slotGranularityMinutes must be positive".to_string(),
            ));
        }
        if let Some(day) = self
            .working_days
            .iter()
            .chain(self.hours_by_day.keys())
            .find(|&&day| day > 6)
        {
            return Err(EngineError::InvalidSchedule(format!(
                "weekday index {} out of range 0..=6",
                day
            )));
        }
        for day in &self.working_days {
            if !self.hours_by_day.contains_key(day) {
                return Err(EngineError::InvalidSchedule(format!(
                    "working day {} has no hours",
                    day
                )));
            }
        }
        for (day, hours) in &self.hours_by_day {
            if hours.open >= hours.close {
                return Err(EngineError::InvalidSchedule(format!(
                    "day {}: open {} is not before close {}",
                    day,
                    hours.open.format("%H:%M"),
                    hours.close.format("%H:%M")
                )));
            }
        }
        for exception in &self.exceptions {
            match &exception.kind {
                ExceptionKind::Closed => {}
                ExceptionKind::CustomHours { hours } if hours.open >= hours.close => {
                    return Err(EngineError::InvalidSchedule(format!(
                        "exception on {}: open is not before close",
                        exception.date
                    )));
                }
                ExceptionKind::CustomHours { .. } => {}
                ExceptionKind::Blocked { intervals } => {
                    if intervals.iter().any(|b| b.start >= b.end) {
                        return Err(EngineError::InvalidSchedule(format!(
                            "exception on {}: blocked interval start is not before end",
                            exception.date
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::generic_default()
    }
}
