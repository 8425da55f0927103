//! Booking ledger read model.
//!
//! Bookings are written by the external booking flow; the engine only reads
//! them to find conflicts.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock::{self, hhmm, MINUTES_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    #[default]
    Confirmed,
    /// Cancelled bookings stay in the ledger but never occupy time.
    Cancelled,
}

/// An existing booking occupying a vendor's (and optionally a
/// professional's) time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
    pub vendor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_id: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
}

impl Booking {
    pub fn new(
        vendor_id: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        duration_minutes: i64,
    ) -> Self {
        Self {
            date,
            start_time,
            duration_minutes,
            vendor_id: vendor_id.into(),
            professional_id: None,
            status: BookingStatus::Confirmed,
        }
    }

    pub fn with_professional(mut self, professional_id: impl Into<String>) -> Self {
        self.professional_id = Some(professional_id.into());
        self
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    /// A booking is well formed when its duration is positive and no longer
    /// than a day.
    pub fn is_well_formed(&self) -> bool {
        self.duration_minutes > 0 && self.duration_minutes <= MINUTES_PER_DAY
    }

    /// Whether this booking takes up time on its date.
    pub fn occupies_time(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    /// `[start, end)` in minutes since midnight. The end may pass midnight.
    pub fn interval(&self) -> (i64, i64) {
        let start = clock::minutes_of_day(self.start_time);
        (start, start + self.duration_minutes)
    }
}
