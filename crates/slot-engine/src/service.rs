//! Query facade consumed by the booking calendar.
//!
//! Four entry points form a 2×2 matrix: single day vs. multi-day, vendor-wide
//! vs. professional. Each call reads a fresh snapshot from the injected
//! store and ledger; results are advisory and must be re-checked with
//! [`AvailabilityService::check_slot`] when a booking is confirmed.

use chrono::{Days, NaiveDate, NaiveTime, Utc};

use crate::booking::Booking;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::range::{self, Suggestion};
use crate::resolver::{self, DayAvailability, SlotReason, TimeSlot};
use crate::scope::{EffectiveSchedule, ScheduleScope};
use crate::store::{BookingLedger, ScheduleStore};

pub struct AvailabilityService<S, L> {
    store: S,
    ledger: L,
    config: EngineConfig,
    today: Option<NaiveDate>,
}

impl<S: ScheduleStore, L: BookingLedger> AvailabilityService<S, L> {
    /// Build a service with the default [`EngineConfig`].
    pub fn new(store: S, ledger: L) -> Self {
        Self {
            store,
            ledger,
            config: EngineConfig::default(),
            today: None,
        }
    }

    /// Build a service with an explicit config.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidConfig` if the config does not validate.
    pub fn with_config(store: S, ledger: L, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            ledger,
            config,
            today: None,
        })
    }

    /// Pin "today" instead of reading the system clock. Only affects the
    /// far-past cutoff of range queries.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Single day ──────────────────────────────────────────────────────────

    /// Vendor-wide availability of one date.
    ///
    /// # Errors
    /// Returns `EngineError::DataSource` if the store or ledger cannot be read.
    pub fn day_availability(
        &self,
        vendor_id: &str,
        date: NaiveDate,
        service_duration_minutes: u32,
    ) -> Result<DayAvailability> {
        self.query_day(vendor_id, &ScheduleScope::Vendor, date, service_duration_minutes)
    }

    /// Availability of one professional on one date.
    ///
    /// # Errors
    /// Returns `EngineError::DataSource` if the store or ledger cannot be read.
    pub fn professional_day_availability(
        &self,
        vendor_id: &str,
        professional_id: &str,
        date: NaiveDate,
        service_duration_minutes: u32,
    ) -> Result<DayAvailability> {
        self.query_day(
            vendor_id,
            &ScheduleScope::Professional(professional_id.to_string()),
            date,
            service_duration_minutes,
        )
    }

    // ── Multi-day ───────────────────────────────────────────────────────────

    /// Vendor-wide availability of `days` consecutive dates from `start_date`.
    ///
    /// # Errors
    /// Returns `EngineError::DataSource` if the store or ledger cannot be read.
    pub fn multi_day_availability(
        &self,
        vendor_id: &str,
        service_duration_minutes: u32,
        start_date: NaiveDate,
        days: i64,
    ) -> Result<Vec<DayAvailability>> {
        self.query_range(
            vendor_id,
            &ScheduleScope::Vendor,
            service_duration_minutes,
            start_date,
            days,
        )
    }

    /// Availability of one professional over `days` consecutive dates.
    ///
    /// # Errors
    /// Returns `EngineError::DataSource` if the store or ledger cannot be read.
    pub fn professional_multi_day_availability(
        &self,
        vendor_id: &str,
        professional_id: &str,
        service_duration_minutes: u32,
        start_date: NaiveDate,
        days: i64,
    ) -> Result<Vec<DayAvailability>> {
        self.query_range(
            vendor_id,
            &ScheduleScope::Professional(professional_id.to_string()),
            service_duration_minutes,
            start_date,
            days,
        )
    }

    // ── Booking support ─────────────────────────────────────────────────────

    /// Re-validate one start time right before confirming a booking.
    ///
    /// An unknown vendor yields `outside-hours`.
    ///
    /// # Errors
    /// Returns `EngineError::DataSource` if the store or ledger cannot be read.
    pub fn check_slot(
        &self,
        vendor_id: &str,
        professional_id: Option<&str>,
        date: NaiveDate,
        time: NaiveTime,
        service_duration_minutes: u32,
    ) -> Result<TimeSlot> {
        let scope = scope_for(professional_id);
        let Some(effective) = self.effective_schedule(vendor_id, &scope)? else {
            return Ok(TimeSlot::unavailable(time, SlotReason::OutsideHours));
        };
        let bookings = self.occupying_bookings(vendor_id, &effective, date, date)?;
        Ok(resolver::check_slot(
            &effective.schedule,
            &bookings,
            date,
            time,
            service_duration_minutes,
        ))
    }

    /// Quick suggestions over a multi-day query, `suggestions_per_day` times
    /// per day.
    ///
    /// # Errors
    /// Returns `EngineError::DataSource` if the store or ledger cannot be read.
    pub fn suggestions(
        &self,
        vendor_id: &str,
        professional_id: Option<&str>,
        service_duration_minutes: u32,
        start_date: NaiveDate,
        days: i64,
    ) -> Result<Vec<Suggestion>> {
        let range = self.query_range(
            vendor_id,
            &scope_for(professional_id),
            service_duration_minutes,
            start_date,
            days,
        )?;
        Ok(range::quick_suggestions(&range, self.config.suggestions_per_day))
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn query_day(
        &self,
        vendor_id: &str,
        scope: &ScheduleScope,
        date: NaiveDate,
        service_duration_minutes: u32,
    ) -> Result<DayAvailability> {
        let Some(effective) = self.effective_schedule(vendor_id, scope)? else {
            return Ok(DayAvailability::closed(date));
        };
        let bookings = self.occupying_bookings(vendor_id, &effective, date, date)?;
        Ok(resolver::resolve_day_with_threshold(
            &effective.schedule,
            &bookings,
            date,
            service_duration_minutes,
            self.config.limited_threshold,
        ))
    }

    fn query_range(
        &self,
        vendor_id: &str,
        scope: &ScheduleScope,
        service_duration_minutes: u32,
        start_date: NaiveDate,
        days: i64,
    ) -> Result<Vec<DayAvailability>> {
        if days <= 0 {
            return Ok(Vec::new());
        }
        if start_date < self.earliest_start() {
            tracing::debug!(%vendor_id, %start_date, "range starts too far in the past");
            return Ok(Vec::new());
        }

        let max_days = self.config.max_range_days;
        if days > max_days {
            tracing::warn!(%vendor_id, requested = days, max_days, "clamping range length");
        }
        let days = days.min(max_days);

        let Some(effective) = self.effective_schedule(vendor_id, scope)? else {
            return Ok(range::window_dates(start_date, days)
                .into_iter()
                .map(DayAvailability::closed)
                .collect());
        };

        let last_date = start_date
            .checked_add_days(Days::new((days - 1) as u64))
            .unwrap_or(NaiveDate::MAX);
        // One ledger read for the whole window.
        let bookings = self.occupying_bookings(vendor_id, &effective, start_date, last_date)?;

        Ok(range::resolve_range_with_threshold(
            &effective.schedule,
            &bookings,
            start_date,
            days,
            service_duration_minutes,
            self.config.limited_threshold,
        ))
    }

    /// `None` for an unknown vendor.
    fn effective_schedule(
        &self,
        vendor_id: &str,
        scope: &ScheduleScope,
    ) -> Result<Option<EffectiveSchedule>> {
        match self.store.vendor(vendor_id)? {
            Some(profile) => {
                let effective = scope.resolve(&profile, &self.config.default_schedule);
                tracing::debug!(
                    %vendor_id,
                    professional_id = ?effective.professional_id,
                    source = ?effective.source,
                    "resolved effective schedule"
                );
                Ok(Some(effective))
            }
            None => {
                tracing::debug!(%vendor_id, "unknown vendor, reporting closed");
                Ok(None)
            }
        }
    }

    fn occupying_bookings(
        &self,
        vendor_id: &str,
        effective: &EffectiveSchedule,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<Booking>> {
        let bookings = self.ledger.bookings_between(vendor_id, first, last)?;
        Ok(effective.select_bookings(bookings))
    }

    fn earliest_start(&self) -> NaiveDate {
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        today
            .checked_sub_days(Days::new(self.config.max_past_days.max(0) as u64))
            .unwrap_or(NaiveDate::MIN)
    }
}

fn scope_for(professional_id: Option<&str>) -> ScheduleScope {
    match professional_id {
        Some(id) => ScheduleScope::Professional(id.to_string()),
        None => ScheduleScope::Vendor,
    }
}
