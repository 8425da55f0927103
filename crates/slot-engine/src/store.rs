//! Ports to the schedule configuration store and the booking ledger.
//!
//! The engine never owns schedules or bookings; it reads them through these
//! traits so the backing storage can be swapped and tests can inject
//! fixtures. Implementations report backend failures as
//! `EngineError::DataSource`, which the facade propagates unchanged.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::schedule::ScheduleConfig;

/// Schedule configuration of a professional working for a vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalProfile {
    /// Overrides the vendor schedule when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleConfig>,
}

/// Everything the store knows about a vendor's schedules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorProfile {
    pub vendor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleConfig>,
    #[serde(default)]
    pub professionals: BTreeMap<String, ProfessionalProfile>,
}

impl VendorProfile {
    pub fn new(vendor_id: impl Into<String>) -> Self {
        Self {
            vendor_id: vendor_id.into(),
            schedule: None,
            professionals: BTreeMap::new(),
        }
    }

    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Register a professional, optionally with their own schedule.
    pub fn with_professional(
        mut self,
        professional_id: impl Into<String>,
        schedule: Option<ScheduleConfig>,
    ) -> Self {
        self.professionals
            .insert(professional_id.into(), ProfessionalProfile { schedule });
        self
    }
}

/// Read access to vendor and professional schedules.
pub trait ScheduleStore: Send + Sync {
    /// Look up a vendor. `Ok(None)` means the vendor is unknown.
    fn vendor(&self, vendor_id: &str) -> Result<Option<VendorProfile>>;
}

/// Read access to existing bookings.
pub trait BookingLedger: Send + Sync {
    /// All bookings of `vendor_id` dated within `[first, last]`, for every
    /// professional. Order is unspecified.
    fn bookings_between(
        &self,
        vendor_id: &str,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<Booking>>;
}

impl<T: ScheduleStore + ?Sized> ScheduleStore for Arc<T> {
    fn vendor(&self, vendor_id: &str) -> Result<Option<VendorProfile>> {
        (**self).vendor(vendor_id)
    }
}

impl<T: BookingLedger + ?Sized> BookingLedger for Arc<T> {
    fn bookings_between(
        &self,
        vendor_id: &str,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<Booking>> {
        (**self).bookings_between(vendor_id, first, last)
    }
}

// ---------------------------------------------------------------------------
// In-memory adapters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct InMemoryScheduleStore {
    vendors: BTreeMap<String, VendorProfile>,
}

impl InMemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, profile: VendorProfile) {
        self.vendors.insert(profile.vendor_id.clone(), profile);
    }

    pub fn with_vendor(mut self, profile: VendorProfile) -> Self {
        self.insert(profile);
        self
    }
}

impl FromIterator<VendorProfile> for InMemoryScheduleStore {
    fn from_iter<I: IntoIterator<Item = VendorProfile>>(iter: I) -> Self {
        let mut store = Self::new();
        for profile in iter {
            store.insert(profile);
        }
        store
    }
}

impl ScheduleStore for InMemoryScheduleStore {
    fn vendor(&self, vendor_id: &str) -> Result<Option<VendorProfile>> {
        Ok(self.vendors.get(vendor_id).cloned())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    bookings: Vec<Booking>,
}

impl InMemoryLedger {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }

    pub fn push(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }
}

impl BookingLedger for InMemoryLedger {
    fn bookings_between(
        &self,
        vendor_id: &str,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.vendor_id == vendor_id && b.date >= first && b.date <= last)
            .cloned()
            .collect())
    }
}

/// A self-contained JSON snapshot of vendors, bookings and engine config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub vendors: Vec<VendorProfile>,
    pub bookings: Vec<Booking>,
    pub config: EngineConfig,
}

impl Fixture {
    /// Parse a fixture from a JSON string.
    ///
    /// # Errors
    /// Returns `EngineError::Fixture` if the JSON does not match the fixture shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Split the fixture into in-memory adapters ready for the facade.
    pub fn into_parts(self) -> (InMemoryScheduleStore, InMemoryLedger, EngineConfig) {
        (
            self.vendors.into_iter().collect(),
            InMemoryLedger::new(self.bookings),
            self.config,
        )
    }
}
