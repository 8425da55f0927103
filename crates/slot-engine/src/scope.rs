//! Vendor vs. professional schedule lookup.
//!
//! Both entity kinds resolve to one [`EffectiveSchedule`] (a schedule plus
//! the rule for which bookings occupy it), so the generator and resolver
//! never need to know which kind they are serving.

use crate::booking::Booking;
use crate::schedule::{ExceptionKind, ScheduleConfig};
use crate::store::VendorProfile;

/// Which entity a query is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleScope {
    Vendor,
    Professional(String),
}

/// Where the effective schedule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSource {
    Vendor,
    Professional,
    GenericDefault,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveSchedule {
    pub schedule: ScheduleConfig,
    pub source: ScheduleSource,
    /// Set when bookings must be restricted to one professional.
    pub professional_id: Option<String>,
}

impl ScheduleScope {
    /// Resolve the schedule and booking filter for this scope.
    ///
    /// A professional without an override schedule uses the vendor's; a
    /// vendor without a schedule uses `default_schedule`. An override keeps
    /// its own weekly hours but inherits the vendor's `closed` and `blocked`
    /// exceptions, so a salon holiday closes every professional. An unknown
    /// professional falls back to vendor-wide availability and logs a
    /// configuration warning.
    pub fn resolve(
        &self,
        profile: &VendorProfile,
        default_schedule: &ScheduleConfig,
    ) -> EffectiveSchedule {
        let vendor_wide = || match &profile.schedule {
            Some(schedule) => EffectiveSchedule {
                schedule: schedule.clone(),
                source: ScheduleSource::Vendor,
                professional_id: None,
            },
            None => {
                tracing::debug!(
                    vendor_id = %profile.vendor_id,
                    "no vendor schedule, using generic default"
                );
                EffectiveSchedule {
                    schedule: default_schedule.clone(),
                    source: ScheduleSource::GenericDefault,
                    professional_id: None,
                }
            }
        };

        match self {
            ScheduleScope::Vendor => vendor_wide(),
            ScheduleScope::Professional(professional_id) => {
                match profile.professionals.get(professional_id) {
                    Some(professional) => match &professional.schedule {
                        Some(schedule) => EffectiveSchedule {
                            schedule: inherit_vendor_closures(schedule, profile.schedule.as_ref()),
                            source: ScheduleSource::Professional,
                            professional_id: Some(professional_id.clone()),
                        },
                        None => EffectiveSchedule {
                            professional_id: Some(professional_id.clone()),
                            ..vendor_wide()
                        },
                    },
                    None => {
                        tracing::warn!(
                            vendor_id = %profile.vendor_id,
                            professional_id = %professional_id,
                            "unknown professional, falling back to vendor-wide availability"
                        );
                        vendor_wide()
                    }
                }
            }
        }
    }
}

/// Copy `own` with the vendor's `closed` and `blocked` exceptions appended.
/// Vendor `custom-hours` are not inherited; the professional's hours stand.
fn inherit_vendor_closures(
    own: &ScheduleConfig,
    vendor: Option<&ScheduleConfig>,
) -> ScheduleConfig {
    let mut merged = own.clone();
    if let Some(vendor) = vendor {
        merged.exceptions.extend(
            vendor
                .exceptions
                .iter()
                .filter(|e| !matches!(e.kind, ExceptionKind::CustomHours { .. }))
                .cloned(),
        );
    }
    merged
}

impl EffectiveSchedule {
    /// Whether `booking` takes up this schedule's time.
    ///
    /// Vendor-wide scope counts every booking. A professional is occupied by
    /// bookings pinned to them and by bookings pinned to nobody (shared
    /// resources), never by a colleague's bookings.
    pub fn is_occupied_by(&self, booking: &Booking) -> bool {
        match (&self.professional_id, &booking.professional_id) {
            (None, _) => true,
            (Some(_), None) => true,
            (Some(wanted), Some(pinned)) => wanted == pinned,
        }
    }

    /// Keep only the bookings that occupy this schedule.
    pub fn select_bookings(&self, bookings: Vec<Booking>) -> Vec<Booking> {
        bookings
            .into_iter()
            .filter(|b| self.is_occupied_by(b))
            .collect()
    }
}
