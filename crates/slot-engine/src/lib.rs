//! # slot-engine
//!
//! Deterministic availability and slot scheduling for a beauty-services
//! marketplace.
//!
//! The engine reconciles weekly business hours, per-professional override
//! schedules, date exceptions and the booking ledger into a day-level status
//! and a slot-level availability grid for a booking calendar. Every result is
//! a point-in-time snapshot: callers must re-check a slot with
//! [`resolver::check_slot`] when confirming a booking.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use slot_engine::{resolve_day, DayStatus, ScheduleConfig};
//!
//! let schedule = ScheduleConfig::generic_default();
//! let tuesday = NaiveDate::from_ymd_opt(2026, 3, 17).unwrap();
//!
//! let day = resolve_day(&schedule, &[], tuesday, 30);
//! assert_eq!(day.status, DayStatus::Available);
//! assert_eq!(day.total_slots, 18);
//! ```
//!
//! ## Modules
//!
//! - [`schedule`] — Weekly hours, exceptions and the generic default schedule
//! - [`booking`] — Booking ledger read model
//! - [`slots`] — Candidate slot generation
//! - [`resolver`] — Per-day slot availability and day status
//! - [`range`] — Multi-day aggregation and quick suggestions
//! - [`scope`] — Vendor vs. professional schedule lookup
//! - [`store`] — Schedule store and booking ledger ports, in-memory adapters
//! - [`service`] — Query facade consumed by the calendar UI
//! - [`config`] — Engine configuration
//! - [`clock`] — Time-of-day helpers
//! - [`error`] — Error types

pub mod booking;
pub mod clock;
pub mod config;
pub mod error;
pub mod range;
pub mod resolver;
pub mod schedule;
pub mod scope;
pub mod service;
pub mod slots;
pub mod store;

pub use booking::{Booking, BookingStatus};
pub use config::EngineConfig;
pub use error::EngineError;
pub use range::{next_available, quick_suggestions, resolve_range, Suggestion};
pub use resolver::{check_slot, resolve_day, DayAvailability, DayStatus, SlotReason, TimeSlot};
pub use schedule::{DayHours, ScheduleConfig, ScheduleException};
pub use scope::ScheduleScope;
pub use service::AvailabilityService;
pub use slots::generate_candidate_slots;
pub use store::{BookingLedger, ScheduleStore, VendorProfile};
