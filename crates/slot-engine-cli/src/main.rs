//! `slots` CLI — query slot-engine availability from a JSON fixture.
//!
//! ## Usage
//!
//! ```sh
//! # Slot grid for one date
//! slots day -f salon.json --vendor salon-1 --duration 30 --date 2026-03-17
//!
//! # 30-day calendar for one professional
//! slots range -f salon.json --vendor salon-1 --professional ana \
//!   --duration 60 --start 2026-03-16 --days 30
//!
//! # Quick suggestions (3 times per available day)
//! slots suggest -f salon.json --vendor salon-1 --duration 30 --start 2026-03-16
//!
//! # Re-check one start time before confirming a booking
//! slots check -f salon.json --vendor salon-1 --duration 30 --date 2026-03-17 --time 14:00
//! ```
//!
//! Output is pretty-printed JSON on stdout. Logs go to stderr and honour
//! `RUST_LOG`, falling back to `--log-level`.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use slot_engine::store::{Fixture, InMemoryLedger, InMemoryScheduleStore};
use slot_engine::{next_available, AvailabilityService};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slots", version, about = "Salon availability and slot scheduling CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

/// Arguments shared by every query.
#[derive(Args)]
struct QueryArgs {
    /// JSON fixture with vendors, bookings and optional config
    #[arg(short, long)]
    fixture: String,
    /// Vendor (salon) identifier
    #[arg(long)]
    vendor: String,
    /// Restrict to one professional of the vendor
    #[arg(long)]
    professional: Option<String>,
    /// Service duration in minutes
    #[arg(long, default_value_t = 30)]
    duration: u32,
    /// Override the "limited" day threshold (0.0-1.0)
    #[arg(long)]
    threshold: Option<f64>,
    /// Treat this date as today for the far-past cutoff (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Slot grid and status for one date
    Day {
        #[command(flatten)]
        query: QueryArgs,
        /// Date to resolve (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Day statuses over a date range
    Range {
        #[command(flatten)]
        query: QueryArgs,
        /// First date of the range (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,
        /// Number of days
        #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
        days: i64,
        /// Print only date, status and counts per day
        #[arg(long)]
        summary: bool,
    },
    /// Quick suggestions and the next available slot over a range
    Suggest {
        #[command(flatten)]
        query: QueryArgs,
        /// First date of the range (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,
        /// Number of days
        #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
        days: i64,
        /// Times offered per suggested day
        #[arg(long)]
        per_day: Option<usize>,
    },
    /// Re-validate one start time against the ledger
    Check {
        #[command(flatten)]
        query: QueryArgs,
        /// Date of the appointment (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Start time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        time: NaiveTime,
    },
}

type Service = AvailabilityService<InMemoryScheduleStore, InMemoryLedger>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let output = match cli.command {
        Commands::Day { query, date } => {
            let svc = build_service(&query, None)?;
            let day = match query.professional.as_deref() {
                Some(pro) => {
                    svc.professional_day_availability(&query.vendor, pro, date, query.duration)
                }
                None => svc.day_availability(&query.vendor, date, query.duration),
            }
            .context("Failed to resolve day availability")?;
            serde_json::to_value(day)?
        }
        Commands::Range {
            query,
            start,
            days,
            summary,
        } => {
            let svc = build_service(&query, None)?;
            let range = resolve_range(&svc, &query, start, days)?;
            if summary {
                Value::Array(
                    range
                        .iter()
                        .map(|day| {
                            serde_json::json!({
                                "date": day.date,
                                "status": day.status,
                                "availableSlots": day.available_slots,
                                "totalSlots": day.total_slots,
                            })
                        })
                        .collect(),
                )
            } else {
                serde_json::to_value(range)?
            }
        }
        Commands::Suggest {
            query,
            start,
            days,
            per_day,
        } => {
            let svc = build_service(&query, per_day)?;
            let range = resolve_range(&svc, &query, start, days)?;
            let suggestions =
                slot_engine::quick_suggestions(&range, svc.config().suggestions_per_day);
            let next = next_available(&range).map(|(date, time)| {
                serde_json::json!({ "date": date, "time": time.format("%H:%M").to_string() })
            });
            serde_json::json!({
                "suggestions": suggestions,
                "nextAvailable": next,
            })
        }
        Commands::Check { query, date, time } => {
            let svc = build_service(&query, None)?;
            let slot = svc
                .check_slot(
                    &query.vendor,
                    query.professional.as_deref(),
                    date,
                    time,
                    query.duration,
                )
                .context("Failed to check slot")?;
            serde_json::to_value(slot)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Install a compact stderr subscriber. `RUST_LOG` wins over `--log-level`.
fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level/filter: '{}'", level))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))
}

fn build_service(query: &QueryArgs, per_day: Option<usize>) -> Result<Service> {
    let json = std::fs::read_to_string(&query.fixture)
        .with_context(|| format!("Failed to read file: {}", query.fixture))?;
    let fixture = Fixture::from_json(&json)
        .with_context(|| format!("Failed to parse fixture: {}", query.fixture))?;
    tracing::debug!(
        fixture = %query.fixture,
        vendors = fixture.vendors.len(),
        bookings = fixture.bookings.len(),
        "loaded fixture"
    );
    let (store, ledger, mut config) = fixture.into_parts();

    if let Some(threshold) = query.threshold {
        config.limited_threshold = threshold;
    }
    if let Some(per_day) = per_day {
        config.suggestions_per_day = per_day;
    }

    let svc = AvailabilityService::with_config(store, ledger, config)
        .context("Invalid engine configuration")?;
    Ok(match query.today {
        Some(today) => svc.with_today(today),
        None => svc,
    })
}

fn resolve_range(
    svc: &Service,
    query: &QueryArgs,
    start: NaiveDate,
    days: i64,
) -> Result<Vec<slot_engine::DayAvailability>> {
    match query.professional.as_deref() {
        Some(pro) => {
            svc.professional_multi_day_availability(&query.vendor, pro, query.duration, start, days)
        }
        None => svc.multi_day_availability(&query.vendor, query.duration, start, days),
    }
    .context("Failed to resolve range availability")
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}': {} (expected YYYY-MM-DD)", s, e))
}

fn parse_time(s: &str) -> std::result::Result<NaiveTime, String> {
    slot_engine::clock::parse_hhmm(s)
        .ok_or_else(|| format!("invalid time '{}' (expected HH:MM)", s))
}
