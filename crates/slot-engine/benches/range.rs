//! Benchmarks the 30-day calendar query, the most frequently issued call.

use chrono::{Duration, NaiveDate, NaiveTime};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use slot_engine::{resolve_range, Booking, ScheduleConfig, ScheduleException};
use std::hint::black_box;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// A busy salon: one booking per open hour on most days.
fn ledger(start: NaiveDate, days: i64) -> Vec<Booking> {
    let mut bookings = Vec::new();
    for offset in 0..days {
        let date = start + Duration::days(offset);
        for hour in (9..18).step_by(2) {
            bookings.push(Booking::new("salon-1", date, t(hour, 0), 60));
        }
    }
    bookings
}

fn bench_range(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    let schedule = ScheduleConfig::generic_default()
        .with_exception(ScheduleException::closed(start + Duration::days(10)))
        .with_exception(ScheduleException::blocked(start + Duration::days(3), t(13, 0), t(14, 0)));

    let mut group = c.benchmark_group("resolve_range");
    for days in [7i64, 30, 90] {
        let bookings = ledger(start, days);
        group.bench_with_input(BenchmarkId::from_parameter(days), &days, |b, &days| {
            b.iter(|| {
                resolve_range(
                    black_box(&schedule),
                    black_box(&bookings),
                    start,
                    days,
                    black_box(30),
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_range);
criterion_main!(benches);
