//! Performance benchmarks for the attendance engine.
//!
//! This benchmark suite covers the hot paths:
//! - Daily aggregation of a single day's punches
//! - Period aggregation over a full year
//! - Bulk balance recalculation over a roster
//! - The daily summary endpoint end to end
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use attendance_engine::api::{AppState, create_router};
use attendance_engine::calculation::{aggregate_day, aggregate_period};
use attendance_engine::config::{AttendanceSettings, LeavePolicySettings, VersionedPolicy};
use attendance_engine::engine::{AttendanceEngine, FixedClock, recalculate_all};
use attendance_engine::models::{AttendanceEvent, EventType, RosterEntry};
use attendance_engine::store::InMemoryStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0).unwrap()
}

/// A check-in and check-out on every day from `start`, with a duplicate
/// check-in every third day.
fn punches(employee_id: &str, start: NaiveDate, days: i64) -> Vec<AttendanceEvent> {
    (0..days)
        .flat_map(|offset| {
            let date = start + Duration::days(offset);
            let mut day = vec![
                AttendanceEvent::new(employee_id, at(date, 8, 0), EventType::CheckIn),
                AttendanceEvent::new(employee_id, at(date, 17, 0), EventType::CheckOut),
            ];
            if offset % 3 == 0 {
                day.push(AttendanceEvent::new(
                    employee_id,
                    at(date, 8, 1),
                    EventType::CheckIn,
                ));
            }
            day
        })
        .collect()
}

fn policy() -> VersionedPolicy {
    VersionedPolicy::initial(LeavePolicySettings::default(), Utc::now())
}

fn populated_store(employees: usize) -> InMemoryStore {
    let store = InMemoryStore::new(policy());
    for i in 0..employees {
        let id = format!("emp_{:04}", i);
        let hire = make_date("2020-01-01") + Duration::days((i % 1500) as i64);
        store.upsert_employee(RosterEntry::new(id.clone(), Some(hire)));
        for event in punches(&id, make_date("2025-09-01"), 30) {
            store.record_event(event).unwrap();
        }
    }
    store
}

/// Benchmark: One day with a duplicate check-in.
///
/// Target: < 10μs mean
fn bench_aggregate_day(c: &mut Criterion) {
    let settings = AttendanceSettings::default();
    let date = make_date("2026-01-19");
    let events = punches("emp_001", date, 1);

    c.bench_function("aggregate_day", |b| {
        b.iter(|| {
            black_box(aggregate_day(
                black_box("emp_001"),
                date,
                black_box(&events),
                &settings,
                false,
            ))
        })
    });
}

/// Benchmark: Period summaries of increasing length.
///
/// Target: < 5ms mean for 366 days
fn bench_aggregate_period(c: &mut Criterion) {
    let settings = AttendanceSettings::default();
    let start = make_date("2025-01-01");

    let mut group = c.benchmark_group("aggregate_period");
    for days in [7_i64, 31, 366] {
        let events = punches("emp_001", start, days);
        let end = start + Duration::days(days - 1);
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &events, |b, events| {
            b.iter(|| {
                black_box(
                    aggregate_period("emp_001", start, end, events, &settings, false).unwrap(),
                )
            })
        });
    }
    group.finish();
}

/// Benchmark: Bulk recalculation over rosters of increasing size.
///
/// Target: < 50ms mean for 1000 employees
fn bench_recalculate_all(c: &mut Criterion) {
    let today = make_date("2025-10-01");

    let mut group = c.benchmark_group("recalculate_all");
    for employees in [100_usize, 1000] {
        let store = populated_store(employees);
        let next = policy().next(LeavePolicySettings::default(), Utc::now());
        group.throughput(Throughput::Elements(employees as u64));
        group.bench_with_input(BenchmarkId::from_parameter(employees), &store, |b, store| {
            b.iter(|| black_box(recalculate_all(store, &next, today).unwrap()))
        });
    }
    group.finish();
}

/// Benchmark: `GET /attendance/daily-summary/:employee_id` through the router.
///
/// Target: < 100μs mean
fn bench_daily_summary_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(populated_store(100));
    let engine = AttendanceEngine::new(
        store,
        AttendanceSettings::default(),
        Arc::new(FixedClock::on(make_date("2025-10-01"))),
    )
    .unwrap();
    let router = create_router(AppState::new(engine));

    c.bench_function("daily_summary_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .uri("/attendance/daily-summary/emp_0042?date=2025-09-15")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_aggregate_day,
    bench_aggregate_period,
    bench_recalculate_all,
    bench_daily_summary_endpoint,
);
criterion_main!(benches);
