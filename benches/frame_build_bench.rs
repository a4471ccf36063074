use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use spotdash::DashboardConfig;
use spotdash::chart::{BarChart, HistogramChart};
use spotdash::core::{
    DisplayTimeZone, PriceSample, RawPriceRecord, compute_stats, normalize_records,
};
use std::hint::black_box;

fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid origin")
}

fn week_of_samples() -> Vec<PriceSample> {
    (0..24 * 7)
        .map(|i| {
            let start = origin() + Duration::hours(i);
            let price = 8.0 + 6.0 * ((i as f64) / 24.0 * std::f64::consts::TAU).sin();
            PriceSample::new(price, start, start + Duration::hours(1))
        })
        .collect()
}

fn bench_normalize_week(c: &mut Criterion) {
    let records: Vec<RawPriceRecord> = (0..24 * 7)
        .map(|i| {
            let start = origin() + Duration::hours(i);
            RawPriceRecord::new(
                i as f64 * 0.1,
                start.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
                (start + Duration::hours(1))
                    .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                    .to_string(),
            )
        })
        .collect();

    c.bench_function("normalize_week", |b| {
        b.iter(|| {
            let series = normalize_records(black_box(&records), DisplayTimeZone::Utc);
            let _ = series.sorted_by_time();
        })
    });
}

fn bench_stats_week(c: &mut Criterion) {
    let samples = week_of_samples();
    let now = origin() + Duration::hours(100);

    c.bench_function("stats_week", |b| {
        b.iter(|| {
            let _ = compute_stats(black_box(&samples), black_box(now)).expect("stats");
        })
    });
}

fn bench_bar_chart_frame(c: &mut Criterion) {
    let chart = BarChart::new(&DashboardConfig::default()).expect("chart");
    let samples = week_of_samples();
    let now = origin() + Duration::hours(42);

    c.bench_function("bar_chart_frame_week", |b| {
        b.iter(|| {
            let _ = chart
                .build_frame(black_box(&samples), now, black_box(Some(17)))
                .expect("frame");
        })
    });
}

fn bench_histogram_frame(c: &mut Criterion) {
    let chart = HistogramChart::new(&DashboardConfig::default()).expect("chart");
    let samples = week_of_samples();

    c.bench_function("histogram_frame_week", |b| {
        b.iter(|| {
            let _ = chart.build_frame(black_box(&samples)).expect("frame");
        })
    });
}

criterion_group!(
    benches,
    bench_normalize_week,
    bench_stats_week,
    bench_bar_chart_frame,
    bench_histogram_frame
);
criterion_main!(benches);
