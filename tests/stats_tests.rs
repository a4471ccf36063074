use approx::assert_relative_eq;
use chrono::{DateTime, TimeZone, Utc};
use spotdash::DashError;
use spotdash::core::{PriceSample, compute_stats};

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0)
        .single()
        .expect("valid instant")
}

fn hourly(prices: &[f64]) -> Vec<PriceSample> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let start = at(0, 0) + chrono::Duration::hours(i as i64);
            PriceSample::new(price, start, start + chrono::Duration::hours(1))
        })
        .collect()
}

#[test]
fn two_hour_example_matches_expected_figures() {
    let samples = hourly(&[5.0, 15.0]);
    let stats = compute_stats(&samples, at(1, 30)).expect("stats");

    assert_eq!(stats.current_index, Some(1));
    assert_eq!(stats.current_price(), Some(15.0));
    assert_relative_eq!(stats.mean, 10.0);
    assert_eq!(stats.min, 5.0);
    assert_eq!(stats.max, 15.0);
    assert_relative_eq!(stats.pct_deviation.expect("deviation"), 50.0);
    assert_eq!(stats.is_good_time(), Some(false));
}

#[test]
fn instant_outside_all_intervals_has_no_current_sample() {
    let samples = hourly(&[5.0, 15.0]);
    let stats = compute_stats(&samples, at(2, 0)).expect("stats");

    assert!(stats.current.is_none());
    assert!(stats.pct_deviation.is_none());
    assert!(stats.is_good_time().is_none());
}

#[test]
fn interval_start_is_inclusive_and_end_exclusive() {
    let samples = hourly(&[1.0, 2.0, 3.0]);
    assert_eq!(
        compute_stats(&samples, at(1, 0)).expect("stats").current_index,
        Some(1)
    );
    assert_eq!(
        compute_stats(&samples, at(0, 59)).expect("stats").current_index,
        Some(0)
    );
}

#[test]
fn overlapping_intervals_resolve_to_first_in_sequence() {
    let mut samples = hourly(&[4.0, 8.0]);
    samples[1].start = Some(at(0, 30));
    let stats = compute_stats(&samples, at(0, 45)).expect("stats");

    assert_eq!(stats.current_index, Some(0));
}

#[test]
fn zero_mean_reports_zero_deviation() {
    let samples = hourly(&[-2.0, 2.0]);
    let stats = compute_stats(&samples, at(0, 10)).expect("stats");

    assert_eq!(stats.mean, 0.0);
    assert_eq!(stats.pct_deviation, Some(0.0));
}

#[test]
fn missing_prices_count_as_zero_in_aggregates() {
    let mut samples = hourly(&[6.0, 3.0, 3.0]);
    samples[0].price = None;
    let stats = compute_stats(&samples, at(0, 0)).expect("stats");

    assert_eq!(stats.min, 0.0);
    assert_eq!(stats.max, 3.0);
    assert!((stats.mean - 2.0).abs() <= 1e-9);
    assert_eq!(stats.current_price(), Some(0.0));
}

#[test]
fn unparsed_dates_never_match_but_still_count() {
    let mut samples = hourly(&[10.0, 20.0]);
    samples[0].start = None;
    let stats = compute_stats(&samples, at(0, 30)).expect("stats");

    assert!(stats.current.is_none());
    assert!((stats.mean - 15.0).abs() <= 1e-9);
}

#[test]
fn empty_input_is_no_price_data() {
    let err = compute_stats(&[], at(0, 0)).expect_err("empty must fail");
    assert!(matches!(err, DashError::NoPriceData));
}

#[test]
fn non_finite_prices_count_as_zero_in_aggregates() {
    let all_nan = hourly(&[f64::NAN, f64::NAN]);
    let stats = compute_stats(&all_nan, at(0, 30)).expect("stats");

    assert_eq!(stats.min, 0.0);
    assert_eq!(stats.max, 0.0);
    assert_eq!(stats.mean, 0.0);
    assert_eq!(stats.pct_deviation, Some(0.0));

    let mixed = hourly(&[f64::NAN, 4.0, f64::NEG_INFINITY, 8.0]);
    let stats = compute_stats(&mixed, at(1, 0)).expect("stats");

    assert_eq!(stats.min, 0.0);
    assert_eq!(stats.max, 8.0);
    assert_relative_eq!(stats.mean, 3.0);
    assert_relative_eq!(stats.pct_deviation.expect("deviation"), 100.0 / 3.0);
}
