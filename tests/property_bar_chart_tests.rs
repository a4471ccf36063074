use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use spotdash::DashboardConfig;
use spotdash::chart::BarChart;
use spotdash::core::PriceSample;

fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid origin")
}

fn hourly(prices: &[f64]) -> Vec<PriceSample> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let start = origin() + Duration::hours(i as i64);
            PriceSample::new(price, start, start + Duration::hours(1))
        })
        .collect()
}

proptest! {
    #[test]
    fn frames_are_deterministic_and_valid(
        prices in prop::collection::vec(-30.0f64..300.0f64, 1..72),
        minute in -120i64..(72 * 60),
        highlight in prop::option::of(0usize..80)
    ) {
        let chart = BarChart::new(&DashboardConfig::default()).expect("chart");
        let samples = hourly(&prices);
        let now = origin() + Duration::minutes(minute);

        let first = chart.build_frame(&samples, now, highlight).expect("frame");
        let second = chart.build_frame(&samples, now, highlight).expect("frame");

        prop_assert_eq!(&first, &second);
        prop_assert!(first.validate().is_ok());
        prop_assert!(first.polygons.len() <= 1);
    }

    #[test]
    fn time_label_count_is_ceil_of_stride(
        len in 1usize..96,
        stride in 1usize..9
    ) {
        let config = DashboardConfig::default().with_time_label_stride(stride);
        let chart = BarChart::new(&config).expect("chart");
        let prices: Vec<f64> = (0..len).map(|i| (i % 7) as f64).collect();
        let frame = chart
            .build_frame(&hourly(&prices), origin() - Duration::hours(1), None)
            .expect("frame");

        let time_labels = frame.texts.iter().filter(|t| t.text.ends_with(":00")).count();
        prop_assert_eq!(time_labels, len.div_ceil(stride));
    }

    #[test]
    fn hit_test_agrees_with_bar_slots(
        len in 1usize..64,
        x in 0.0f64..800.0,
        y in 0.0f64..400.0
    ) {
        let chart = BarChart::new(&DashboardConfig::default()).expect("chart");
        let plot = chart.plot_area();
        let slot = chart.slot_width(len);

        match chart.hit_test(len, x, y) {
            Some(index) => {
                prop_assert!(index < len);
                prop_assert!(plot.contains(x, y));
                let left = plot.left + slot * index as f64;
                prop_assert!(x >= left - 1e-9);
                prop_assert!(x < left + slot + 1e-9);
            }
            None => {
                let outside = !plot.contains(x, y) || x >= plot.left + slot * len as f64 - 1e-9;
                prop_assert!(outside);
            }
        }
    }
}
