use chrono::{DateTime, Duration, TimeZone, Utc};
use spotdash::chart::{BarChart, BarChartStyle};
use spotdash::core::{PriceBand, PriceSample};
use spotdash::render::{Color, LineStrokeStyle, TextHAlign};
use spotdash::{DashError, DashboardConfig, Locale};

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

fn ramp(len: usize) -> Vec<PriceSample> {
    let prices: Vec<f64> = (0..len).map(|i| i as f64).collect();
    hourly(&prices)
}

fn chart() -> BarChart {
    BarChart::new(&DashboardConfig::default()).expect("chart")
}

fn outside_range() -> DateTime<Utc> {
    origin() - Duration::days(1)
}

#[test]
fn frame_has_axes_grid_levels_time_labels_and_title() {
    let frame = chart()
        .build_frame(&ramp(24), outside_range(), None)
        .expect("frame");
    frame.validate().expect("valid frame");

    assert_eq!(frame.rects.len(), 24);
    assert_eq!(frame.lines.len(), 2 + 6);
    assert!(frame.polygons.is_empty());
    // 6 price levels, ceil(24 / 4) time labels, one title
    assert_eq!(frame.texts.len(), 6 + 6 + 1);

    for label in ["0.00", "4.60", "9.20", "13.80", "18.40", "23.00"] {
        let text = frame.find_text(label).expect("price level label");
        assert_eq!(text.h_align, TextHAlign::Right);
        assert!((text.x - 35.0).abs() <= 1e-9);
    }
    for label in ["00:00", "04:00", "08:00", "12:00", "16:00", "20:00"] {
        let text = frame.find_text(label).expect("time label");
        assert_eq!(text.h_align, TextHAlign::Center);
        assert!((text.y - 375.0).abs() <= 1e-9);
    }
    assert!(frame.find_text("01:00").is_none());

    let title = frame
        .find_text("Sähkön Hinnat (senttiä/kWh)")
        .expect("title");
    assert!(title.bold);
    assert!((title.x - 400.0).abs() <= 1e-9);
    assert!((title.y - 20.0).abs() <= 1e-9);
}

#[test]
fn time_label_count_rounds_up() {
    for (len, expected) in [(1, 1), (4, 1), (5, 2), (23, 6), (25, 7)] {
        let frame = chart()
            .build_frame(&ramp(len), outside_range(), None)
            .expect("frame");
        let time_labels = frame
            .texts
            .iter()
            .filter(|text| text.text.ends_with(":00"))
            .count();
        assert_eq!(time_labels, expected, "len {len}");
    }
}

#[test]
fn grid_lines_are_dashed_and_axes_solid() {
    let frame = chart()
        .build_frame(&ramp(3), outside_range(), None)
        .expect("frame");

    assert_eq!(frame.lines[0].stroke_style, LineStrokeStyle::Solid);
    assert_eq!(frame.lines[1].stroke_style, LineStrokeStyle::Solid);
    for line in &frame.lines[2..] {
        assert_eq!(
            line.stroke_style,
            LineStrokeStyle::Dashed {
                on_px: 2.0,
                off_px: 2.0
            }
        );
    }
}

#[test]
fn bars_are_colored_by_band() {
    let style = BarChartStyle::default();
    let frame = chart()
        .build_frame(&hourly(&[0.0, 5.0, 10.0, 7.5]), outside_range(), None)
        .expect("frame");

    let fills: Vec<Option<Color>> = frame.rects.iter().map(|rect| rect.fill).collect();
    assert_eq!(
        fills,
        vec![
            Some(style.band_color(PriceBand::Low)),
            Some(style.band_color(PriceBand::Mid)),
            Some(style.band_color(PriceBand::High)),
            Some(style.band_color(PriceBand::High)),
        ]
    );
    assert_eq!(frame.rects[0].height, 0.0);
    assert!((frame.rects[2].height - 320.0).abs() <= 1e-9);
}

#[test]
fn flat_prices_draw_uniform_mid_bars() {
    let style = BarChartStyle::default();
    let frame = chart()
        .build_frame(&hourly(&[6.0; 8]), outside_range(), None)
        .expect("frame");

    for rect in &frame.rects {
        assert!((rect.height - 160.0).abs() <= 1e-9);
        assert_eq!(rect.fill, Some(style.band_color(PriceBand::Mid)));
    }
}

#[test]
fn bars_fill_their_slots_left_to_right() {
    let frame = chart()
        .build_frame(&ramp(10), outside_range(), None)
        .expect("frame");

    for (index, rect) in frame.rects.iter().enumerate() {
        assert!((rect.x - (40.0 + 72.0 * index as f64)).abs() <= 1e-9);
        assert!((rect.width - 70.0).abs() <= 1e-9);
        assert!((rect.bottom() - 360.0).abs() <= 1e-9);
    }
}

#[test]
fn current_bar_gets_outline_marker_and_label() {
    let now = origin() + Duration::minutes(5 * 60 + 30);
    let frame = chart()
        .build_frame(&ramp(24), now, None)
        .expect("frame");
    frame.validate().expect("valid frame");

    assert_eq!(frame.rects.len(), 25);
    let outline = frame
        .rects
        .iter()
        .find(|rect| rect.fill.is_none())
        .expect("current outline");
    assert_eq!(outline.border_color, Color::BLACK);
    assert_eq!(outline.border_width, 2.0);
    assert!((outline.x - (40.0 + 30.0 * 5.0)).abs() <= 1e-9);

    assert_eq!(frame.polygons.len(), 1);
    let center_x = outline.x + outline.width / 2.0;
    assert_eq!(
        frame.polygons[0].points,
        vec![
            (center_x, outline.y - 2.0),
            (center_x - 3.0, outline.y - 8.0),
            (center_x + 3.0, outline.y - 8.0),
        ]
    );

    let marker = frame.find_text("NYT").expect("marker label");
    assert!(marker.bold);
    assert!((marker.y - (outline.y - 10.0)).abs() <= 1e-9);
}

#[test]
fn english_marker_and_title_follow_locale() {
    let config = DashboardConfig::default().with_locale(Locale::En);
    let chart = BarChart::new(&config).expect("chart");
    let frame = chart
        .build_frame(&ramp(3), origin() + Duration::minutes(10), None)
        .expect("frame");

    assert!(frame.find_text("NOW").is_some());
    assert!(frame.find_text("Electricity Prices (cents/kWh)").is_some());
}

#[test]
fn highlight_adds_white_outline_and_ignores_out_of_range() {
    let samples = ramp(6);
    let plain = chart()
        .build_frame(&samples, outside_range(), None)
        .expect("frame");
    let highlighted = chart()
        .build_frame(&samples, outside_range(), Some(2))
        .expect("frame");
    let ignored = chart()
        .build_frame(&samples, outside_range(), Some(6))
        .expect("frame");

    assert_eq!(highlighted.rects.len(), plain.rects.len() + 1);
    let outline = highlighted.rects.last().expect("highlight outline");
    assert_eq!(outline.fill, None);
    assert_eq!(outline.border_color, Color::WHITE);
    assert!((outline.x - highlighted.rects[2].x).abs() <= 1e-9);
    assert_eq!(ignored, plain);
}

#[test]
fn zone_offset_shifts_time_labels() {
    let config = DashboardConfig::default()
        .with_time_zone(spotdash::DisplayTimeZone::FixedOffsetMinutes { minutes: 120 });
    let chart = BarChart::new(&config).expect("chart");
    let frame = chart
        .build_frame(&ramp(5), outside_range(), None)
        .expect("frame");

    assert!(frame.find_text("02:00").is_some());
    assert!(frame.find_text("06:00").is_some());
    assert!(frame.find_text("00:00").is_none());
}

#[test]
fn empty_samples_are_no_price_data() {
    let err = chart()
        .build_frame(&[], origin(), None)
        .expect_err("empty must fail");
    assert!(matches!(err, DashError::NoPriceData));
}
