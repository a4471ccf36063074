use serde::{Deserialize, Serialize};

use crate::core::PriceBand;
use crate::render::Color;

/// Axis, grid and label styling shared by both charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    pub axis_color: Color,
    pub axis_width: f64,
    pub label_color: Color,
    pub label_font_size_px: f64,
    pub grid_color: Color,
    pub grid_width: f64,
    pub grid_dash_on_px: f64,
    pub grid_dash_off_px: f64,
    pub title_color: Color,
    pub title_font_size_px: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            axis_color: Color::hex(0x888888),
            axis_width: 1.0,
            label_color: Color::hex(0x888888),
            label_font_size_px: 10.0,
            grid_color: Color::hex(0xeeeeee),
            grid_width: 1.0,
            grid_dash_on_px: 2.0,
            grid_dash_off_px: 2.0,
            title_color: Color::BLACK,
            title_font_size_px: 14.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarChartStyle {
    pub axis: AxisStyle,
    pub low_color: Color,
    pub mid_color: Color,
    pub high_color: Color,
    /// Horizontal gap between neighbouring bars.
    pub bar_gap_px: f64,
    pub current_outline_color: Color,
    pub current_outline_width: f64,
    pub current_marker_color: Color,
    pub current_marker_font_size_px: f64,
    pub highlight_color: Color,
    pub highlight_width: f64,
    /// Vertical offset of time labels below the plot bottom.
    pub time_label_offset_px: f64,
}

impl Default for BarChartStyle {
    fn default() -> Self {
        Self {
            axis: AxisStyle::default(),
            low_color: Color::hex(0x4ade80),
            mid_color: Color::hex(0xfacc15),
            high_color: Color::hex(0xef4444),
            bar_gap_px: 2.0,
            current_outline_color: Color::BLACK,
            current_outline_width: 2.0,
            current_marker_color: Color::BLACK,
            current_marker_font_size_px: 8.0,
            highlight_color: Color::WHITE,
            highlight_width: 2.0,
            time_label_offset_px: 15.0,
        }
    }
}

impl BarChartStyle {
    #[must_use]
    pub fn band_color(&self, band: PriceBand) -> Color {
        match band {
            PriceBand::Low => self.low_color,
            PriceBand::Mid => self.mid_color,
            PriceBand::High => self.high_color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramStyle {
    pub axis: AxisStyle,
    pub bar_gap_px: f64,
    /// Blue channel of the green-to-red bin gradient.
    pub gradient_blue: u8,
    pub label_offset_px: f64,
}

impl Default for HistogramStyle {
    fn default() -> Self {
        Self {
            axis: AxisStyle::default(),
            bar_gap_px: 2.0,
            gradient_blue: 80,
            label_offset_px: 15.0,
        }
    }
}

impl HistogramStyle {
    /// Bin color at gradient position `ratio` (0 = cheapest bin, 1 = priciest).
    #[must_use]
    pub fn bin_color(&self, ratio: f64) -> Color {
        let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
        let channel = |value: f64| (255.0 * value).round() as u8;
        Color::rgb8(channel(ratio), channel(1.0 - ratio), self.gradient_blue)
    }
}
