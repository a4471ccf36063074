use tracing::debug;

use crate::chart::bar_chart::{grid_line, push_axes, push_title};
use crate::chart::labels;
use crate::chart::layout::ChartLayout;
use crate::chart::style::HistogramStyle;
use crate::config::{ChartDimensions, DashboardConfig};
use crate::core::{PlotArea, PriceHistogram, PriceSample, Viewport, bin_prices};
use crate::error::{DashError, DashResult};
use crate::render::{RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

/// Frequency chart of prices over equal-width bins.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramChart {
    dimensions: ChartDimensions,
    plot: PlotArea,
    style: HistogramStyle,
    bin_count: usize,
    count_divisions: usize,
    title: String,
}

impl HistogramChart {
    pub fn new(config: &DashboardConfig) -> DashResult<Self> {
        Ok(Self {
            dimensions: config.histogram,
            plot: config.histogram.plot_area()?,
            style: HistogramStyle::default(),
            bin_count: config.histogram_bins.max(1),
            count_divisions: config.price_label_divisions.max(1),
            title: config.locale.texts().histogram_title.to_owned(),
        })
    }

    #[must_use]
    pub fn with_style(mut self, style: HistogramStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.dimensions.viewport()
    }

    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    pub fn histogram(&self, samples: &[PriceSample]) -> DashResult<PriceHistogram> {
        let prices: Vec<f64> = samples.iter().map(PriceSample::price_or_zero).collect();
        bin_prices(&prices, self.bin_count)
    }

    pub fn build_frame(&self, samples: &[PriceSample]) -> DashResult<RenderFrame> {
        if samples.is_empty() {
            return Err(DashError::NoPriceData);
        }

        let histogram = self.histogram(samples)?;
        let layout = ChartLayout {
            viewport: self.viewport(),
            plot: self.plot,
            slot_count: histogram.bin_count(),
            bar_gap_px: self.style.bar_gap_px,
        };
        let axis = self.style.axis;
        let max_count = histogram.max_count();
        let last_bin = histogram.bin_count() - 1;

        let mut frame = push_axes(RenderFrame::new(self.viewport()), self.plot, &axis);

        for step in 0..=self.count_divisions {
            let y = layout.level_y(step, self.count_divisions);
            let count =
                (max_count as f64 / self.count_divisions as f64 * step as f64).round() as u64;
            frame = frame
                .with_text(TextPrimitive::new(
                    count.to_string(),
                    self.plot.left - 5.0,
                    y + 3.0,
                    axis.label_font_size_px,
                    axis.label_color,
                    TextHAlign::Right,
                ))
                .with_line(grid_line(self.plot, y, &axis));
        }

        for (index, &count) in histogram.counts.iter().enumerate() {
            let ratio = if max_count == 0 {
                0.0
            } else {
                count as f64 / max_count as f64
            };
            let gradient = if last_bin == 0 {
                0.0
            } else {
                index as f64 / last_bin as f64
            };
            let rect = layout.bar_rect(index, ratio);
            frame = frame.with_rect(RectPrimitive::filled(
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                self.style.bin_color(gradient),
            ));

            if index % 2 == 0 || index == last_bin {
                frame = frame.with_text(TextPrimitive::new(
                    labels::histogram_price(histogram.lower_bound(index)),
                    layout.slot_left(index) + layout.slot_width() / 2.0,
                    self.plot.bottom + self.style.label_offset_px,
                    axis.label_font_size_px,
                    axis.label_color,
                    TextHAlign::Center,
                ));
            }
        }

        frame = push_title(frame, self.viewport(), self.plot, &axis, &self.title);

        debug!(
            samples = samples.len(),
            bins = histogram.bin_count(),
            max_count,
            "built histogram frame"
        );
        Ok(frame)
    }
}
