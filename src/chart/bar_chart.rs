use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::chart::labels::{self, LabelFormatter};
use crate::chart::layout::{ChartLayout, SlotRect};
use crate::chart::style::{AxisStyle, BarChartStyle};
use crate::config::{ChartDimensions, DashboardConfig};
use crate::core::{PlotArea, PriceBand, PriceBandScale, PriceSample, Viewport, current_index};
use crate::error::{DashError, DashResult};
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, PolygonPrimitive, RectPrimitive, RenderFrame,
    TextHAlign, TextPrimitive,
};

/// Resolved geometry and color of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub index: usize,
    pub rect: SlotRect,
    pub ratio: f64,
    pub band: PriceBand,
    pub color: Color,
}

/// Color-banded hourly price bar chart.
///
/// Samples are drawn in the order given; callers pass a time-ascending view.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    dimensions: ChartDimensions,
    plot: PlotArea,
    style: BarChartStyle,
    labels: LabelFormatter,
    time_label_stride: usize,
    price_label_divisions: usize,
    title: String,
    current_marker: String,
}

impl BarChart {
    pub fn new(config: &DashboardConfig) -> DashResult<Self> {
        let texts = config.locale.texts();
        Ok(Self {
            dimensions: config.price_chart,
            plot: config.price_chart.plot_area()?,
            style: BarChartStyle::default(),
            labels: LabelFormatter::new(config.time_zone),
            time_label_stride: config.time_label_stride.max(1),
            price_label_divisions: config.price_label_divisions.max(1),
            title: texts.price_chart_title.to_owned(),
            current_marker: texts.current_marker.to_owned(),
        })
    }

    #[must_use]
    pub fn with_style(mut self, style: BarChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn style(&self) -> &BarChartStyle {
        &self.style
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.dimensions.viewport()
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn label_formatter(&self) -> LabelFormatter {
        self.labels
    }

    fn layout(&self, len: usize) -> ChartLayout {
        ChartLayout {
            viewport: self.viewport(),
            plot: self.plot,
            slot_count: len,
            bar_gap_px: self.style.bar_gap_px,
        }
    }

    #[must_use]
    pub fn slot_width(&self, len: usize) -> f64 {
        self.layout(len).slot_width()
    }

    /// Geometry of bar `index`, or `None` when out of range.
    #[must_use]
    pub fn bar_geometry(&self, samples: &[PriceSample], index: usize) -> Option<BarGeometry> {
        let sample = samples.get(index)?;
        let scale = PriceBandScale::from_prices(samples.iter().map(PriceSample::price_or_zero));
        Some(self.geometry_with_scale(samples.len(), index, sample, scale))
    }

    fn geometry_with_scale(
        &self,
        len: usize,
        index: usize,
        sample: &PriceSample,
        scale: PriceBandScale,
    ) -> BarGeometry {
        let price = sample.price_or_zero();
        let ratio = scale.ratio(price);
        let band = scale.band(price);
        BarGeometry {
            index,
            rect: self.layout(len).bar_rect(index, ratio),
            ratio,
            band,
            color: self.style.band_color(band),
        }
    }

    /// Bar index under a logical point inside the plot area.
    #[must_use]
    pub fn hit_test(&self, len: usize, x: f64, y: f64) -> Option<usize> {
        let hit = self.layout(len).slot_at(x, y);
        trace!(x, y, len, hit = ?hit, "bar chart hit test");
        hit
    }

    /// Builds the complete frame for one draw pass.
    ///
    /// `highlight` outlines that bar; an out-of-range index is ignored.
    pub fn build_frame(
        &self,
        samples: &[PriceSample],
        now: DateTime<Utc>,
        highlight: Option<usize>,
    ) -> DashResult<RenderFrame> {
        if samples.is_empty() {
            return Err(DashError::NoPriceData);
        }

        let len = samples.len();
        let layout = self.layout(len);
        let scale = PriceBandScale::from_prices(samples.iter().map(PriceSample::price_or_zero));
        let current = current_index(samples, now);
        let axis = self.style.axis;

        let mut frame = RenderFrame::new(self.viewport());
        frame = push_axes(frame, self.plot, &axis);
        frame = self.push_price_levels(frame, layout, scale);

        for (index, sample) in samples.iter().enumerate() {
            let bar = self.geometry_with_scale(len, index, sample, scale);
            let rect = bar.rect;
            frame = frame.with_rect(RectPrimitive::filled(
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                bar.color,
            ));

            if current == Some(index) {
                frame = self.push_current_marker(frame, rect);
            }

            if index % self.time_label_stride == 0 {
                frame = frame.with_text(TextPrimitive::new(
                    self.labels.hour(sample.start),
                    layout.slot_left(index) + layout.slot_width() / 2.0,
                    self.plot.bottom + self.style.time_label_offset_px,
                    axis.label_font_size_px,
                    axis.label_color,
                    TextHAlign::Center,
                ));
            }
        }

        if let Some(index) = highlight {
            match samples.get(index) {
                Some(sample) => {
                    let rect = self.geometry_with_scale(len, index, sample, scale).rect;
                    frame = frame.with_rect(RectPrimitive::outlined(
                        rect.x,
                        rect.y,
                        rect.width,
                        rect.height,
                        self.style.highlight_color,
                        self.style.highlight_width,
                    ));
                }
                None => trace!(index, len, "ignoring out-of-range highlight"),
            }
        }

        frame = push_title(frame, self.viewport(), self.plot, &axis, &self.title);

        debug!(
            bars = len,
            current = ?current,
            highlight = ?highlight,
            rects = frame.rects.len(),
            texts = frame.texts.len(),
            "built bar chart frame"
        );
        Ok(frame)
    }

    fn push_price_levels(
        &self,
        mut frame: RenderFrame,
        layout: ChartLayout,
        scale: PriceBandScale,
    ) -> RenderFrame {
        let axis = self.style.axis;
        let divisions = self.price_label_divisions;
        for step in 0..=divisions {
            let y = layout.level_y(step, divisions);
            frame = frame
                .with_text(TextPrimitive::new(
                    labels::price_value(scale.level(step, divisions)),
                    self.plot.left - 5.0,
                    y + 3.0,
                    axis.label_font_size_px,
                    axis.label_color,
                    TextHAlign::Right,
                ))
                .with_line(grid_line(self.plot, y, &axis));
        }
        frame
    }

    fn push_current_marker(&self, frame: RenderFrame, rect: SlotRect) -> RenderFrame {
        let center_x = rect.center_x();
        let top = rect.y;
        frame
            .with_rect(RectPrimitive::outlined(
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                self.style.current_outline_color,
                self.style.current_outline_width,
            ))
            .with_polygon(PolygonPrimitive::new(
                vec![
                    (center_x, top - 2.0),
                    (center_x - 3.0, top - 8.0),
                    (center_x + 3.0, top - 8.0),
                ],
                self.style.current_marker_color,
            ))
            .with_text(
                TextPrimitive::new(
                    self.current_marker.clone(),
                    center_x,
                    top - 10.0,
                    self.style.current_marker_font_size_px,
                    self.style.current_marker_color,
                    TextHAlign::Center,
                )
                .bold(),
            )
    }
}

pub(crate) fn push_axes(frame: RenderFrame, plot: PlotArea, axis: &AxisStyle) -> RenderFrame {
    frame
        .with_line(LinePrimitive::new(
            plot.left,
            plot.top,
            plot.left,
            plot.bottom,
            axis.axis_width,
            axis.axis_color,
        ))
        .with_line(LinePrimitive::new(
            plot.left,
            plot.bottom,
            plot.right,
            plot.bottom,
            axis.axis_width,
            axis.axis_color,
        ))
}

pub(crate) fn grid_line(plot: PlotArea, y: f64, axis: &AxisStyle) -> LinePrimitive {
    LinePrimitive::new(plot.left, y, plot.right, y, axis.grid_width, axis.grid_color)
        .with_stroke_style(LineStrokeStyle::Dashed {
            on_px: axis.grid_dash_on_px,
            off_px: axis.grid_dash_off_px,
        })
}

pub(crate) fn push_title(
    frame: RenderFrame,
    viewport: Viewport,
    plot: PlotArea,
    axis: &AxisStyle,
    title: &str,
) -> RenderFrame {
    frame.with_text(
        TextPrimitive::new(
            title,
            f64::from(viewport.width) / 2.0,
            plot.top / 2.0,
            axis.title_font_size_px,
            axis.title_color,
            TextHAlign::Center,
        )
        .bold(),
    )
}
