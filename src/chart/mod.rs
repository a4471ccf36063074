//! Frame builders for the price bar chart and the price histogram.
//!
//! Builders are pure: they turn samples plus configuration into a
//! `RenderFrame` and never touch a drawing surface.

mod bar_chart;
mod histogram_chart;
pub mod labels;
mod layout;
mod style;

pub use bar_chart::{BarChart, BarGeometry};
pub use histogram_chart::HistogramChart;
pub use labels::LabelFormatter;
pub use layout::{ChartLayout, SlotRect};
pub use style::{AxisStyle, BarChartStyle, HistogramStyle};
