//! spotdash: hourly electricity spot-price dashboard.
//!
//! The crate normalizes the upstream price feed, derives summary statistics,
//! and builds backend-agnostic render frames for a color-banded bar chart and
//! a price histogram. An interactive tooltip controller maps pointer input to
//! bars and redraws with highlight state. `Renderer` backends rasterize frames.

pub mod chart;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod error;
pub mod interaction;
pub mod locale;
pub mod render;
pub mod source;
pub mod telemetry;

pub use config::{ChartDimensions, DashboardConfig, SourceConfig};
pub use core::{DisplayTimeZone, PriceSample, PriceSeries, RawPriceRecord};
pub use dashboard::{DashboardPage, PageOutcome, build_page};
pub use error::{DashError, DashResult};
pub use locale::Locale;
