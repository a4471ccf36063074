use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DEFAULT_BIN_COUNT, DisplayTimeZone, PlotArea, Viewport};
use crate::error::{DashError, DashResult};
use crate::locale::Locale;

pub const DEFAULT_PRICES_URL: &str = "https://api.porssisahko.net/v1/latest-prices.json";

/// Where the price feed is fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Request timeout; `None` keeps the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: None,
        }
    }
}

/// Logical surface size and plot inset of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDimensions {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_padding")]
    pub padding: f64,
}

impl ChartDimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn plot_area(self) -> DashResult<PlotArea> {
        PlotArea::from_padding(self.viewport(), self.padding)
    }
}

/// Dashboard configuration, loadable from JSON with every field optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub time_zone: DisplayTimeZone,
    #[serde(default = "default_price_chart")]
    pub price_chart: ChartDimensions,
    #[serde(default = "default_histogram")]
    pub histogram: ChartDimensions,
    #[serde(default = "default_time_label_stride")]
    pub time_label_stride: usize,
    #[serde(default = "default_price_label_divisions")]
    pub price_label_divisions: usize,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    #[serde(default = "default_best_times_count")]
    pub best_times_count: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            locale: Locale::default(),
            time_zone: DisplayTimeZone::default(),
            price_chart: default_price_chart(),
            histogram: default_histogram(),
            time_label_stride: default_time_label_stride(),
            price_label_divisions: default_price_label_divisions(),
            histogram_bins: default_histogram_bins(),
            best_times_count: default_best_times_count(),
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.source.url = url.into();
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: Option<u64>) -> Self {
        self.source.timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_time_zone(mut self, time_zone: DisplayTimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    #[must_use]
    pub fn with_price_chart(mut self, dimensions: ChartDimensions) -> Self {
        self.price_chart = dimensions;
        self
    }

    #[must_use]
    pub fn with_histogram(mut self, dimensions: ChartDimensions) -> Self {
        self.histogram = dimensions;
        self
    }

    #[must_use]
    pub fn with_time_label_stride(mut self, stride: usize) -> Self {
        self.time_label_stride = stride;
        self
    }

    #[must_use]
    pub fn with_price_label_divisions(mut self, divisions: usize) -> Self {
        self.price_label_divisions = divisions;
        self
    }

    #[must_use]
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    #[must_use]
    pub fn with_best_times_count(mut self, count: usize) -> Self {
        self.best_times_count = count;
        self
    }

    pub fn validate(&self) -> DashResult<()> {
        if self.source.url.trim().is_empty() {
            return Err(DashError::InvalidConfig(
                "source url must not be empty".to_owned(),
            ));
        }
        if self.source.timeout_secs == Some(0) {
            return Err(DashError::InvalidConfig(
                "source timeout must be > 0 seconds when set".to_owned(),
            ));
        }
        self.time_zone.validate()?;
        for (name, dimensions) in [
            ("price_chart", self.price_chart),
            ("histogram", self.histogram),
        ] {
            dimensions.plot_area().map_err(|err| {
                DashError::InvalidConfig(format!("{name} dimensions are unusable: {err}"))
            })?;
        }
        for (name, value) in [
            ("time_label_stride", self.time_label_stride),
            ("price_label_divisions", self.price_label_divisions),
            ("histogram_bins", self.histogram_bins),
        ] {
            if value == 0 {
                return Err(DashError::InvalidConfig(format!("{name} must be > 0")));
            }
        }
        Ok(())
    }

    /// Parses and validates a JSON config document.
    pub fn from_json_str(input: &str) -> DashResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| DashError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> DashResult<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&input)?;
        debug!(path = %path.display(), locale = %config.locale, "loaded dashboard config");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> DashResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashError::InvalidConfig(format!("failed to serialize config: {e}")))
    }
}

fn default_url() -> String {
    DEFAULT_PRICES_URL.to_owned()
}

fn default_padding() -> f64 {
    40.0
}

fn default_price_chart() -> ChartDimensions {
    ChartDimensions::new(800, 400, default_padding())
}

fn default_histogram() -> ChartDimensions {
    ChartDimensions::new(500, 300, default_padding())
}

fn default_time_label_stride() -> usize {
    4
}

fn default_price_label_divisions() -> usize {
    5
}

fn default_histogram_bins() -> usize {
    DEFAULT_BIN_COUNT
}

fn default_best_times_count() -> usize {
    5
}
