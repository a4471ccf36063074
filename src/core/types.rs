use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};

/// Logical pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Padded plot rectangle inside a viewport, in logical pixels.
///
/// The origin of the chart's cartesian axes is `(left, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    /// Insets `viewport` by `padding` on every side.
    pub fn from_padding(viewport: Viewport, padding: f64) -> DashResult<Self> {
        if !viewport.is_valid() {
            return Err(DashError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !padding.is_finite() || padding < 0.0 {
            return Err(DashError::InvalidData(
                "plot padding must be finite and >= 0".to_owned(),
            ));
        }

        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        if padding * 2.0 >= width || padding * 2.0 >= height {
            return Err(DashError::InvalidData(format!(
                "plot padding {padding} leaves no drawable area in {}x{}",
                viewport.width, viewport.height
            )));
        }

        Ok(Self {
            left: padding,
            top: padding,
            right: width - padding,
            bottom: height - padding,
        })
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    /// Inclusive containment test, matching pointer hit-testing on the edges.
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}
