use serde::{Deserialize, Serialize};

use crate::config::ChartDimensions;
use crate::core::{PlotArea, Viewport};
use crate::error::DashResult;

/// Slot geometry for `slot_count` equal-width columns across a plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub viewport: Viewport,
    pub plot: PlotArea,
    pub slot_count: usize,
    pub bar_gap_px: f64,
}

/// Column rectangle in logical pixels; `y` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SlotRect {
    #[must_use]
    pub fn center_x(self) -> f64 {
        self.x + self.width / 2.0
    }
}

impl ChartLayout {
    pub fn new(
        dimensions: ChartDimensions,
        slot_count: usize,
        bar_gap_px: f64,
    ) -> DashResult<Self> {
        Ok(Self {
            viewport: dimensions.viewport(),
            plot: dimensions.plot_area()?,
            slot_count,
            bar_gap_px,
        })
    }

    #[must_use]
    pub fn slot_width(self) -> f64 {
        if self.slot_count == 0 {
            return 0.0;
        }
        self.plot.width() / self.slot_count as f64
    }

    /// Drawn column width: the slot minus the gap, never below half the slot.
    #[must_use]
    pub fn bar_width(self) -> f64 {
        let slot = self.slot_width();
        (slot - self.bar_gap_px).max(slot * 0.5)
    }

    #[must_use]
    pub fn slot_left(self, index: usize) -> f64 {
        self.plot.left + index as f64 * self.slot_width()
    }

    /// Column `index` filled to `ratio` of the plot height from the bottom.
    #[must_use]
    pub fn bar_rect(self, index: usize, ratio: f64) -> SlotRect {
        let height = ratio.clamp(0.0, 1.0) * self.plot.height();
        SlotRect {
            x: self.slot_left(index),
            y: self.plot.bottom - height,
            width: self.bar_width(),
            height,
        }
    }

    /// Pixel row of level `step` out of `divisions`, counted upward from the
    /// plot bottom.
    #[must_use]
    pub fn level_y(self, step: usize, divisions: usize) -> f64 {
        if divisions == 0 {
            return self.plot.bottom;
        }
        self.plot.bottom - self.plot.height() * step as f64 / divisions as f64
    }

    /// Column under a logical point. Bounds are inclusive on every edge.
    #[must_use]
    pub fn slot_at(self, x: f64, y: f64) -> Option<usize> {
        if self.slot_count == 0 || !x.is_finite() || !y.is_finite() {
            return None;
        }
        if !self.plot.contains(x, y) {
            return None;
        }
        let index = ((x - self.plot.left) / self.slot_width()).floor() as usize;
        (index < self.slot_count).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(slots: usize) -> ChartLayout {
        ChartLayout::new(ChartDimensions::new(800, 400, 40.0), slots, 2.0).expect("layout")
    }

    #[test]
    fn right_edge_maps_past_last_slot() {
        let layout = layout(10);
        assert_eq!(layout.slot_at(40.0, 40.0), Some(0));
        assert_eq!(layout.slot_at(759.9, 360.0), Some(9));
        assert_eq!(layout.slot_at(760.0, 200.0), None);
        assert_eq!(layout.slot_at(39.9, 200.0), None);
    }

    #[test]
    fn narrow_slots_keep_half_their_width() {
        let layout = layout(400);
        assert_eq!(layout.slot_width(), 1.8);
        assert_eq!(layout.bar_width(), 0.9);
    }
}
