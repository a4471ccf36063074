use serde::{Deserialize, Serialize};

mod events;
mod surface;
mod tooltip;

pub use events::{ChartSurface, Subscription, SurfaceEvent};
pub use surface::SurfaceRect;
pub use tooltip::{TOOLTIP_LIFT_PX, Tooltip, TooltipController};

/// Pointer and highlight state of one bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartRenderState {
    /// Last pointer position in logical pixels; `None` once the pointer left.
    pub pointer: Option<(f64, f64)>,
    pub highlight: Option<usize>,
}

impl ChartRenderState {
    pub fn on_pointer_move(&mut self, x: f64, y: f64, highlight: Option<usize>) {
        self.pointer = Some((x, y));
        self.highlight = highlight;
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
        self.highlight = None;
    }
}
