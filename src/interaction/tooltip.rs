use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::chart::{BarChart, labels};
use crate::core::PriceSeries;
use crate::error::DashResult;
use crate::interaction::{ChartRenderState, ChartSurface, Subscription, SurfaceEvent, SurfaceRect};
use crate::render::Renderer;

/// Vertical lift of the tooltip anchor above the hovered bar, in client pixels.
pub const TOOLTIP_LIFT_PX: f64 = 40.0;

/// Floating label content and its client-space anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub index: usize,
    pub price_text: String,
    pub detail_text: String,
    /// Horizontal center of the hovered bar.
    pub anchor_x: f64,
    pub anchor_y: f64,
}

/// Drives bar-chart redraws and tooltip content from pointer input.
///
/// The series is drawn in the order given, so callers hand in a
/// time-ascending series.
#[derive(Debug)]
pub struct TooltipController<R: Renderer> {
    renderer: R,
    chart: BarChart,
    series: PriceSeries,
    now: DateTime<Utc>,
    state: ChartRenderState,
    tooltip: Option<Tooltip>,
}

impl<R: Renderer> TooltipController<R> {
    #[must_use]
    pub fn new(renderer: R, chart: BarChart, series: PriceSeries, now: DateTime<Utc>) -> Self {
        Self {
            renderer,
            chart,
            series,
            now,
            state: ChartRenderState::default(),
            tooltip: None,
        }
    }

    /// Draws the base chart without highlight.
    pub fn mount(&mut self) -> DashResult<()> {
        self.state = ChartRenderState::default();
        self.tooltip = None;
        self.redraw()
    }

    pub fn pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        rect: SurfaceRect,
    ) -> DashResult<Option<Tooltip>> {
        let viewport = self.chart.viewport();
        let Some((x, y)) = rect.to_logical(client_x, client_y, viewport) else {
            trace!(client_x, client_y, "pointer move on unusable surface rect");
            self.state.on_pointer_leave();
            self.tooltip = None;
            self.redraw()?;
            return Ok(None);
        };

        let hit = self.chart.hit_test(self.series.len(), x, y);
        self.state.on_pointer_move(x, y, hit);
        let tooltip = hit.and_then(|index| self.tooltip_for(index, rect));
        self.tooltip = tooltip;
        self.redraw()?;
        Ok(self.tooltip.clone())
    }

    pub fn pointer_leave(&mut self) -> DashResult<()> {
        self.state.on_pointer_leave();
        self.tooltip = None;
        self.redraw()
    }

    /// Replaces the series; highlight is dropped when its identity changes.
    pub fn set_series(&mut self, series: PriceSeries) -> DashResult<()> {
        if series.id() != self.series.id() {
            debug!(
                previous = self.series.id().get(),
                next = series.id().get(),
                len = series.len(),
                "series identity changed; clearing highlight"
            );
            self.state = ChartRenderState::default();
            self.tooltip = None;
        }
        self.series = series;
        self.redraw()
    }

    /// Moves the evaluation instant used for the current-hour marker.
    pub fn set_now(&mut self, now: DateTime<Utc>) -> DashResult<()> {
        self.now = now;
        self.redraw()
    }

    #[must_use]
    pub fn state(&self) -> ChartRenderState {
        self.state
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    #[must_use]
    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    #[must_use]
    pub fn chart(&self) -> &BarChart {
        &self.chart
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Routes a shared controller's handling of `surface` events.
    ///
    /// The returned guard detaches the controller when dropped.
    pub fn attach(controller: Rc<RefCell<Self>>, surface: &ChartSurface) -> Subscription
    where
        R: 'static,
    {
        surface.subscribe(move |event| {
            let Ok(mut controller) = controller.try_borrow_mut() else {
                warn!("tooltip controller busy; dropping surface event");
                return;
            };
            let result = match *event {
                SurfaceEvent::PointerMove {
                    client_x,
                    client_y,
                    rect,
                } => controller.pointer_move(client_x, client_y, rect).map(|_| ()),
                SurfaceEvent::PointerLeave => controller.pointer_leave(),
            };
            if let Err(err) = result {
                warn!(error = %err, "tooltip redraw failed");
            }
        })
    }

    fn tooltip_for(&self, index: usize, rect: SurfaceRect) -> Option<Tooltip> {
        let samples = self.series.samples();
        let sample = samples.get(index)?;
        let bar = self.chart.bar_geometry(samples, index)?;
        let (anchor_x, bar_top) =
            rect.to_client(bar.rect.center_x(), bar.rect.y, self.chart.viewport())?;
        let formatter = self.chart.label_formatter();

        Some(Tooltip {
            index,
            price_text: labels::price_with_unit(sample.price_or_zero()),
            detail_text: formatter.tooltip_detail(sample.start),
            anchor_x,
            anchor_y: bar_top - TOOLTIP_LIFT_PX,
        })
    }

    fn redraw(&mut self) -> DashResult<()> {
        if self.series.is_empty() {
            trace!("skipping redraw of empty series");
            return Ok(());
        }
        let frame = self
            .chart
            .build_frame(self.series.samples(), self.now, self.state.highlight)?;
        self.renderer.render(&frame)
    }
}
