//! One-shot page assembly: fetch, normalize, derive, and build every view.

pub mod terminal;
mod view;

pub use view::{
    BestTimeEntry, DeviationBadge, DeviationDirection, ErrorView, Footer, Guidance, PriceStatus,
    PriceTableRow, SortKey, SortOrder, StatCard, TableSort, best_times, price_table, stat_cards,
};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::chart::{BarChart, HistogramChart, LabelFormatter};
use crate::config::DashboardConfig;
use crate::core::{DerivedStats, PriceSeries, RawPriceRecord, compute_stats, normalize_records};
use crate::error::{DashError, DashResult};
use crate::interaction::TooltipController;
use crate::locale::Locale;
use crate::render::{RenderFrame, Renderer};
use crate::source::PriceSource;

/// Everything the dashboard shows for one build.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPage {
    pub locale: Locale,
    pub generated_at: DateTime<Utc>,
    pub title: String,
    pub subtitle: String,
    /// Time-ascending series backing the charts and the default table order.
    pub series: PriceSeries,
    pub stats: DerivedStats,
    pub cards: Vec<StatCard>,
    pub guidance: Option<Guidance>,
    pub price_chart: RenderFrame,
    pub histogram: RenderFrame,
    pub best_times: Vec<BestTimeEntry>,
    pub table: Vec<PriceTableRow>,
    pub footer: Footer,
    bar_chart: BarChart,
    formatter: LabelFormatter,
}

impl DashboardPage {
    pub fn from_records(
        records: &[RawPriceRecord],
        config: &DashboardConfig,
        now: DateTime<Utc>,
    ) -> DashResult<Self> {
        if records.is_empty() {
            return Err(DashError::NoPriceData);
        }

        let texts = config.locale.texts();
        let formatter = LabelFormatter::new(config.time_zone);
        // The current hour is the first match in feed order; the page shows
        // the time-sorted copy, so the index is remapped onto it.
        let normalized = normalize_records(records, config.time_zone);
        let mut stats = compute_stats(normalized.samples(), now)?;
        let series = normalized.sorted_by_time();
        stats.current_index = stats
            .current
            .as_ref()
            .and_then(|current| series.samples().iter().position(|s| s == current));

        let bar_chart = BarChart::new(config)?;
        let price_chart = bar_chart.build_frame(series.samples(), now, None)?;
        let histogram = HistogramChart::new(config)?.build_frame(series.samples())?;

        let page = Self {
            locale: config.locale,
            generated_at: now,
            title: texts.page_title.to_owned(),
            subtitle: texts.page_subtitle.to_owned(),
            cards: stat_cards(&stats, texts),
            guidance: Guidance::from_stats(&stats, texts),
            best_times: best_times(&series, config.best_times_count, formatter),
            table: price_table(&series, stats.mean, TableSort::default(), formatter, texts),
            footer: Footer {
                source: texts.footer_source.to_owned(),
                updated: format!("{}: {}", texts.footer_updated, formatter.timestamp(now)),
            },
            price_chart,
            histogram,
            series,
            stats,
            bar_chart,
            formatter,
        };

        debug!(
            samples = page.series.len(),
            current = ?page.stats.current_index,
            mean = page.stats.mean,
            "built dashboard page"
        );
        Ok(page)
    }

    /// Table rows in a different order than the default.
    #[must_use]
    pub fn table_sorted(&self, sort: TableSort) -> Vec<PriceTableRow> {
        price_table(
            &self.series,
            self.stats.mean,
            sort,
            self.formatter,
            self.locale.texts(),
        )
    }

    #[must_use]
    pub fn bar_chart(&self) -> &BarChart {
        &self.bar_chart
    }

    /// Interactive controller over this page's bar chart.
    #[must_use]
    pub fn tooltip_controller<R: Renderer>(&self, renderer: R) -> TooltipController<R> {
        TooltipController::new(
            renderer,
            self.bar_chart.clone(),
            self.series.clone(),
            self.generated_at,
        )
    }
}

/// Result of one page build.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Ready(Box<DashboardPage>),
    Failed(ErrorView),
}

impl PageOutcome {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    #[must_use]
    pub fn page(&self) -> Option<&DashboardPage> {
        match self {
            Self::Ready(page) => Some(page),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn error_view(&self) -> Option<&ErrorView> {
        match self {
            Self::Ready(_) => None,
            Self::Failed(view) => Some(view),
        }
    }
}

/// Fetches and assembles the page; every failure becomes an error view.
pub fn build_page<S: PriceSource + ?Sized>(
    source: &S,
    config: &DashboardConfig,
    now: DateTime<Utc>,
) -> PageOutcome {
    match try_build_page(source, config, now) {
        Ok(page) => PageOutcome::Ready(Box::new(page)),
        Err(err) => {
            warn!(
                error = %err,
                upstream = err.is_upstream(),
                "dashboard build failed"
            );
            PageOutcome::Failed(ErrorView::from_error(&err, config.locale))
        }
    }
}

pub fn try_build_page<S: PriceSource + ?Sized>(
    source: &S,
    config: &DashboardConfig,
    now: DateTime<Utc>,
) -> DashResult<DashboardPage> {
    config.validate()?;
    let records = source.fetch_latest()?;
    DashboardPage::from_records(&records, config, now)
}
