use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chart::{LabelFormatter, labels};
use crate::core::{DerivedStats, PriceSample, PriceSeries};
use crate::error::DashError;
use crate::locale::{Locale, LocaleTexts};

/// Direction arrow shown next to the current price's deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviationDirection {
    /// At or below the mean; rendered as a favourable down arrow.
    Down,
    Up,
}

impl DeviationDirection {
    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Down => "↓",
            Self::Up => "↑",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationBadge {
    pub text: String,
    pub direction: DeviationDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub deviation: Option<DeviationBadge>,
}

impl StatCard {
    fn plain(title: &str, price: f64) -> Self {
        Self {
            title: title.to_owned(),
            value: labels::price_with_unit(price),
            deviation: None,
        }
    }
}

/// Current, average, minimum and maximum cards, in display order.
#[must_use]
pub fn stat_cards(stats: &DerivedStats, texts: &LocaleTexts) -> Vec<StatCard> {
    let current = StatCard {
        title: texts.stat_current.to_owned(),
        value: stats
            .current_price()
            .map_or_else(|| "-".to_owned(), labels::price_with_unit),
        deviation: stats.pct_deviation.map(|pct| DeviationBadge {
            text: format!("{:.1}% {}", pct.abs(), texts.deviation_suffix),
            direction: if pct <= 0.0 {
                DeviationDirection::Down
            } else {
                DeviationDirection::Up
            },
        }),
    };

    vec![
        current,
        StatCard::plain(texts.stat_average, stats.mean),
        StatCard::plain(texts.stat_min, stats.min),
        StatCard::plain(texts.stat_max, stats.max),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guidance {
    pub good_time: bool,
    pub text: String,
}

impl Guidance {
    /// Present only when a current sample exists.
    #[must_use]
    pub fn from_stats(stats: &DerivedStats, texts: &LocaleTexts) -> Option<Self> {
        stats.is_good_time().map(|good_time| Self {
            good_time,
            text: if good_time {
                texts.good_time
            } else {
                texts.wait_time
            }
            .to_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestTimeEntry {
    pub start: Option<DateTime<Utc>>,
    pub price: f64,
    pub time_label: String,
    pub price_text: String,
}

/// The `count` cheapest samples, cheapest first.
#[must_use]
pub fn best_times(
    series: &PriceSeries,
    count: usize,
    formatter: LabelFormatter,
) -> Vec<BestTimeEntry> {
    series
        .sorted_by_price()
        .samples()
        .iter()
        .take(count)
        .map(|sample| BestTimeEntry {
            start: sample.start,
            price: sample.price_or_zero(),
            time_label: formatter.short_date_time(sample.start),
            price_text: labels::price_with_unit(sample.price_or_zero()),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceStatus {
    Cheap,
    Expensive,
}

impl PriceStatus {
    /// Cheap strictly below the mean.
    #[must_use]
    pub fn classify(price: f64, mean: f64) -> Self {
        if price < mean {
            Self::Cheap
        } else {
            Self::Expensive
        }
    }

    #[must_use]
    pub fn label(self, texts: &LocaleTexts) -> &'static str {
        match self {
            Self::Cheap => texts.status_cheap,
            Self::Expensive => texts.status_expensive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTableRow {
    pub start: Option<DateTime<Utc>>,
    pub price: f64,
    pub time_label: String,
    pub price_text: String,
    pub status: PriceStatus,
    pub status_label: String,
}

impl PriceTableRow {
    fn from_sample(
        sample: &PriceSample,
        mean: f64,
        formatter: LabelFormatter,
        texts: &LocaleTexts,
    ) -> Self {
        let price = sample.price_or_zero();
        let status = PriceStatus::classify(price, mean);
        Self {
            start: sample.start,
            price,
            time_label: formatter.short_date_time(sample.start),
            price_text: labels::price_value(price),
            status,
            status_label: status.label(texts).to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortKey {
    #[default]
    Time,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Price table ordering; defaults to time ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TableSort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl TableSort {
    #[must_use]
    pub const fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

impl fmt::Display for TableSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            SortKey::Time => "time",
            SortKey::Price => "price",
        };
        let order = match self.order {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        };
        write!(f, "{key}-{order}")
    }
}

impl FromStr for TableSort {
    type Err = DashError;

    /// Accepts `time`, `price`, `time-desc`, `price-asc` and so on.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        let (key, order) = value.split_once('-').unwrap_or((value.as_str(), "asc"));
        let key = match key {
            "time" => SortKey::Time,
            "price" => SortKey::Price,
            other => {
                return Err(DashError::InvalidConfig(format!(
                    "unknown table sort key `{other}`"
                )));
            }
        };
        let order = match order {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            other => {
                return Err(DashError::InvalidConfig(format!(
                    "unknown table sort order `{other}`"
                )));
            }
        };
        Ok(Self { key, order })
    }
}

/// Every sample as a table row in the requested order.
#[must_use]
pub fn price_table(
    series: &PriceSeries,
    mean: f64,
    sort: TableSort,
    formatter: LabelFormatter,
    texts: &LocaleTexts,
) -> Vec<PriceTableRow> {
    let ordered = match sort.key {
        SortKey::Time => series.sorted_by_time(),
        SortKey::Price => series.sorted_by_price(),
    };
    let mut rows: Vec<PriceTableRow> = ordered
        .samples()
        .iter()
        .map(|sample| PriceTableRow::from_sample(sample, mean, formatter, texts))
        .collect();
    if sort.order == SortOrder::Desc {
        rows.reverse();
    }
    rows
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    pub source: String,
    pub updated: String,
}

/// Fatal-error presentation shown instead of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorView {
    pub title: String,
    pub message: String,
    pub hint: String,
    pub retry_label: String,
}

impl ErrorView {
    #[must_use]
    pub fn from_error(error: &DashError, locale: Locale) -> Self {
        let message = error.to_string();
        Self::with_message(
            if message.trim().is_empty() {
                None
            } else {
                Some(message)
            },
            locale,
        )
    }

    /// Error view with the locale's fallback message.
    #[must_use]
    pub fn unknown(locale: Locale) -> Self {
        Self::with_message(None, locale)
    }

    fn with_message(message: Option<String>, locale: Locale) -> Self {
        let texts = locale.texts();
        Self {
            title: texts.error_title.to_owned(),
            message: message.unwrap_or_else(|| texts.unknown_error.to_owned()),
            hint: texts.error_hint.to_owned(),
            retry_label: texts.retry_label.to_owned(),
        }
    }
}
