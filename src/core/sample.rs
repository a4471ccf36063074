use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static NEXT_SERIES_ID: AtomicU64 = AtomicU64::new(1);

/// One entry of the upstream feed exactly as received.
///
/// Every field is optional: the feed is treated as untrusted and
/// per-entry problems are resolved during normalization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPriceRecord {
    pub price: Option<f64>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

impl RawPriceRecord {
    #[must_use]
    pub fn new(price: f64, start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            price: Some(price),
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
        }
    }

    /// Lenient extraction from one JSON array element.
    ///
    /// Numeric strings are accepted for `price`; anything else that is not a
    /// finite number becomes `None`. Non-object elements yield an empty record.
    #[must_use]
    pub fn from_json_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let price = object.get("price").and_then(|raw| {
            raw.as_f64()
                .or_else(|| raw.as_str().and_then(|text| text.trim().parse::<f64>().ok()))
                .filter(|price| price.is_finite())
        });
        let text_field = |name: &str| object.get(name).and_then(Value::as_str).map(str::to_owned);

        Self {
            price,
            start_date: text_field("startDate"),
            end_date: text_field("endDate"),
        }
    }
}

/// One hour's price with its half-open validity interval `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub price: Option<f64>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub start_raw: String,
}

impl PriceSample {
    #[must_use]
    pub fn new(price: f64, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            price: Some(price),
            start: Some(start),
            end: Some(end),
            start_raw: start.to_rfc3339(),
        }
    }

    /// Price used by every aggregate; a missing or non-finite price counts
    /// as zero.
    #[must_use]
    pub fn price_or_zero(&self) -> f64 {
        self.price.filter(|price| price.is_finite()).unwrap_or(0.0)
    }

    /// Whether `instant` falls inside `[start, end)`.
    ///
    /// Samples with an unparsed start or end never contain anything.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= instant && instant < end,
            _ => false,
        }
    }
}

/// Identity of one materialized series.
///
/// Clones share an identity; re-sorted copies receive a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesId(u64);

impl SeriesId {
    fn next() -> Self {
        Self(NEXT_SERIES_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Ordered collection of samples for the displayed period.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    id: SeriesId,
    samples: Vec<PriceSample>,
}

impl PriceSeries {
    #[must_use]
    pub fn new(samples: Vec<PriceSample>) -> Self {
        Self {
            id: SeriesId::next(),
            samples,
        }
    }

    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }

    #[must_use]
    pub fn samples(&self) -> &[PriceSample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time-ascending copy. Entries without a parsed start sort last.
    #[must_use]
    pub fn sorted_by_time(&self) -> Self {
        let mut samples = self.samples.clone();
        samples.sort_by(|a, b| match (a.start, b.start) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        Self::new(samples)
    }

    /// Price-ascending copy; ties keep their original relative order.
    #[must_use]
    pub fn sorted_by_price(&self) -> Self {
        let mut samples = self.samples.clone();
        samples.sort_by_key(|sample| OrderedFloat(sample.price_or_zero()));
        Self::new(samples)
    }

    /// Index of the first sample whose interval contains `instant`.
    #[must_use]
    pub fn current_index(&self, instant: DateTime<Utc>) -> Option<usize> {
        current_index(&self.samples, instant)
    }
}

/// First-match lookup over a read-only view of a series.
#[must_use]
pub fn current_index(samples: &[PriceSample], instant: DateTime<Utc>) -> Option<usize> {
    samples.iter().position(|sample| sample.contains(instant))
}
