use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::sample::{PriceSample, current_index};
use crate::error::{DashError, DashResult};

/// Summary figures derived from one series at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub current: Option<PriceSample>,
    pub current_index: Option<usize>,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Percent deviation of the current price from the mean.
    pub pct_deviation: Option<f64>,
}

impl DerivedStats {
    #[must_use]
    pub fn current_price(&self) -> Option<f64> {
        self.current.as_ref().map(PriceSample::price_or_zero)
    }

    /// `true` when the current price is strictly below the mean.
    #[must_use]
    pub fn is_good_time(&self) -> Option<bool> {
        self.current_price().map(|price| price < self.mean)
    }

    #[must_use]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

pub fn compute_stats(samples: &[PriceSample], now: DateTime<Utc>) -> DashResult<DerivedStats> {
    if samples.is_empty() {
        return Err(DashError::NoPriceData);
    }

    let (sum, min, max) = samples.iter().map(PriceSample::price_or_zero).fold(
        (0.0_f64, f64::INFINITY, f64::NEG_INFINITY),
        |(sum, min, max), price| (sum + price, min.min(price), max.max(price)),
    );
    let mean = (sum / samples.len() as f64).clamp(min, max);

    let current_index = current_index(samples, now);
    let current = current_index.map(|index| samples[index].clone());
    let pct_deviation = current.as_ref().map(|sample| {
        if mean == 0.0 {
            0.0
        } else {
            (sample.price_or_zero() - mean) / mean * 100.0
        }
    });

    Ok(DerivedStats {
        current,
        current_index,
        mean,
        min,
        max,
        pct_deviation,
    })
}
