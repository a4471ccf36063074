use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{DashError, DashResult};

pub const DEFAULT_BIN_COUNT: usize = 10;

/// Equal-width frequency counts over `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistogram {
    pub min: f64,
    pub max: f64,
    pub bin_width: f64,
    pub counts: SmallVec<[usize; DEFAULT_BIN_COUNT]>,
}

impl PriceHistogram {
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    #[must_use]
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Inclusive lower bound of bin `index`.
    #[must_use]
    pub fn lower_bound(&self, index: usize) -> f64 {
        self.min + self.bin_width * index as f64
    }
}

/// Buckets `prices` into `bin_count` equal-width bins.
///
/// The maximum lands in the last bin. A zero-width range puts every price in
/// bin 0. An empty input yields all-zero counts over `[0, 0]`.
pub fn bin_prices(prices: &[f64], bin_count: usize) -> DashResult<PriceHistogram> {
    if bin_count == 0 {
        return Err(DashError::InvalidData(
            "histogram bin count must be > 0".to_owned(),
        ));
    }
    if prices.iter().any(|price| !price.is_finite()) {
        return Err(DashError::InvalidData(
            "histogram prices must be finite".to_owned(),
        ));
    }

    let mut counts: SmallVec<[usize; DEFAULT_BIN_COUNT]> = SmallVec::from_elem(0, bin_count);
    if prices.is_empty() {
        return Ok(PriceHistogram {
            min: 0.0,
            max: 0.0,
            bin_width: 0.0,
            counts,
        });
    }

    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bin_width = (max - min) / bin_count as f64;

    for &price in prices {
        let index = if bin_width > 0.0 {
            (((price - min) / bin_width).floor() as usize).min(bin_count - 1)
        } else {
            0
        };
        counts[index] += 1;
    }

    Ok(PriceHistogram {
        min,
        max,
        bin_width,
        counts,
    })
}
