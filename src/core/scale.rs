use serde::{Deserialize, Serialize};

/// Ratio used for every sample when the observed range is zero.
pub const FLAT_RANGE_RATIO: f64 = 0.5;

const HIGH_BAND_THRESHOLD: f64 = 0.7;
const MID_BAND_THRESHOLD: f64 = 0.4;

/// Color band of one bar, chosen from its normalized ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBand {
    Low,
    Mid,
    High,
}

impl PriceBand {
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > HIGH_BAND_THRESHOLD {
            Self::High
        } else if ratio > MID_BAND_THRESHOLD {
            Self::Mid
        } else {
            Self::Low
        }
    }
}

/// Linear mapping from the observed price range onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBandScale {
    pub min: f64,
    pub max: f64,
}

impl PriceBandScale {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Scale spanning the given prices; an empty input maps to `[0, 0]`.
    #[must_use]
    pub fn from_prices(prices: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = prices
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), price| {
                (min.min(price), max.max(price))
            });
        if min.is_finite() && max.is_finite() {
            Self { min, max }
        } else {
            Self { min: 0.0, max: 0.0 }
        }
    }

    #[must_use]
    pub fn range(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_flat(self) -> bool {
        self.range() <= 0.0
    }

    /// Position of `price` in the range, clamped to `[0, 1]`.
    #[must_use]
    pub fn ratio(self, price: f64) -> f64 {
        if self.is_flat() {
            return FLAT_RANGE_RATIO;
        }
        ((price - self.min) / self.range()).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn band(self, price: f64) -> PriceBand {
        PriceBand::from_ratio(self.ratio(price))
    }

    /// Price at `step` of `divisions` evenly spaced levels from min to max.
    #[must_use]
    pub fn level(self, step: usize, divisions: usize) -> f64 {
        if divisions == 0 {
            return self.min;
        }
        self.min + self.range() / divisions as f64 * step as f64
    }
}
