pub mod histogram;
pub mod normalize;
pub mod sample;
pub mod scale;
pub mod stats;
pub mod time;
pub mod types;

pub use histogram::{DEFAULT_BIN_COUNT, PriceHistogram, bin_prices};
pub use normalize::normalize_records;
pub use sample::{PriceSample, PriceSeries, RawPriceRecord, SeriesId, current_index};
pub use scale::{FLAT_RANGE_RATIO, PriceBand, PriceBandScale};
pub use stats::{DerivedStats, compute_stats};
pub use time::{DisplayTimeZone, parse_timestamp};
pub use types::{PlotArea, Viewport};
