use tracing::{debug, warn};

use crate::core::sample::{PriceSample, PriceSeries, RawPriceRecord};
use crate::core::time::{DisplayTimeZone, parse_timestamp};

/// Converts raw feed records into a series, keeping feed order.
///
/// Never fails per record: an unparseable date leaves that bound as `None`
/// and a missing or non-finite price becomes `None`. Both cases are logged
/// once per record.
#[must_use]
pub fn normalize_records(records: &[RawPriceRecord], zone: DisplayTimeZone) -> PriceSeries {
    let mut unparsed_dates = 0_usize;
    let mut missing_prices = 0_usize;

    let samples: Vec<PriceSample> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let start_raw = record.start_date.clone().unwrap_or_default();
            let start = parse_timestamp(&start_raw, zone);
            let end = record
                .end_date
                .as_deref()
                .and_then(|raw| parse_timestamp(raw, zone));

            if start.is_none() || end.is_none() {
                unparsed_dates += 1;
                warn!(
                    index,
                    start = %start_raw,
                    end = record.end_date.as_deref().unwrap_or_default(),
                    "price record has an unparseable interval; excluded from time matching"
                );
            }
            let price = record.price.filter(|price| price.is_finite());
            if price.is_none() {
                missing_prices += 1;
                warn!(index, "price record has no numeric price; counted as zero");
            }

            PriceSample {
                price,
                start,
                end,
                start_raw,
            }
        })
        .collect();

    debug!(
        record_count = records.len(),
        unparsed_dates, missing_prices, "normalized price records"
    );
    PriceSeries::new(samples)
}
