//! Upstream price feed access.

mod http;

pub use http::HttpPriceSource;

use serde_json::Value;
use tracing::debug;

use crate::core::RawPriceRecord;
use crate::error::{DashError, DashResult};

/// Anything that can produce the latest raw price records.
pub trait PriceSource {
    fn fetch_latest(&self) -> DashResult<Vec<RawPriceRecord>>;
}

/// Decodes a `{ "prices": [...] }` response body.
///
/// Invalid JSON is a malformed payload; a missing, non-array or empty
/// `prices` field means there is no price data.
pub fn parse_price_response(body: &str) -> DashResult<Vec<RawPriceRecord>> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|e| DashError::MalformedPayload(format!("response is not valid json: {e}")))?;

    let Some(entries) = payload.get("prices").and_then(Value::as_array) else {
        return Err(DashError::NoPriceData);
    };
    if entries.is_empty() {
        return Err(DashError::NoPriceData);
    }

    let records: Vec<RawPriceRecord> = entries
        .iter()
        .map(RawPriceRecord::from_json_value)
        .collect();
    debug!(records = records.len(), "decoded price response");
    Ok(records)
}

/// Canned responses for tests and embedding hosts that already hold a body.
#[derive(Debug, Clone, PartialEq)]
pub enum StaticPriceSource {
    Body(String),
    Records(Vec<RawPriceRecord>),
    Status(u16),
    Transport(String),
}

impl StaticPriceSource {
    #[must_use]
    pub fn body(body: impl Into<String>) -> Self {
        Self::Body(body.into())
    }

    #[must_use]
    pub fn records(records: Vec<RawPriceRecord>) -> Self {
        Self::Records(records)
    }
}

impl PriceSource for StaticPriceSource {
    fn fetch_latest(&self) -> DashResult<Vec<RawPriceRecord>> {
        match self {
            Self::Body(body) => parse_price_response(body),
            Self::Records(records) if records.is_empty() => Err(DashError::NoPriceData),
            Self::Records(records) => Ok(records.clone()),
            Self::Status(status) => Err(DashError::FetchStatus { status: *status }),
            Self::Transport(message) => Err(DashError::Transport(message.clone())),
        }
    }
}

impl<S: PriceSource + ?Sized> PriceSource for &S {
    fn fetch_latest(&self) -> DashResult<Vec<RawPriceRecord>> {
        (**self).fetch_latest()
    }
}

impl<S: PriceSource + ?Sized> PriceSource for Box<S> {
    fn fetch_latest(&self) -> DashResult<Vec<RawPriceRecord>> {
        (**self).fetch_latest()
    }
}
