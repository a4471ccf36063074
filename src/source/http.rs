use std::time::Duration;

use tracing::debug;

use crate::config::SourceConfig;
use crate::core::RawPriceRecord;
use crate::error::{DashError, DashResult};
use crate::source::{PriceSource, parse_price_response};

/// Blocking HTTP client for the spot-price feed.
///
/// One request per call; no retry.
#[derive(Debug, Clone)]
pub struct HttpPriceSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpPriceSource {
    pub fn new(config: &SourceConfig) -> DashResult<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout_secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| DashError::Transport(format!("reqwest client error: {e}")))?;
        Ok(Self {
            url: config.url.clone(),
            client,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PriceSource for HttpPriceSource {
    fn fetch_latest(&self) -> DashResult<Vec<RawPriceRecord>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| DashError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(url = %self.url, status = status.as_u16(), "price feed responded");
        if !status.is_success() {
            return Err(DashError::FetchStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| DashError::Transport(format!("failed to read response body: {e}")))?;
        parse_price_response(&body)
    }
}
