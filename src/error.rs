use thiserror::Error;

pub type DashResult<T> = Result<T, DashError>;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to fetch electricity prices: {status}")]
    FetchStatus { status: u16 },

    #[error("price request failed: {0}")]
    Transport(String),

    #[error("malformed price payload: {0}")]
    MalformedPayload(String),

    #[error("No price data available")]
    NoPriceData,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashError {
    /// Returns `true` for errors raised while fetching or decoding the
    /// upstream price feed.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::FetchStatus { .. }
                | Self::Transport(_)
                | Self::MalformedPayload(_)
                | Self::NoPriceData
        )
    }
}
