use thiserror::Error;

/// Why a feed document was rejected.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The text is not well-formed JSON.
    #[error("Invalid NOAA json syntax: {0}")]
    Syntax(#[from] serde_json::Error),

    /// The text is JSON but not shaped like the ovation-aurora feed.
    #[error(transparent)]
    Schema(#[from] SchemaViolation),
}

/// The part of the feed document that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("Invalid NOAA json data")]
    Document,

    #[error("Invalid NOAA json observation time")]
    ObservationTime,

    #[error("Invalid NOAA json forecast time")]
    ForecastTime,

    #[error("Invalid NOAA json coordinate array")]
    CoordinateArray,

    #[error("Invalid NOAA json coordinate entry at index {index}")]
    CoordinateEntry { index: usize },
}

/// Failure to retrieve a forecast from a feed source.
///
/// Transport problems (`Request`, `Status`, `Body`) stay separate from
/// documents that arrived but did not parse (`Feed`).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error fetching NOAA data from {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("NOAA request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to read NOAA response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Feed(#[from] FeedError),
}

impl FetchError {
    /// True for network and HTTP failures, false when the document itself was bad.
    pub fn is_transport(&self) -> bool {
        !matches!(self, FetchError::Feed(_))
    }
}
