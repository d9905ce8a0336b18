use thiserror::Error;

/// Failures talking to the upstream feed.
///
/// [`crate::Collector::collect`] never returns these; it logs them and stops
/// with [`crate::StopReason::Errored`]. Single-page fetches surface them
/// directly.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed rejected the API key (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("feed requires a paid plan for this request (HTTP 402)")]
    PaymentRequired,

    #[error("rate limited by feed (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid feed base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
