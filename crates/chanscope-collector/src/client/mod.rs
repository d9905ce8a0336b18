//! HTTP client for the Neynar channel feed.

use std::time::Duration;

use chanscope_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::CollectorError;
use crate::normalize::normalize_cast;
use crate::source::{FeedPage, FeedSource};
use crate::types::NeynarFeedResponse;

const DEFAULT_BASE_URL: &str = "https://api.neynar.com/v2/farcaster/";

/// Client for Neynar's `feed` endpoint filtered to a single channel.
///
/// Maps 401/403, 402, and 429 to typed errors and never retries; the
/// collection loop decides what a failure means for the run. Use
/// [`NeynarClient::with_base_url`] to point at a mock server in tests.
pub struct NeynarClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl NeynarClient {
    /// Creates a client pointed at the production Neynar API.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CollectorError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`CollectorError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, CollectorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join("feed")` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CollectorError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Creates a client from the API key, base URL, timeout, and user agent
    /// in `config`.
    ///
    /// # Errors
    ///
    /// See [`NeynarClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, CollectorError> {
        Self::with_base_url(
            &config.neynar_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.neynar_base_url,
        )
    }

    /// Fetches one raw page of the channel feed.
    ///
    /// # Errors
    ///
    /// - [`CollectorError::Unauthorized`]: HTTP 401 or 403.
    /// - [`CollectorError::PaymentRequired`]: HTTP 402.
    /// - [`CollectorError::RateLimited`]: HTTP 429.
    /// - [`CollectorError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`CollectorError::Http`]: network or TLS failure.
    /// - [`CollectorError::Deserialize`]: body is not a feed response.
    pub async fn fetch_feed_page(
        &self,
        channel_id: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<NeynarFeedResponse, CollectorError> {
        let url = self.feed_url(channel_id, limit, cursor)?;

        let response = self
            .client
            .get(url.clone())
            .header("x-api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        match status.as_u16() {
            401 | 403 => {
                return Err(CollectorError::Unauthorized {
                    status: status.as_u16(),
                })
            }
            402 => return Err(CollectorError::PaymentRequired),
            429 => {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(CollectorError::RateLimited { retry_after_secs });
            }
            _ => {}
        }

        if !status.is_success() {
            return Err(CollectorError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<NeynarFeedResponse>(&body).map_err(|e| {
            CollectorError::Deserialize {
                context: format!("feed page for channel {channel_id}"),
                source: e,
            }
        })
    }

    /// Builds the feed URL for `channel_id`, page size, and optional cursor.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::InvalidBaseUrl`] if `feed` cannot be joined
    /// onto the base URL.
    fn feed_url(
        &self,
        channel_id: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<Url, CollectorError> {
        let mut url = self
            .base_url
            .join("feed")
            .map_err(|e| CollectorError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("feed_type", "filter");
            pairs.append_pair("filter_type", "channel_id");
            pairs.append_pair("channel_id", channel_id);
            pairs.append_pair("limit", &limit.to_string());
            if let Some(cursor) = cursor {
                pairs.append_pair("cursor", cursor);
            }
        }
        Ok(url)
    }
}

impl FeedSource for NeynarClient {
    async fn fetch_page(
        &self,
        channel_id: &str,
        page_size: u32,
        cursor: Option<&str>,
    ) -> Result<FeedPage, CollectorError> {
        let response = self.fetch_feed_page(channel_id, page_size, cursor).await?;
        let next_cursor = response.next_cursor().map(str::to_owned);
        let items = response.casts.into_iter().map(normalize_cast).collect();
        Ok(FeedPage { items, next_cursor })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
