//! The multi-page collection loop.

use std::time::Duration;

use chanscope_core::{AppConfig, CollectionWindow, Post};
use chrono::{DateTime, Utc};

use crate::pagination::{evaluate_page, PageStep, StopReason};
use crate::source::FeedSource;

/// Paging limits for one collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorSettings {
    /// Posts requested per page.
    pub page_size: u32,
    /// Hard cap on page requests per run, failed requests included.
    pub max_requests: u32,
    /// Pause before following a cursor.
    pub inter_request_delay: Duration,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            page_size: 100,
            max_requests: 150,
            inter_request_delay: Duration::from_millis(200),
        }
    }
}

impl CollectorSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            page_size: config.page_size,
            max_requests: config.max_requests,
            inter_request_delay: Duration::from_millis(config.inter_request_delay_ms),
        }
    }
}

/// Result of one collection run.
#[derive(Debug, Clone)]
pub struct Collection {
    /// In-window posts in feed order.
    pub posts: Vec<Post>,
    /// Page requests issued, including a failed final request.
    pub request_count: u32,
    pub stop_reason: StopReason,
}

impl Collection {
    /// False when the run was cut short by the request cap or a fetch error.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stop_reason.is_complete()
    }

    /// Timestamp of the oldest collected post.
    #[must_use]
    pub fn oldest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.posts.iter().map(|p| p.timestamp).min()
    }

    #[must_use]
    pub fn into_posts(self) -> Vec<Post> {
        self.posts
    }
}

/// Pages through a [`FeedSource`] for one window at a time.
///
/// Requests are strictly sequential: each cursor comes from the previous
/// response.
pub struct Collector<S> {
    source: S,
    settings: CollectorSettings,
}

impl<S: FeedSource> Collector<S> {
    pub fn new(source: S, settings: CollectorSettings) -> Self {
        Self { source, settings }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Collects every post in `window` reachable before a stop condition.
    ///
    /// Never fails: a fetch error ends the run with
    /// [`StopReason::Errored`] and the posts gathered so far. Hitting
    /// `max_requests` ends it with [`StopReason::CapReached`]. Neither is
    /// retried here; call again to retry.
    ///
    /// `window` is not validated. An inverted window keeps nothing and stops
    /// on the first non-empty page.
    pub async fn collect(&self, window: &CollectionWindow) -> Collection {
        let mut posts: Vec<Post> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut request_count = 0u32;

        tracing::info!(
            channel = %window.channel_id,
            start = %window.start,
            end = %window.end,
            "collecting channel feed"
        );

        let stop_reason = loop {
            if request_count >= self.settings.max_requests {
                break self.cap_reached(window, request_count, posts.len());
            }

            let fetched = self
                .source
                .fetch_page(&window.channel_id, self.settings.page_size, cursor.as_deref())
                .await;
            request_count += 1;

            let page = match fetched {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!(
                        channel = %window.channel_id,
                        requests = request_count,
                        kept = posts.len(),
                        error = %e,
                        "feed fetch failed; returning partial collection"
                    );
                    break StopReason::Errored(e.to_string());
                }
            };

            tracing::debug!(
                channel = %window.channel_id,
                requests = request_count,
                page_len = page.items.len(),
                has_cursor = page.next_cursor.is_some(),
                "fetched feed page"
            );

            let outcome = evaluate_page(page, window);
            posts.extend(outcome.kept);

            match outcome.step {
                PageStep::Continue { cursor: next } => {
                    cursor = Some(next);
                    tracing::info!(
                        channel = %window.channel_id,
                        requests = request_count,
                        kept = posts.len(),
                        "fetched posts in date range so far"
                    );
                    if request_count >= self.settings.max_requests {
                        break self.cap_reached(window, request_count, posts.len());
                    }
                    if !self.settings.inter_request_delay.is_zero() {
                        tokio::time::sleep(self.settings.inter_request_delay).await;
                    }
                }
                PageStep::Stop(reason) => {
                    tracing::info!(
                        channel = %window.channel_id,
                        requests = request_count,
                        reason = %reason,
                        "stopped paging"
                    );
                    break reason;
                }
            }
        };

        tracing::info!(
            channel = %window.channel_id,
            total = posts.len(),
            requests = request_count,
            complete = stop_reason.is_complete(),
            "collection finished"
        );

        Collection {
            posts,
            request_count,
            stop_reason,
        }
    }

    fn cap_reached(&self, window: &CollectionWindow, requests: u32, kept: usize) -> StopReason {
        tracing::warn!(
            channel = %window.channel_id,
            requests,
            max_requests = self.settings.max_requests,
            kept,
            "request cap reached; collection may be incomplete"
        );
        StopReason::CapReached
    }
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod tests;
