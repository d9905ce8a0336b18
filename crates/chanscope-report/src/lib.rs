//! Markdown and JSON reports for a collected channel window.

pub mod error;
pub mod export;
pub mod markdown;
pub mod metrics;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ReportError;
pub use export::{write_reports, JsonExport, WrittenReport};
pub use markdown::render_markdown;
pub use metrics::{
    author_score, daily_activity, engagement_leaders, percent, rank_by_score, top_decile_share,
    ChannelSummary, EngagementHealth,
};

use chanscope_core::{AuthorStats, Post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of contributors given a full section when none is requested.
pub const DEFAULT_TOP_N: usize = 25;

/// Facts about the collection run that produced a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub channel_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// UTC calendar days covered by the window, inclusive.
    pub day_span: i64,
    pub generated_at: DateTime<Utc>,
    pub request_count: u32,
    /// Human-readable reason the collection stopped paging.
    pub stop_reason: String,
    /// False when the request cap or a fetch error cut the run short.
    pub complete: bool,
    /// Posts dropped as duplicate ids before aggregation.
    #[serde(default)]
    pub duplicates_removed: usize,
}

/// Everything a renderer needs, borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub stats: &'a [AuthorStats],
    pub posts: &'a [Post],
    pub metadata: &'a ReportMetadata,
    /// Contributors given a full section.
    pub top_n: usize,
}

impl<'a> Report<'a> {
    #[must_use]
    pub fn new(stats: &'a [AuthorStats], posts: &'a [Post], metadata: &'a ReportMetadata) -> Self {
        Self {
            stats,
            posts,
            metadata,
            top_n: DEFAULT_TOP_N,
        }
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    #[must_use]
    pub fn summary(&self) -> ChannelSummary {
        ChannelSummary::compute(self.stats, self.posts, self.metadata.day_span)
    }
}
