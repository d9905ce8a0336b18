//! Channel-level and per-author metrics derived from aggregated stats.
//!
//! Every ratio here returns `0.0` when its denominator is zero, so an empty
//! collection renders as a report of zeros.

use std::collections::BTreeMap;
use std::fmt;

use chanscope_core::{AuthorStats, Post};
use chrono::NaiveDate;

/// Minimum posts an author needs to appear among the engagement leaders.
pub const LEADER_MIN_POSTS: u64 = 3;

/// Headline numbers for the whole channel window.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSummary {
    pub total_posts: usize,
    pub unique_authors: usize,
    pub avg_posts_per_author: f64,
    pub avg_posts_per_day: f64,
    pub total_engagement: u64,
    pub avg_engagement_per_post: f64,
    /// Weighted blend of volume, reach, engagement and cadence.
    pub score: f64,
}

impl ChannelSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(stats: &[AuthorStats], posts: &[Post], day_span: i64) -> Self {
        let total_posts = posts.len();
        let unique_authors = stats.len();
        let total_engagement: u64 = stats.iter().map(AuthorStats::total_engagement).sum();

        let avg_posts_per_author = ratio(total_posts as f64, unique_authors as f64);
        let avg_posts_per_day = ratio(total_posts as f64, day_span.max(0) as f64);
        let avg_engagement_per_post = ratio(total_engagement as f64, total_posts as f64);

        let score = total_posts as f64 * 0.3
            + unique_authors as f64 * 0.2
            + avg_engagement_per_post * 0.3
            + avg_posts_per_day * 0.2;

        Self {
            total_posts,
            unique_authors,
            avg_posts_per_author,
            avg_posts_per_day,
            total_engagement,
            avg_engagement_per_post,
            score,
        }
    }

    #[must_use]
    pub fn health(&self) -> EngagementHealth {
        EngagementHealth::from_rate(self.avg_engagement_per_post)
    }
}

/// Coarse label for average interactions per post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementHealth {
    High,
    Moderate,
    Low,
}

impl EngagementHealth {
    #[must_use]
    pub fn from_rate(per_post: f64) -> Self {
        if per_post > 5.0 {
            Self::High
        } else if per_post > 2.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for EngagementHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Moderate => write!(f, "moderate"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Score used to rank authors in the comparison table.
///
/// Follower count is scaled down so a large audience alone does not
/// outrank sustained activity.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn author_score(stats: &AuthorStats) -> f64 {
    stats.post_count as f64 * 0.3
        + stats.total_engagement() as f64 * 0.3
        + stats.engagement_per_post() * 0.2
        + stats.profile.follower_count as f64 * 0.0002
}

/// Takes the first `limit` authors in activity order and re-sorts them by
/// [`author_score`], highest first. Equal scores keep activity order.
#[must_use]
pub fn rank_by_score(stats: &[AuthorStats], limit: usize) -> Vec<(&AuthorStats, f64)> {
    let mut ranked: Vec<(&AuthorStats, f64)> = stats
        .iter()
        .take(limit)
        .map(|s| (s, author_score(s)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

/// Authors with at least `min_posts` posts, by engagement per post,
/// highest first, at most `limit` of them.
#[must_use]
pub fn engagement_leaders(
    stats: &[AuthorStats],
    min_posts: u64,
    limit: usize,
) -> Vec<&AuthorStats> {
    let mut leaders: Vec<&AuthorStats> = stats
        .iter()
        .filter(|s| s.post_count >= min_posts)
        .collect();
    leaders.sort_by(|a, b| b.engagement_per_post().total_cmp(&a.engagement_per_post()));
    leaders.truncate(limit);
    leaders
}

/// Post counts per UTC calendar day, newest day first, at most `limit` days.
#[must_use]
pub fn daily_activity(posts: &[Post], limit: usize) -> Vec<(NaiveDate, usize)> {
    let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for post in posts {
        *by_day.entry(post.timestamp.date_naive()).or_insert(0) += 1;
    }
    by_day.into_iter().rev().take(limit).collect()
}

/// How many authors make up the most active tenth (rounded up), and the
/// percentage of all posts they wrote.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn top_decile_share(stats: &[AuthorStats], total_posts: usize) -> (usize, f64) {
    let decile = stats.len().div_ceil(10);
    let posts: u64 = stats.iter().take(decile).map(|s| s.post_count).sum();
    (decile, percent(posts as f64, total_posts as f64))
}

/// `part / whole * 100`, or `0.0` for an empty whole.
#[must_use]
pub fn percent(part: f64, whole: f64) -> f64 {
    ratio(part, whole) * 100.0
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
