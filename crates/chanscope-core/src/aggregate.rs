//! Per-author aggregation of collected posts.
//!
//! [`aggregate`] folds a flat sequence of posts into one [`AuthorStats`] per
//! distinct author, ordered by activity. The fold is a pure function of its
//! input order: the profile snapshot comes from each author's first post,
//! and authors with equal post counts keep first-seen order.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::posts::{AuthorId, AuthorProfile, Post};

/// Maximum number of characters kept from a post's text in a blurb.
pub const BLURB_MAX_CHARS: usize = 100;

/// A short excerpt of one post kept alongside an author's totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostBlurb {
    pub id: String,
    /// Post text capped at [`BLURB_MAX_CHARS`] characters, with `...`
    /// appended when cut.
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub likes: u64,
    pub replies: u64,
    pub recasts: u64,
}

/// Engagement totals and sample posts for one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorStats {
    pub author_id: AuthorId,
    /// Profile as it appeared on the author's first post in the input.
    pub profile: AuthorProfile,
    pub post_count: u64,
    pub total_likes: u64,
    pub total_replies: u64,
    pub total_recasts: u64,
    /// One blurb per post, in input order. Never trimmed here.
    pub sample_blurbs: Vec<PostBlurb>,
}

impl AuthorStats {
    fn new(profile: AuthorProfile) -> Self {
        Self {
            author_id: profile.author_id,
            profile,
            post_count: 0,
            total_likes: 0,
            total_replies: 0,
            total_recasts: 0,
            sample_blurbs: Vec::new(),
        }
    }

    fn fold(&mut self, post: &Post) {
        self.post_count += 1;
        self.total_likes += post.like_count;
        self.total_replies += post.reply_count;
        self.total_recasts += post.recast_count;
        self.sample_blurbs.push(PostBlurb {
            id: post.id.clone(),
            text: truncate_text(&post.text, BLURB_MAX_CHARS),
            timestamp: post.timestamp,
            likes: post.like_count,
            replies: post.reply_count,
            recasts: post.recast_count,
        });
    }

    /// Likes + replies + recasts across all of the author's posts.
    #[must_use]
    pub fn total_engagement(&self) -> u64 {
        self.total_likes + self.total_replies + self.total_recasts
    }

    /// Mean engagement per post, `0.0` for an author with no posts.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn engagement_per_post(&self) -> f64 {
        if self.post_count == 0 {
            0.0
        } else {
            self.total_engagement() as f64 / self.post_count as f64
        }
    }

    /// The `n` newest blurbs, newest first.
    #[must_use]
    pub fn recent_blurbs(&self, n: usize) -> Vec<&PostBlurb> {
        let mut blurbs: Vec<&PostBlurb> = self.sample_blurbs.iter().collect();
        blurbs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        blurbs.truncate(n);
        blurbs
    }
}

/// Groups `posts` by author and returns the per-author stats sorted by
/// `post_count` descending.
///
/// The sort is stable, so authors with the same number of posts appear in the
/// order their first post appeared in `posts`. Missing counters on a post are
/// already zero by the time it reaches this function; nothing here can fail.
#[must_use]
pub fn aggregate(posts: &[Post]) -> Vec<AuthorStats> {
    let mut index: HashMap<AuthorId, usize> = HashMap::new();
    let mut stats: Vec<AuthorStats> = Vec::new();

    for post in posts {
        let slot = *index.entry(post.author_id()).or_insert_with(|| {
            stats.push(AuthorStats::new(post.author.clone()));
            stats.len() - 1
        });
        stats[slot].fold(post);
    }

    stats.sort_by(|a, b| b.post_count.cmp(&a.post_count));
    stats
}

/// Caps `text` at `max_chars` characters, appending `...` when anything was
/// cut. Counts Unicode scalar values, so multi-byte text is never split
/// mid-character.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_owned(),
    }
}
