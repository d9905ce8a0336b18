use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Farcaster ID of a post author.
pub type AuthorId = u64;

/// Author profile as embedded in each post by the upstream feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub author_id: AuthorId,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub follower_count: u64,
    pub following_count: u64,
    /// Wallet addresses the author has verified on their profile.
    pub verified_addresses: Vec<String>,
}

impl AuthorProfile {
    /// Display name when set, otherwise the username.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

/// A single cast collected from a channel feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Cast hash, e.g. `"0x5f3c..."`.
    pub id: String,
    pub author: AuthorProfile,
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub like_count: u64,
    pub reply_count: u64,
    pub recast_count: u64,
}

impl Post {
    #[must_use]
    pub fn author_id(&self) -> AuthorId {
        self.author.author_id
    }

    /// Likes + replies + recasts.
    #[must_use]
    pub fn engagement(&self) -> u64 {
        self.like_count + self.reply_count + self.recast_count
    }
}

/// Drops posts whose `id` was already seen, keeping the first occurrence.
///
/// Returns the surviving posts in input order and the number removed.
#[must_use]
pub fn dedupe_by_id(posts: Vec<Post>) -> (Vec<Post>, usize) {
    let before = posts.len();
    let mut seen = HashSet::with_capacity(before);
    let kept: Vec<Post> = posts
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}
