use chanscope_core::{AuthorProfile, Post};
use chrono::{DateTime, Utc};

use crate::ReportMetadata;

pub(crate) fn ts(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid RFC 3339 timestamp")
}

pub(crate) fn profile(author_id: u64, name: &str, followers: u64) -> AuthorProfile {
    AuthorProfile {
        author_id,
        username: name.to_lowercase(),
        display_name: name.to_string(),
        avatar_url: None,
        follower_count: followers,
        following_count: 5,
        verified_addresses: Vec::new(),
    }
}

/// A post with the given engagement split as `(likes, replies, recasts)`.
pub(crate) fn post(
    id: &str,
    author: &AuthorProfile,
    timestamp: &str,
    (likes, replies, recasts): (u64, u64, u64),
) -> Post {
    Post {
        id: id.to_string(),
        author: author.clone(),
        timestamp: ts(timestamp),
        text: format!("text of {id}"),
        like_count: likes,
        reply_count: replies,
        recast_count: recasts,
    }
}

pub(crate) fn metadata(day_span: i64) -> ReportMetadata {
    ReportMetadata {
        channel_id: "celo".to_string(),
        start: ts("2025-05-01T00:00:00Z"),
        end: ts("2025-05-31T23:59:59Z"),
        day_span,
        generated_at: ts("2025-06-01T08:00:00Z"),
        request_count: 3,
        stop_reason: "reached posts older than window start".to_string(),
        complete: true,
        duplicates_removed: 0,
    }
}

/// Alice: 3 posts, 30 engagement. Bob: 1 post, 6 engagement.
pub(crate) fn sample_posts() -> Vec<Post> {
    let alice = profile(1, "Alice", 1_000);
    let bob = profile(2, "Bob", 50_000);
    vec![
        post("a1", &alice, "2025-05-20T10:00:00Z", (5, 3, 2)),
        post("b1", &bob, "2025-05-19T09:00:00Z", (4, 1, 1)),
        post("a2", &alice, "2025-05-19T08:00:00Z", (6, 2, 2)),
        post("a3", &alice, "2025-05-02T12:00:00Z", (4, 4, 2)),
    ]
}
