//! Neynar API response types for the channel feed endpoint.
//!
//! ## Observed shape
//!
//! `GET /v2/farcaster/feed?feed_type=filter&filter_type=channel_id` returns
//! `{ "casts": [...], "next": { "cursor": "..." } }`. On the last page `next`
//! is either absent or carries `"cursor": null`.
//!
//! Engagement counters live in two nested objects: `reactions.likes_count` /
//! `reactions.recasts_count` and `replies.count`. Either object may be
//! missing on casts from older clients, and counters are sometimes sent as
//! `null`, so every counter is optional here and defaults to zero during
//! normalization.
//!
//! Profile pictures appear as a flat `pfp_url` in v2 responses and as a nested
//! `pfp.url` in some SDK-shaped payloads. Both are accepted.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Top-level response from the channel feed endpoint.
#[derive(Debug, Deserialize)]
pub struct NeynarFeedResponse {
    #[serde(default)]
    pub casts: Vec<NeynarCast>,

    #[serde(default)]
    pub next: Option<NextPage>,
}

impl NeynarFeedResponse {
    /// Cursor for the following page, if the feed says there is one.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.next
            .as_ref()
            .and_then(|n| n.cursor.as_deref())
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct NextPage {
    #[serde(default)]
    pub cursor: Option<String>,
}

/// A single cast in the feed.
#[derive(Debug, Deserialize)]
pub struct NeynarCast {
    /// Cast hash, e.g. `"0x71d5225f77e0164388b1d4c120825f3a2c1f131c"`.
    pub hash: String,

    #[serde(default)]
    pub text: Option<String>,

    /// RFC 3339 creation time, e.g. `"2025-05-20T14:03:11.000Z"`.
    pub timestamp: DateTime<Utc>,

    pub author: NeynarAuthor,

    #[serde(default)]
    pub reactions: Option<NeynarReactions>,

    #[serde(default)]
    pub replies: Option<NeynarReplies>,
}

/// Author profile embedded in each cast.
#[derive(Debug, Deserialize)]
pub struct NeynarAuthor {
    pub fid: u64,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default, alias = "displayName")]
    pub display_name: Option<String>,

    #[serde(default)]
    pub pfp_url: Option<String>,

    #[serde(default)]
    pub pfp: Option<NeynarPfp>,

    #[serde(default)]
    pub follower_count: Option<u64>,

    #[serde(default)]
    pub following_count: Option<u64>,

    /// Verified Ethereum addresses.
    #[serde(default)]
    pub verifications: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct NeynarPfp {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NeynarReactions {
    #[serde(default)]
    pub likes_count: Option<u64>,

    #[serde(default)]
    pub recasts_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NeynarReplies {
    #[serde(default)]
    pub count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cursor_present() {
        let resp: NeynarFeedResponse =
            serde_json::from_str(r#"{"casts": [], "next": {"cursor": "abc"}}"#).unwrap();
        assert_eq!(resp.next_cursor(), Some("abc"));
    }

    #[test]
    fn next_cursor_null_is_none() {
        let resp: NeynarFeedResponse =
            serde_json::from_str(r#"{"casts": [], "next": {"cursor": null}}"#).unwrap();
        assert!(resp.next_cursor().is_none());
    }

    #[test]
    fn next_cursor_empty_string_is_none() {
        let resp: NeynarFeedResponse =
            serde_json::from_str(r#"{"casts": [], "next": {"cursor": ""}}"#).unwrap();
        assert!(resp.next_cursor().is_none());
    }

    #[test]
    fn missing_next_and_casts_default() {
        let resp: NeynarFeedResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.casts.is_empty());
        assert!(resp.next_cursor().is_none());
    }

    #[test]
    fn cast_with_minimal_fields_parses() {
        let cast: NeynarCast = serde_json::from_str(
            r#"{"hash": "0x1", "timestamp": "2025-05-20T14:03:11.000Z", "author": {"fid": 3}}"#,
        )
        .unwrap();
        assert_eq!(cast.author.fid, 3);
        assert!(cast.reactions.is_none());
        assert!(cast.text.is_none());
    }

    #[test]
    fn null_counters_and_verifications_parse() {
        let resp: NeynarFeedResponse = serde_json::from_str(
            r#"{"casts": [{
                "hash": "0x1",
                "text": null,
                "timestamp": "2025-05-20T14:03:11.000Z",
                "author": {
                    "fid": 3,
                    "username": null,
                    "follower_count": null,
                    "following_count": null,
                    "verifications": null
                },
                "reactions": {"likes_count": null, "recasts_count": null},
                "replies": {"count": null}
            }], "next": null}"#,
        )
        .unwrap();

        let cast = &resp.casts[0];
        assert!(cast.author.follower_count.is_none());
        assert!(cast.author.verifications.is_none());
        assert!(cast.reactions.as_ref().unwrap().likes_count.is_none());
        assert!(resp.next_cursor().is_none());
    }

    #[test]
    fn camel_case_display_name_is_accepted() {
        let author: NeynarAuthor =
            serde_json::from_str(r#"{"fid": 3, "displayName": "Dan"}"#).unwrap();
        assert_eq!(author.display_name.as_deref(), Some("Dan"));
    }
}
