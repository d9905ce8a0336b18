//! Normalization from raw Neynar casts to [`chanscope_core::Post`].

use chanscope_core::{AuthorProfile, Post};

use crate::types::{NeynarAuthor, NeynarCast};

/// Converts a raw [`NeynarCast`] into a [`Post`].
///
/// Missing or `null` counters become zero, a missing display name becomes
/// empty, and the avatar URL prefers the flat `pfp_url` over the nested
/// `pfp.url`.
#[must_use]
pub fn normalize_cast(cast: NeynarCast) -> Post {
    let (like_count, recast_count) = cast.reactions.map_or((0, 0), |r| {
        (
            r.likes_count.unwrap_or_default(),
            r.recasts_count.unwrap_or_default(),
        )
    });
    let reply_count = cast.replies.and_then(|r| r.count).unwrap_or_default();

    Post {
        id: cast.hash,
        author: normalize_author(cast.author),
        timestamp: cast.timestamp,
        text: cast.text.unwrap_or_default(),
        like_count,
        reply_count,
        recast_count,
    }
}

fn normalize_author(author: NeynarAuthor) -> AuthorProfile {
    // Treat empty strings as absent.
    let avatar_url = author
        .pfp_url
        .or_else(|| author.pfp.and_then(|p| p.url))
        .filter(|u| !u.is_empty());

    AuthorProfile {
        author_id: author.fid,
        username: author.username.unwrap_or_default(),
        display_name: author.display_name.unwrap_or_default(),
        avatar_url,
        follower_count: author.follower_count.unwrap_or_default(),
        following_count: author.following_count.unwrap_or_default(),
        verified_addresses: author.verifications.unwrap_or_default(),
    }
}
