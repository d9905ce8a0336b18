//! The upstream feed seam.

use std::future::Future;

use chanscope_core::Post;

use crate::error::CollectorError;

/// One page of a channel feed, already normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedPage {
    /// Posts in the order the feed returned them, newest first.
    pub items: Vec<Post>,
    /// Opaque continuation token; `None` on the last page.
    pub next_cursor: Option<String>,
}

/// A paginated, newest-first read API over one channel.
///
/// [`crate::NeynarClient`] is the production implementation; tests script
/// pages in memory.
pub trait FeedSource {
    /// Fetches one page of at most `page_size` posts for `channel_id`,
    /// continuing from `cursor` when given.
    fn fetch_page(
        &self,
        channel_id: &str,
        page_size: u32,
        cursor: Option<&str>,
    ) -> impl Future<Output = Result<FeedPage, CollectorError>> + Send;
}
