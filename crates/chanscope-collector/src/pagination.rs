//! Per-page termination logic for the collection loop.
//!
//! The feed is newest-first, so once a page reaches back past the window's
//! start every later page is older still. [`evaluate_page`] decides, for a
//! single page, which posts to keep and whether to fetch another page. The
//! loop in [`crate::collector`] owns the request cap and transport failures.

use chanscope_core::{CollectionWindow, Post};
use serde::Serialize;

use crate::source::FeedPage;

/// Why a collection run stopped paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum StopReason {
    /// The feed returned a page with no posts.
    EmptyPage,
    /// A page contained a post older than the window start.
    BoundaryReached,
    /// The feed returned posts but no cursor for a following page.
    Exhausted,
    /// The request cap was hit while more pages were expected.
    CapReached,
    /// A page fetch failed; the message is the error's display text.
    Errored(String),
}

impl StopReason {
    /// False when more in-window posts may exist upstream.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !matches!(self, Self::CapReached | Self::Errored(_))
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPage => write!(f, "empty page"),
            Self::BoundaryReached => write!(f, "reached posts older than window start"),
            Self::Exhausted => write!(f, "feed exhausted"),
            Self::CapReached => write!(f, "request cap reached"),
            Self::Errored(msg) => write!(f, "fetch failed: {msg}"),
        }
    }
}

/// What to do after a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStep {
    Continue { cursor: String },
    Stop(StopReason),
}

/// Posts kept from a page and the resulting step.
#[derive(Debug)]
pub struct PageOutcome {
    pub kept: Vec<Post>,
    pub step: PageStep,
}

/// Filters `page` to `window` and decides whether paging should continue.
///
/// The boundary check looks at the oldest post on the whole page, not just the
/// posts that survived the filter; a page straddling the start keeps its
/// in-window posts and ends the run even if it carries a cursor.
#[must_use]
pub fn evaluate_page(page: FeedPage, window: &CollectionWindow) -> PageOutcome {
    let Some(oldest) = page.items.iter().map(|p| p.timestamp).min() else {
        return PageOutcome {
            kept: Vec::new(),
            step: PageStep::Stop(StopReason::EmptyPage),
        };
    };

    let kept: Vec<Post> = page
        .items
        .into_iter()
        .filter(|p| window.contains(p.timestamp))
        .collect();

    let step = if oldest < window.start {
        PageStep::Stop(StopReason::BoundaryReached)
    } else if let Some(cursor) = page.next_cursor {
        PageStep::Continue { cursor }
    } else {
        PageStep::Stop(StopReason::Exhausted)
    };

    PageOutcome { kept, step }
}
