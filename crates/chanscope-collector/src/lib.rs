//! Date-bounded channel feed collection for chanscope.
//!
//! [`Collector`] pages newest-first through a [`FeedSource`] until the
//! window's lower bound is crossed, the source runs dry, the request cap is
//! hit, or a fetch fails. Failures never escape `collect`: the caller gets
//! whatever was gathered plus the [`StopReason`].

pub mod client;
pub mod collector;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod source;
pub mod types;

pub use client::NeynarClient;
pub use collector::{Collection, Collector, CollectorSettings};
pub use error::CollectorError;
pub use normalize::normalize_cast;
pub use pagination::StopReason;
pub use source::{FeedPage, FeedSource};
pub use types::{NeynarCast, NeynarFeedResponse};
