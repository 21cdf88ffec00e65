//! Feed data source trait.
//!
//! The store never talks to a transport directly. Everything that can hand
//! back a page of posts implements [`FeedSource`]: the mock generator for
//! demos and tests, and [`HttpFeedSource`](crate::adapters::HttpFeedSource)
//! for a real backend.

use async_trait::async_trait;

use crate::error::FeedResult;
use crate::models::Post;

/// Trait for fetching pages of posts.
///
/// Implementations return at most [`PAGE_SIZE`](crate::models::PAGE_SIZE)
/// posts; fewer means the page was the last one. Failures are reported
/// as `Network` or `InvalidData`. Sources never retry.
///
/// # Example
///
/// ```ignore
/// use feedline::traits::FeedSource;
///
/// async fn first_ids<S: FeedSource>(source: &S) -> Vec<String> {
///     match source.fetch_page(0).await {
///         Ok(posts) => posts.into_iter().map(|p| p.id).collect(),
///         Err(_) => Vec::new(),
///     }
/// }
/// ```
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the zero-based `page` of the feed.
    async fn fetch_page(&self, page: usize) -> FeedResult<Vec<Post>>;
}
