//! Mock feed source for demos and tests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::generator::PostGenerator;
use crate::config::FeedConfig;
use crate::error::{FeedError, FeedResult};
use crate::models::{Post, PAGE_SIZE};
use crate::traits::FeedSource;

/// Scripted behaviour for a single page.
#[derive(Debug, Clone)]
pub enum MockPage {
    /// Generate this many posts
    Count(usize),
    /// Return exactly these posts
    Posts(Vec<Post>),
    /// Fail with this error every time the page is requested
    Error(FeedError),
}

/// Mock feed source backed by [`PostGenerator`].
///
/// Without scripting, it serves `total_posts` posts in pages of
/// [`PAGE_SIZE`]; the page containing the remainder is short and every
/// page after it is empty.
///
/// # Example
///
/// ```ignore
/// use feedline::adapters::mock::MockFeedSource;
///
/// let source = MockFeedSource::new()
///     .with_page_count(0, 20)
///     .with_page_count(1, 5);
///
/// let store = FeedStore::new(Arc::new(source.clone()));
/// store.fetch_page(0).await?;
/// assert_eq!(source.calls(), vec![0]);
/// ```
#[derive(Debug, Clone)]
pub struct MockFeedSource {
    generator: Arc<Mutex<PostGenerator>>,
    /// Scripted pages, keyed by page index
    pages: Arc<Mutex<HashMap<usize, MockPage>>>,
    /// One-shot failures consumed by the next calls, in order
    next_failures: Arc<Mutex<VecDeque<FeedError>>>,
    /// Page indices requested, in call order
    calls: Arc<Mutex<Vec<usize>>>,
    total_posts: usize,
    latency: Duration,
}

impl MockFeedSource {
    /// Instant, effectively unbounded source.
    pub fn new() -> Self {
        Self {
            generator: Arc::new(Mutex::new(PostGenerator::new())),
            pages: Arc::new(Mutex::new(HashMap::new())),
            next_failures: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            total_posts: usize::MAX,
            latency: Duration::ZERO,
        }
    }

    /// Source shaped by the mock settings of a [`FeedConfig`].
    pub fn from_config(config: &FeedConfig) -> Self {
        let source = Self::new()
            .with_total_posts(config.mock_total_posts)
            .with_latency(config.mock_latency);
        match config.mock_seed {
            Some(seed) => source.with_seed(seed),
            None => source,
        }
    }

    pub fn with_total_posts(mut self, total: usize) -> Self {
        self.total_posts = total;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        *lock(&self.generator) = PostGenerator::with_seed(seed);
        self
    }

    /// Serve `count` generated posts for `page`.
    pub fn with_page_count(self, page: usize, count: usize) -> Self {
        self.set_page(page, MockPage::Count(count));
        self
    }

    /// Script the response for a page.
    pub fn set_page(&self, page: usize, response: MockPage) {
        lock(&self.pages).insert(page, response);
    }

    /// Remove any script for a page.
    pub fn clear_page(&self, page: usize) {
        lock(&self.pages).remove(&page);
    }

    /// Fail the next call, whatever page it asks for.
    pub fn fail_next(&self, err: FeedError) {
        lock(&self.next_failures).push_back(err);
    }

    /// Page indices requested so far.
    pub fn calls(&self) -> Vec<usize> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    fn default_count(&self, page: usize) -> usize {
        let served = page.saturating_mul(PAGE_SIZE);
        self.total_posts.saturating_sub(served).min(PAGE_SIZE)
    }

    fn respond(&self, page: usize) -> FeedResult<Vec<Post>> {
        if let Some(err) = lock(&self.next_failures).pop_front() {
            return Err(err);
        }

        let scripted = lock(&self.pages).get(&page).cloned();
        let count = match scripted {
            Some(MockPage::Posts(posts)) => return Ok(posts),
            Some(MockPage::Error(err)) => return Err(err),
            Some(MockPage::Count(count)) => count,
            None => self.default_count(page),
        };

        Ok(lock(&self.generator).page(page, count))
    }
}

impl Default for MockFeedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn fetch_page(&self, page: usize) -> FeedResult<Vec<Post>> {
        lock(&self.calls).push(page);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let result = self.respond(page);
        match &result {
            Ok(posts) => tracing::debug!(page, count = posts.len(), "Mock source served page"),
            Err(err) => tracing::debug!(page, error = %err, "Mock source failed page"),
        }
        result
    }
}

// Poisoning only happens if a test panicked mid-update; the data is still usable.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
