//! Feed store: the single source of truth for fetched posts.
//!
//! The store owns the canonical post list, mediates every call to the
//! [`FeedSource`], and publishes two watch streams:
//!
//! - the current post list (`Arc<Vec<Post>>`, a new `Arc` per change)
//! - the current [`FeedStatus`]
//!
//! State lives behind a `std::sync::Mutex` that is never held across an
//! await. Each operation mutates and publishes inside one critical
//! section, so subscribers never observe a list that the store has
//! already moved past.
//!
//! ## Fetch lifecycle
//!
//! ```text
//! fetch_page / refresh / load_more
//!     │ claim single-flight slot (AlreadyLoading / NoMorePages if taken)
//!     │ publish Loading or Refreshing
//!     ▼
//! FeedSource::fetch_page(page).await
//!     │
//!     ├─ Ok  → replace (page 0) or append, release slot,
//!     │        publish posts, publish Loaded(ids)
//!     └─ Err → release slot, publish Failed(err)
//! ```

mod guard;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;

use crate::config::FeedConfig;
use crate::error::{FeedError, FeedResult};
use crate::models::{FeedStatus, Post, PAGE_SIZE};
use crate::traits::FeedSource;

use guard::FetchGuard;

/// Mutable state behind the store's lock.
#[derive(Debug)]
pub(crate) struct StoreState {
    posts: Arc<Vec<Post>>,
    current_page: usize,
    has_more_pages: bool,
    fetch_in_flight: bool,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            posts: Arc::new(Vec::new()),
            current_page: 0,
            has_more_pages: true,
            fetch_in_flight: false,
        }
    }
}

/// Owns the feed's posts and fetch activity.
///
/// Share it behind an `Arc`; every operation takes `&self`.
///
/// # Example
///
/// ```ignore
/// use feedline::adapters::MockFeedSource;
/// use feedline::store::FeedStore;
///
/// let store = FeedStore::new(Arc::new(MockFeedSource::new()));
/// let mut status = store.subscribe_status();
///
/// store.fetch_page(0).await?;
/// assert!(matches!(*status.borrow_and_update(), FeedStatus::Loaded(_)));
/// ```
pub struct FeedStore {
    source: Arc<dyn FeedSource>,
    state: Mutex<StoreState>,
    posts_tx: watch::Sender<Arc<Vec<Post>>>,
    status_tx: watch::Sender<FeedStatus>,
    toggle_latency: Duration,
}

impl FeedStore {
    /// Create an empty store over `source` with default latencies.
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self::with_config(source, &FeedConfig::default())
    }

    pub fn with_config(source: Arc<dyn FeedSource>, config: &FeedConfig) -> Self {
        let state = StoreState::default();
        let (posts_tx, _) = watch::channel(Arc::clone(&state.posts));
        let (status_tx, _) = watch::channel(FeedStatus::Idle);
        Self {
            source,
            state: Mutex::new(state),
            posts_tx,
            status_tx,
            toggle_latency: config.toggle_latency,
        }
    }

    /// Override the simulated like/retweet round trip.
    pub fn with_toggle_latency(mut self, latency: Duration) -> Self {
        self.toggle_latency = latency;
        self
    }

    // ---- streams and snapshots ----

    /// Subscribe to the post list. The receiver starts at the current list.
    pub fn subscribe_posts(&self) -> watch::Receiver<Arc<Vec<Post>>> {
        self.posts_tx.subscribe()
    }

    /// Subscribe to status transitions. The receiver starts at the current status.
    pub fn subscribe_status(&self) -> watch::Receiver<FeedStatus> {
        self.status_tx.subscribe()
    }

    /// Current post list snapshot.
    pub fn posts(&self) -> Arc<Vec<Post>> {
        Arc::clone(&lock(&self.state).posts)
    }

    pub fn post(&self, post_id: &str) -> Option<Post> {
        lock(&self.state)
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .cloned()
    }

    pub fn status(&self) -> FeedStatus {
        self.status_tx.borrow().clone()
    }

    /// Index of the last successfully loaded page.
    pub fn current_page(&self) -> usize {
        lock(&self.state).current_page
    }

    pub fn has_more_pages(&self) -> bool {
        lock(&self.state).has_more_pages
    }

    pub fn is_fetch_in_flight(&self) -> bool {
        lock(&self.state).fetch_in_flight
    }

    // ---- fetch operations ----

    /// Fetch `page`. Page 0 replaces the list; any other page appends.
    ///
    /// Returns the posts the page contributed.
    pub async fn fetch_page(&self, page: usize) -> FeedResult<Vec<Post>> {
        let guard = FetchGuard::acquire(&self.state).map_err(|err| {
            tracing::debug!(page, "Fetch rejected: already in flight");
            err
        })?;
        self.publish_status(FeedStatus::Loading);
        self.run_fetch(page, guard).await
    }

    /// Reset pagination and reload page 0.
    pub async fn refresh(&self) -> FeedResult<Vec<Post>> {
        let guard = {
            let mut state = lock(&self.state);
            let guard = FetchGuard::claim_locked(&self.state, &mut state).map_err(|err| {
                tracing::debug!("Refresh rejected: fetch already in flight");
                err
            })?;
            state.current_page = 0;
            state.has_more_pages = true;
            guard
        };
        self.publish_status(FeedStatus::Refreshing);
        self.run_fetch(0, guard).await
    }

    /// Fetch the page after the last loaded one.
    ///
    /// Fails with `NoMorePages` when the last page was short or a fetch is
    /// already running.
    pub async fn load_more(&self) -> FeedResult<Vec<Post>> {
        let (guard, next_page) = {
            let mut state = lock(&self.state);
            if !state.has_more_pages || state.fetch_in_flight {
                tracing::debug!(
                    has_more_pages = state.has_more_pages,
                    fetch_in_flight = state.fetch_in_flight,
                    "Load more rejected"
                );
                return Err(FeedError::NoMorePages);
            }
            let next_page = state.current_page + 1;
            let guard = FetchGuard::claim_locked(&self.state, &mut state)?;
            (guard, next_page)
        };
        self.publish_status(FeedStatus::Loading);
        self.run_fetch(next_page, guard).await
    }

    async fn run_fetch(&self, page: usize, guard: FetchGuard<'_>) -> FeedResult<Vec<Post>> {
        let result = self.source.fetch_page(page).await;

        let mut state = lock(&self.state);
        guard.release_locked(&mut state);

        let fetched = match result {
            Ok(posts) => posts,
            Err(err) => {
                tracing::warn!(page, error = %err, code = err.error_code(), "Feed fetch failed");
                self.publish_status(FeedStatus::Failed(err.clone()));
                return Err(err);
            }
        };

        let returned = fetched.len();
        let added = if page == 0 {
            let added = unique_by_id(fetched, &HashSet::new());
            state.posts = Arc::new(added.clone());
            added
        } else {
            let existing: HashSet<&str> = state.posts.iter().map(|p| p.id.as_str()).collect();
            let added = unique_by_id(fetched, &existing);
            let mut combined = Vec::with_capacity(state.posts.len() + added.len());
            combined.extend(state.posts.iter().cloned());
            combined.extend(added.iter().cloned());
            state.posts = Arc::new(combined);
            added
        };
        state.current_page = page;
        state.has_more_pages = returned >= PAGE_SIZE;

        tracing::info!(
            page,
            returned,
            added = added.len(),
            total = state.posts.len(),
            has_more_pages = state.has_more_pages,
            "Feed page loaded"
        );

        let ids = state.posts.iter().map(|p| p.id.clone()).collect();
        self.posts_tx.send_replace(Arc::clone(&state.posts));
        self.publish_status(FeedStatus::Loaded(ids));

        Ok(added)
    }

    // ---- optimistic toggles ----

    /// Flip the viewer's like on `post_id`.
    ///
    /// The list change is published before the simulated round trip; the
    /// returned post is the updated value.
    pub async fn toggle_like(&self, post_id: &str) -> FeedResult<Post> {
        let updated = self.replace_post(post_id, Post::with_like_toggled)?;
        tracing::debug!(
            post_id = %post_id,
            liked = updated.liked_by_viewer,
            like_count = updated.like_count,
            "Like toggled"
        );
        self.round_trip().await;
        Ok(updated)
    }

    /// Flip the viewer's retweet on `post_id`.
    pub async fn toggle_retweet(&self, post_id: &str) -> FeedResult<Post> {
        let updated = self.replace_post(post_id, Post::with_retweet_toggled)?;
        tracing::debug!(
            post_id = %post_id,
            retweeted = updated.retweeted_by_viewer,
            retweet_count = updated.retweet_count,
            "Retweet toggled"
        );
        self.round_trip().await;
        Ok(updated)
    }

    fn replace_post<F>(&self, post_id: &str, update: F) -> FeedResult<Post>
    where
        F: FnOnce(&Post) -> Post,
    {
        let mut state = lock(&self.state);
        let index = state
            .posts
            .iter()
            .position(|p| p.id == post_id)
            .ok_or_else(|| {
                tracing::debug!(post_id = %post_id, "Toggle on unknown post");
                FeedError::post_not_found(post_id)
            })?;

        let updated = update(&state.posts[index]);
        let mut posts = state.posts.as_ref().clone();
        posts[index] = updated.clone();
        state.posts = Arc::new(posts);
        self.posts_tx.send_replace(Arc::clone(&state.posts));
        Ok(updated)
    }

    async fn round_trip(&self) {
        if !self.toggle_latency.is_zero() {
            tokio::time::sleep(self.toggle_latency).await;
        }
    }

    fn publish_status(&self, status: FeedStatus) {
        tracing::debug!(status = status.as_str(), "Feed status changed");
        self.status_tx.send_replace(status);
    }
}

impl std::fmt::Debug for FeedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("FeedStore")
            .field("posts", &state.posts.len())
            .field("current_page", &state.current_page)
            .field("has_more_pages", &state.has_more_pages)
            .field("fetch_in_flight", &state.fetch_in_flight)
            .finish_non_exhaustive()
    }
}

/// Drop posts whose id is in `existing` or repeats earlier in `posts`.
fn unique_by_id(posts: Vec<Post>, existing: &HashSet<&str>) -> Vec<Post> {
    let mut seen: HashSet<String> = HashSet::with_capacity(posts.len());
    posts
        .into_iter()
        .filter(|post| {
            let fresh = !existing.contains(post.id.as_str()) && seen.insert(post.id.clone());
            if !fresh {
                tracing::debug!(post_id = %post.id, "Skipping duplicate post");
            }
            fresh
        })
        .collect()
}

// A panic while holding the lock leaves state that is still structurally valid.
pub(crate) fn lock(state: &Mutex<StoreState>) -> MutexGuard<'_, StoreState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
