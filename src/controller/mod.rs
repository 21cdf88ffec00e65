//! Feed controller: adapts [`FeedStore`] into a [`FeedViewState`].
//!
//! The controller is single-owner. Store notifications (status changes,
//! new post lists) and results of spawned toggle tasks are queued and applied
//! on the owner's context, either by [`FeedController::process_pending`] or by
//! awaiting [`FeedController::next_update`] from an event loop.
//!
//! ```text
//! presentation ──commands──▶ FeedController ──▶ FeedStore ──▶ FeedSource
//!      ▲                        │    ▲               │
//!      └──────state()───────────┘    └─watch/mpsc────┘
//! ```

mod messages;

pub use messages::{FeedMessage, ToggleKind};

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::error::{FeedError, FeedResult};
use crate::models::{FeedStatus, Post, PAGE_SIZE};
use crate::store::FeedStore;
use crate::view_state::FeedViewState;

/// What woke [`FeedController::next_update`].
enum Wake {
    Status,
    Posts,
    Message(FeedMessage),
    Closed,
}

/// UI-facing adapter over a shared [`FeedStore`].
pub struct FeedController {
    store: Arc<FeedStore>,
    state: FeedViewState,
    status_rx: watch::Receiver<FeedStatus>,
    posts_rx: watch::Receiver<Arc<Vec<Post>>>,
    message_tx: mpsc::UnboundedSender<FeedMessage>,
    message_rx: mpsc::UnboundedReceiver<FeedMessage>,
}

impl FeedController {
    /// Create a controller with an empty view state, subscribed to `store`.
    pub fn new(store: Arc<FeedStore>) -> Self {
        let status_rx = store.subscribe_status();
        let posts_rx = store.subscribe_posts();
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            store,
            state: FeedViewState::new(),
            status_rx,
            posts_rx,
            message_tx,
            message_rx,
        }
    }

    pub fn state(&self) -> &FeedViewState {
        &self.state
    }

    pub fn store(&self) -> &Arc<FeedStore> {
        &self.store
    }

    // ---- notifications ----

    /// Apply every queued notification. Returns how many were applied.
    ///
    /// Status is applied before the post list, then toggle results in the
    /// order their tasks finished.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;

        if matches!(self.status_rx.has_changed(), Ok(true)) {
            let status = self.status_rx.borrow_and_update().clone();
            self.apply_status(status);
            applied += 1;
        }

        if matches!(self.posts_rx.has_changed(), Ok(true)) {
            let posts = Arc::clone(&self.posts_rx.borrow_and_update());
            self.apply_posts(&posts);
            applied += 1;
        }

        while let Ok(message) = self.message_rx.try_recv() {
            self.handle_message(message);
            applied += 1;
        }

        applied
    }

    /// Wait for the next notification, then apply it along with anything
    /// else already queued. Returns how many were applied.
    pub async fn next_update(&mut self) -> usize {
        let wake = tokio::select! {
            biased;
            Ok(()) = self.status_rx.changed() => Wake::Status,
            Ok(()) = self.posts_rx.changed() => Wake::Posts,
            Some(message) = self.message_rx.recv() => Wake::Message(message),
            else => Wake::Closed,
        };

        // `changed()` marks the value seen, so apply it here rather than
        // leaving it to `process_pending`.
        match wake {
            Wake::Status => {
                let status = self.status_rx.borrow_and_update().clone();
                self.apply_status(status);
            }
            Wake::Posts => {
                let posts = Arc::clone(&self.posts_rx.borrow_and_update());
                self.apply_posts(&posts);
            }
            Wake::Message(message) => self.handle_message(message),
            Wake::Closed => return 0,
        }
        1 + self.process_pending()
    }

    fn apply_status(&mut self, status: FeedStatus) {
        tracing::debug!(status = status.as_str(), "Applying feed status");
        match status {
            FeedStatus::Idle | FeedStatus::Loaded(_) => {
                self.state.is_loading = false;
                self.state.is_refreshing = false;
            }
            FeedStatus::Loading => self.state.is_loading = true,
            FeedStatus::Refreshing => self.state.is_refreshing = true,
            FeedStatus::Failed(err) => {
                self.state.is_loading = false;
                self.state.is_refreshing = false;
                self.record_failure(&err);
            }
        }
    }

    fn apply_posts(&mut self, posts: &[Post]) {
        self.state.posts = posts.to_vec();
    }

    fn handle_message(&mut self, message: FeedMessage) {
        match message {
            FeedMessage::ToggleCompleted { kind, post_id } => {
                tracing::debug!(kind = kind.as_str(), post_id = %post_id, "Toggle completed");
            }
            FeedMessage::ToggleFailed {
                kind,
                post_id,
                error,
            } => {
                tracing::debug!(kind = kind.as_str(), post_id = %post_id, "Toggle failed");
                self.record_failure(&error);
            }
        }
    }

    fn record_failure(&mut self, err: &FeedError) {
        if err.is_benign() {
            tracing::debug!(code = err.error_code(), "Ignoring benign feed error");
            return;
        }
        tracing::warn!(
            error = %err,
            code = err.error_code(),
            category = err.category().as_str(),
            "Feed operation failed"
        );
        self.state.error_text = Some(err.user_message());
    }

    // ---- commands ----

    /// Load the first page, replacing whatever is on screen.
    pub async fn load_initial(&mut self) {
        self.process_pending();
        if self.state.is_loading {
            tracing::debug!("Initial load skipped: already loading");
            return;
        }
        self.state.is_loading = true;
        self.state.error_text = None;

        let result = self.store.fetch_page(0).await;
        self.state.is_loading = false;
        self.apply_first_page(result);
    }

    /// Pull-to-refresh: reset pagination and reload the first page.
    pub async fn refresh(&mut self) {
        self.process_pending();
        if self.state.is_refreshing {
            tracing::debug!("Refresh skipped: already refreshing");
            return;
        }
        self.state.is_refreshing = true;
        self.state.error_text = None;

        let result = self.store.refresh().await;
        self.state.is_refreshing = false;
        self.apply_first_page(result);
    }

    fn apply_first_page(&mut self, result: FeedResult<Vec<Post>>) {
        match result {
            Ok(posts) => {
                self.state.has_more_pages = self.store.has_more_pages();
                self.state.current_page = 0;
                self.state.posts = posts;
            }
            Err(err) => self.record_failure(&err),
        }
    }

    /// Append the next page when one may exist and nothing is loading.
    ///
    /// On `NoMorePages` the view takes the store's `has_more_pages`: false
    /// when the feed ended, unchanged when the store was busy with another fetch.
    pub async fn load_more(&mut self) {
        self.process_pending();
        if !self.state.can_load_more() {
            tracing::debug!(
                has_more_pages = self.state.has_more_pages,
                is_loading = self.state.is_loading,
                "Load more skipped"
            );
            return;
        }
        self.state.is_loading = true;
        self.state.error_text = None;

        let result = self.store.load_more().await;
        self.state.is_loading = false;
        match result {
            Ok(posts) => {
                let added = self.state.append_unique(posts);
                self.state.current_page += 1;
                self.state.has_more_pages = self.store.has_more_pages();
                tracing::debug!(
                    added,
                    current_page = self.state.current_page,
                    "Next page appended"
                );
            }
            Err(FeedError::NoMorePages) => {
                // The store also answers NoMorePages while another fetch is
                // running; only its own flag says whether the feed ended.
                self.state.has_more_pages = self.store.has_more_pages();
                tracing::debug!(
                    has_more_pages = self.state.has_more_pages,
                    "Load more rejected: no more pages"
                );
            }
            Err(FeedError::AlreadyLoading) => {
                tracing::debug!("Load more rejected: already loading");
            }
            Err(err) => self.record_failure(&err),
        }
    }

    /// Flip the like on `post_id` in the background.
    ///
    /// Nothing changes locally; the store's post list carries the update.
    /// A failure comes back as a [`FeedMessage`] and sets `error_text` once
    /// processed.
    pub fn toggle_like(&mut self, post_id: impl Into<String>) -> JoinHandle<FeedResult<Post>> {
        self.spawn_toggle(ToggleKind::Like, post_id.into())
    }

    /// Flip the retweet on `post_id` in the background.
    pub fn toggle_retweet(&mut self, post_id: impl Into<String>) -> JoinHandle<FeedResult<Post>> {
        self.spawn_toggle(ToggleKind::Retweet, post_id.into())
    }

    fn spawn_toggle(&mut self, kind: ToggleKind, post_id: String) -> JoinHandle<FeedResult<Post>> {
        self.process_pending();
        let store = Arc::clone(&self.store);
        let message_tx = self.message_tx.clone();

        tokio::spawn(async move {
            let result = match kind {
                ToggleKind::Like => store.toggle_like(&post_id).await,
                ToggleKind::Retweet => store.toggle_retweet(&post_id).await,
            };
            let message = match &result {
                Ok(_) => FeedMessage::ToggleCompleted { kind, post_id },
                Err(err) => FeedMessage::ToggleFailed {
                    kind,
                    post_id,
                    error: err.clone(),
                },
            };
            // The controller may already be gone; its state went with it.
            let _ = message_tx.send(message);
            result
        })
    }

    /// Dismiss the current error.
    pub fn clear_error(&mut self) {
        self.process_pending();
        self.state.error_text = None;
    }

    // ---- derived ----

    pub fn posts(&self) -> &[Post] {
        &self.state.posts
    }

    pub fn posts_count(&self) -> usize {
        self.state.posts_count()
    }

    pub fn is_loading_more(&self) -> bool {
        self.state.is_loading_more()
    }

    pub fn is_initial_loading(&self) -> bool {
        self.state.is_initial_loading()
    }

    pub fn can_load_more(&self) -> bool {
        self.state.can_load_more()
    }

    pub fn should_show_error(&self) -> bool {
        self.state.should_show_error()
    }

    pub fn error_text(&self) -> Option<&str> {
        self.state.error_text.as_deref()
    }

    /// Page size the store requests; exposed for scroll thresholds.
    pub fn page_size(&self) -> usize {
        PAGE_SIZE
    }
}

impl std::fmt::Debug for FeedController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedController")
            .field("posts", &self.state.posts.len())
            .field("is_loading", &self.state.is_loading)
            .field("is_refreshing", &self.state.is_refreshing)
            .field("has_more_pages", &self.state.has_more_pages)
            .field("error_text", &self.state.error_text)
            .field("current_page", &self.state.current_page)
            .finish_non_exhaustive()
    }
}
