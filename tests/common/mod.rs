//! Common test utilities for integration tests.
//!
//! Provides fixture posts and builders that wire a [`MockFeedSource`] into a
//! store and controller with zero toggle latency.
//!
//! # Example
//!
//! ```ignore
//! use common::TestFeed;
//!
//! let feed = TestFeed::new();
//! let mut controller = feed.controller();
//! controller.load_initial().await;
//! ```

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use feedline::adapters::mock::MockFeedSource;
use feedline::controller::FeedController;
use feedline::models::{Post, PostContent, User};
use feedline::store::FeedStore;

/// Creates a test author.
pub fn test_user() -> User {
    User {
        id: "user-1".to_string(),
        handle: "tester".to_string(),
        display_name: "Test User".to_string(),
        avatar_url: None,
        verified: false,
    }
}

/// Creates a text post with the given id and engagement.
pub fn test_post(id: &str, like_count: u32, liked: bool) -> Post {
    let mut post = Post::new(id, test_user(), PostContent::text(format!("post {}", id)));
    post.like_count = like_count;
    post.liked_by_viewer = liked;
    post
}

/// Creates `count` posts with ids `{prefix}-0..count`.
pub fn test_posts(prefix: &str, count: usize) -> Vec<Post> {
    (0..count)
        .map(|i| test_post(&format!("{}-{}", prefix, i), i as u32, false))
        .collect()
}

/// A mock source and the store built over it.
pub struct TestFeed {
    pub source: MockFeedSource,
    pub store: Arc<FeedStore>,
}

impl TestFeed {
    /// Unbounded seeded feed, no latency anywhere.
    pub fn new() -> Self {
        Self::over(MockFeedSource::new().with_seed(7))
    }

    /// Feed whose source waits `latency` per page.
    pub fn slow(latency: Duration) -> Self {
        Self::over(MockFeedSource::new().with_seed(7).with_latency(latency))
    }

    pub fn over(source: MockFeedSource) -> Self {
        let store = FeedStore::new(Arc::new(source.clone())).with_toggle_latency(Duration::ZERO);
        Self {
            source,
            store: Arc::new(store),
        }
    }

    pub fn controller(&self) -> FeedController {
        FeedController::new(Arc::clone(&self.store))
    }
}
