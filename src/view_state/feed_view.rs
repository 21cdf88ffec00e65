//! Presentation snapshot of the feed
//!
//! Owned and mutated by [`FeedController`](crate::controller::FeedController);
//! presentation code only reads it, apart from the optimistic toggle helpers.

use std::collections::HashSet;

use crate::models::Post;

/// Everything a feed screen needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedViewState {
    /// Posts in feed order, unique by id
    pub posts: Vec<Post>,
    /// A first-page load or load-more is running
    pub is_loading: bool,
    /// A pull-to-refresh is running
    pub is_refreshing: bool,
    /// Whether another page may exist
    pub has_more_pages: bool,
    /// Current user-facing error, if any
    pub error_text: Option<String>,
    /// Last successfully loaded page (0-based)
    pub current_page: usize,
}

impl Default for FeedViewState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            is_loading: false,
            is_refreshing: false,
            has_more_pages: true,
            error_text: None,
            current_page: 0,
        }
    }
}

impl FeedViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts_count(&self) -> usize {
        self.posts.len()
    }

    /// Loading with posts already on screen (footer spinner).
    pub fn is_loading_more(&self) -> bool {
        self.is_loading && !self.posts.is_empty()
    }

    /// Loading with nothing on screen yet (full-screen spinner).
    pub fn is_initial_loading(&self) -> bool {
        self.is_loading && self.posts.is_empty()
    }

    pub fn can_load_more(&self) -> bool {
        self.has_more_pages && !self.is_loading
    }

    pub fn should_show_error(&self) -> bool {
        self.error_text.is_some()
    }

    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    /// Append posts whose ids are not on screen yet. Returns how many were added.
    pub fn append_unique(&mut self, posts: Vec<Post>) -> usize {
        let mut seen: HashSet<String> = self.posts.iter().map(|p| p.id.clone()).collect();
        let before = self.posts.len();
        self.posts
            .extend(posts.into_iter().filter(|p| seen.insert(p.id.clone())));
        self.posts.len() - before
    }

    /// Optimistically flip the like on a post ahead of the store's update.
    ///
    /// Uses the same transition as the store, so when the authoritative
    /// list arrives the values agree.
    pub fn apply_like_toggle(&mut self, post_id: &str) -> Option<&Post> {
        self.replace_post(post_id, Post::with_like_toggled)
    }

    /// Optimistically flip the retweet on a post.
    pub fn apply_retweet_toggle(&mut self, post_id: &str) -> Option<&Post> {
        self.replace_post(post_id, Post::with_retweet_toggled)
    }

    fn replace_post(&mut self, post_id: &str, update: fn(&Post) -> Post) -> Option<&Post> {
        let index = self.posts.iter().position(|p| p.id == post_id)?;
        self.posts[index] = update(&self.posts[index]);
        Some(&self.posts[index])
    }
}
