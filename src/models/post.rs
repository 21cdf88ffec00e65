use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_id, PostContent, RenderedContent};

/// Author of a post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub handle: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// A single feed entry as delivered by the backend.
///
/// Posts are treated as values: every mutation produces a new `Post`
/// that replaces the old one by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub author: User,
    pub content: PostContent,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub retweet_count: u32,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub liked_by_viewer: bool,
    #[serde(default)]
    pub retweeted_by_viewer: bool,
}

impl Post {
    /// Create a post with zero engagement.
    pub fn new(id: impl Into<String>, author: User, content: PostContent) -> Self {
        Self {
            id: id.into(),
            author,
            content,
            created_at: Utc::now(),
            like_count: 0,
            retweet_count: 0,
            comment_count: 0,
            liked_by_viewer: false,
            retweeted_by_viewer: false,
        }
    }

    /// Normalized text and media for rendering.
    pub fn rendered(&self) -> RenderedContent {
        self.content.rendered()
    }

    /// Return a copy with the viewer's like flipped and `like_count` moved by one.
    ///
    /// Every like path (store, view state, consuming surfaces) goes through
    /// this so they all land on the same count.
    pub fn with_like_toggled(&self) -> Post {
        let (liked, count) = flip(self.liked_by_viewer, self.like_count);
        Post {
            liked_by_viewer: liked,
            like_count: count,
            ..self.clone()
        }
    }

    /// Retweet counterpart of [`Post::with_like_toggled`].
    pub fn with_retweet_toggled(&self) -> Post {
        let (retweeted, count) = flip(self.retweeted_by_viewer, self.retweet_count);
        Post {
            retweeted_by_viewer: retweeted,
            retweet_count: count,
            ..self.clone()
        }
    }

    /// Check the fields the feed relies on for identity.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("post id is empty".to_string());
        }
        if self.author.id.trim().is_empty() {
            return Err(format!("post {} has an author without id", self.id));
        }
        Ok(())
    }
}

// A stale count of 0 with the flag set must not underflow.
fn flip(active: bool, count: u32) -> (bool, u32) {
    if active {
        (false, count.saturating_sub(1))
    } else {
        (true, count.saturating_add(1))
    }
}

/// Page payload returned by the feed endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedPage {
    #[serde(default)]
    pub posts: Vec<Post>,
}
