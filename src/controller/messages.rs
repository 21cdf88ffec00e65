//! FeedMessage enum for results delivered back from spawned toggle tasks.

use std::fmt;

use crate::error::FeedError;

/// Which engagement flag a toggle flips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleKind {
    Like,
    Retweet,
}

impl ToggleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleKind::Like => "like",
            ToggleKind::Retweet => "retweet",
        }
    }
}

impl fmt::Display for ToggleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Messages received from spawned controller tasks
#[derive(Debug, Clone, PartialEq)]
pub enum FeedMessage {
    /// The store accepted the toggle and the round trip finished
    ToggleCompleted { kind: ToggleKind, post_id: String },
    /// The store rejected the toggle
    ToggleFailed {
        kind: ToggleKind,
        post_id: String,
        error: FeedError,
    },
}

impl FeedMessage {
    pub fn post_id(&self) -> &str {
        match self {
            FeedMessage::ToggleCompleted { post_id, .. }
            | FeedMessage::ToggleFailed { post_id, .. } => post_id,
        }
    }
}
