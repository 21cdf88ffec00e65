//! Feed activity status published by the store.

use std::fmt;

use crate::error::FeedError;

/// What the feed store is currently doing.
///
/// Exactly one value is active at a time. Toggle operations never change it.
///
/// ```text
/// Idle ──► Loading ────┬──► Loaded
///   │                  └──► Failed
///   └──► Refreshing ───┬──► Loaded
///  Loaded ──┘          └──► Failed
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FeedStatus {
    #[default]
    Idle,
    Loading,
    Refreshing,
    /// Ids of the full post list after the load, in feed order.
    Loaded(Vec<String>),
    Failed(FeedError),
}

impl FeedStatus {
    /// Whether a fetch is in progress.
    pub fn is_busy(&self) -> bool {
        matches!(self, FeedStatus::Loading | FeedStatus::Refreshing)
    }

    pub fn error(&self) -> Option<&FeedError> {
        match self {
            FeedStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedStatus::Idle => "idle",
            FeedStatus::Loading => "loading",
            FeedStatus::Refreshing => "refreshing",
            FeedStatus::Loaded(_) => "loaded",
            FeedStatus::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for FeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedStatus::Loaded(ids) => write!(f, "loaded ({} posts)", ids.len()),
            FeedStatus::Failed(err) => write!(f, "failed: {}", err),
            other => f.write_str(other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(FeedStatus::default(), FeedStatus::Idle);
    }

    #[test]
    fn test_is_busy() {
        assert!(FeedStatus::Loading.is_busy());
        assert!(FeedStatus::Refreshing.is_busy());
        assert!(!FeedStatus::Idle.is_busy());
        assert!(!FeedStatus::Loaded(vec![]).is_busy());
        assert!(!FeedStatus::Failed(FeedError::NoMorePages).is_busy());
    }

    #[test]
    fn test_error_accessor() {
        let status = FeedStatus::Failed(FeedError::invalid_data("bad"));
        assert!(matches!(status.error(), Some(FeedError::InvalidData { .. })));
        assert!(FeedStatus::Loading.error().is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(FeedStatus::Idle.to_string(), "idle");
        assert_eq!(
            FeedStatus::Loaded(vec!["a".to_string(), "b".to_string()]).to_string(),
            "loaded (2 posts)"
        );
        assert!(FeedStatus::Failed(FeedError::invalid_data("bad"))
            .to_string()
            .starts_with("failed:"));
    }
}
