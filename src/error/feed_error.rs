//! The error type every feed operation returns.

use thiserror::Error;

use super::category::ErrorCategory;
use super::network::NetworkError;

/// Failure kinds for store and controller operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// A fetch is already in flight.
    #[error("a feed fetch is already in flight")]
    AlreadyLoading,

    /// Pagination reached the last page.
    #[error("no more pages to load")]
    NoMorePages,

    /// No post with this id is in the feed.
    #[error("post not found: {post_id}")]
    PostNotFound { post_id: String },

    /// Transport failure.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// Payload could not be decoded or failed validation.
    #[error("invalid feed data: {message}")]
    InvalidData { message: String },
}

impl FeedError {
    pub fn post_not_found(post_id: impl Into<String>) -> Self {
        FeedError::PostNotFound {
            post_id: post_id.into(),
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        FeedError::InvalidData {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FeedError::AlreadyLoading | FeedError::NoMorePages => ErrorCategory::Benign,
            FeedError::PostNotFound { .. } => ErrorCategory::Client,
            FeedError::Network(err) if err.is_server_side() => ErrorCategory::Server,
            FeedError::Network(_) => ErrorCategory::Network,
            FeedError::InvalidData { .. } => ErrorCategory::Data,
        }
    }

    /// Benign errors only change flags and are never shown to the user.
    pub fn is_benign(&self) -> bool {
        !self.category().is_user_visible()
    }

    /// Text suitable for the feed's error banner.
    pub fn user_message(&self) -> String {
        match self {
            FeedError::AlreadyLoading => "The feed is already loading.".to_string(),
            FeedError::NoMorePages => "You're all caught up.".to_string(),
            FeedError::PostNotFound { .. } => {
                "That post is no longer in your feed.".to_string()
            }
            FeedError::Network(err) => err.user_message(),
            FeedError::InvalidData { .. } => {
                "We received something unexpected from the server. Pull to refresh.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FeedError::AlreadyLoading => "E_FEED_BUSY",
            FeedError::NoMorePages => "E_FEED_END",
            FeedError::PostNotFound { .. } => "E_FEED_NOT_FOUND",
            FeedError::Network(err) => err.error_code(),
            FeedError::InvalidData { .. } => "E_FEED_INVALID",
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::invalid_data(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benign_kinds() {
        assert!(FeedError::AlreadyLoading.is_benign());
        assert!(FeedError::NoMorePages.is_benign());
        assert!(!FeedError::post_not_found("p1").is_benign());
        assert!(!FeedError::invalid_data("x").is_benign());
        assert!(!FeedError::Network(NetworkError::Cancelled).is_benign());
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(
            FeedError::post_not_found("p1").category(),
            ErrorCategory::Client
        );
        assert_eq!(FeedError::invalid_data("x").category(), ErrorCategory::Data);
        assert_eq!(
            FeedError::Network(NetworkError::HttpStatus {
                status: 500,
                message: String::new()
            })
            .category(),
            ErrorCategory::Server
        );
        assert_eq!(
            FeedError::Network(NetworkError::Timeout {
                operation: "fetch".to_string(),
                after: None
            })
            .category(),
            ErrorCategory::Network
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            FeedError::post_not_found("p9").to_string(),
            "post not found: p9"
        );
        assert_eq!(
            FeedError::Network(NetworkError::Cancelled).to_string(),
            "network error: Request cancelled"
        );
    }

    #[test]
    fn test_user_message_delegates_to_network() {
        let net = NetworkError::ConnectionFailed {
            url: "u".to_string(),
            message: "m".to_string(),
        };
        assert_eq!(
            FeedError::Network(net.clone()).user_message(),
            net.user_message()
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(FeedError::AlreadyLoading.error_code(), "E_FEED_BUSY");
        assert_eq!(FeedError::NoMorePages.error_code(), "E_FEED_END");
        assert_eq!(
            FeedError::Network(NetworkError::Cancelled).error_code(),
            "E_NET_CANCEL"
        );
    }

    #[test]
    fn test_from_json_error_is_invalid_data() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: FeedError = json_err.into();
        assert!(matches!(err, FeedError::InvalidData { .. }));
    }
}
