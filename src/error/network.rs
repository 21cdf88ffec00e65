//! Transport failures while talking to the feed backend.

use std::fmt;
use std::time::Duration;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Connection to the feed backend failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out. `after` is the client's deadline when known.
    Timeout {
        operation: String,
        after: Option<Duration>,
    },

    /// Non-2xx response.
    HttpStatus { status: u16, message: String },

    /// Rate limited by the backend.
    RateLimited { retry_after_secs: Option<u64> },

    /// Request was cancelled before completing.
    Cancelled,

    /// Anything else the transport reported.
    Other { message: String },
}

impl NetworkError {
    /// True for 5xx responses.
    pub fn is_server_side(&self) -> bool {
        matches!(self, NetworkError::HttpStatus { status, .. } if *status >= 500)
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Couldn't reach the server. Check your internet connection.".to_string()
            }
            NetworkError::Timeout { after, .. } => match after {
                Some(after) => format!(
                    "The feed took longer than {} to respond. Pull to try again.",
                    describe_duration(*after)
                ),
                None => "The feed took too long to respond. Pull to try again.".to_string(),
            },
            NetworkError::HttpStatus { status, .. } => match *status {
                401 => "Your session has expired. Please sign in again.".to_string(),
                403 => "You don't have permission to view this feed.".to_string(),
                404 => "This feed is no longer available.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => "The server is having trouble. Please try again later.".to_string(),
                _ => format!("The server returned an error (HTTP {}).", status),
            },
            NetworkError::RateLimited { retry_after_secs } => match retry_after_secs {
                Some(secs) => format!(
                    "Too many requests. Please wait {} seconds before trying again.",
                    secs
                ),
                None => "Too many requests. Please wait a moment and try again.".to_string(),
            },
            NetworkError::Cancelled => "The request was cancelled.".to_string(),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::RateLimited { .. } => "E_NET_RATE",
            NetworkError::Cancelled => "E_NET_CANCEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation, after } => match after {
                Some(after) => write!(f, "{} timed out after {:?}", operation, after),
                None => write!(f, "{} timed out", operation),
            },
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::RateLimited { retry_after_secs } => match retry_after_secs {
                Some(secs) => write!(f, "Rate limited, retry after {} seconds", secs),
                None => write!(f, "Rate limited"),
            },
            NetworkError::Cancelled => write!(f, "Request cancelled"),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

fn describe_duration(duration: Duration) -> String {
    if duration.subsec_millis() == 0 && duration.as_secs() > 0 {
        match duration.as_secs() {
            1 => "1 second".to_string(),
            secs => format!("{} seconds", secs),
        }
    } else {
        format!("{} ms", duration.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed_message() {
        let err = NetworkError::ConnectionFailed {
            url: "https://feed.test".to_string(),
            message: "Connection refused".to_string(),
        };
        assert_eq!(err.error_code(), "E_NET_CONN");
        assert!(err.user_message().contains("internet connection"));
    }

    #[test]
    fn test_timeout_reports_deadline() {
        let err = NetworkError::Timeout {
            operation: "feed request".to_string(),
            after: Some(Duration::from_secs(12)),
        };
        assert!(err.user_message().contains("12 seconds"));
        assert_eq!(err.to_string(), "feed request timed out after 12s");

        let err = NetworkError::Timeout {
            operation: "feed request".to_string(),
            after: Some(Duration::from_millis(250)),
        };
        assert!(err.user_message().contains("250 ms"));

        let err = NetworkError::Timeout {
            operation: "feed request".to_string(),
            after: None,
        };
        assert!(err.user_message().contains("too long"));
        assert_eq!(err.to_string(), "feed request timed out");
    }

    #[test]
    fn test_is_server_side() {
        let err = NetworkError::HttpStatus {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert!(err.is_server_side());
        assert!(!NetworkError::Cancelled.is_server_side());
    }

    #[test]
    fn test_user_message_http_status() {
        let err = NetworkError::HttpStatus {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(err.user_message().contains("sign in"));

        let err = NetworkError::HttpStatus {
            status: 418,
            message: "teapot".to_string(),
        };
        assert!(err.user_message().contains("HTTP 418"));
    }

    #[test]
    fn test_user_message_rate_limited() {
        let err = NetworkError::RateLimited {
            retry_after_secs: Some(60),
        };
        assert!(err.user_message().contains("60 seconds"));
    }

    #[test]
    fn test_display_format() {
        let err = NetworkError::ConnectionFailed {
            url: "https://api.feed.test".to_string(),
            message: "refused".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("api.feed.test"));
        assert!(display.contains("refused"));
    }
}
