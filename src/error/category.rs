//! Error category classification.
//!
//! Categories drive the one decision the controller has to make about a
//! failure: whether the user sees it.

use std::fmt;

/// High-level categorization of feed errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Expected conditions (guard hit, last page reached).
    /// Only internal flags change; nothing is shown.
    Benign,

    /// Connectivity problems (connection, timeout, rate limit).
    Network,

    /// Backend returned a 5xx.
    Server,

    /// Payload could not be decoded or failed validation.
    Data,

    /// Caller referenced something that does not exist.
    Client,
}

impl ErrorCategory {
    /// Whether errors in this category end up in `error_text`.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, ErrorCategory::Benign)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Benign => "benign",
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Data => "data",
            ErrorCategory::Client => "client",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
