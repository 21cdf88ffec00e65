//! Error handling for the feed engine.
//!
//! - **Error Categories**: classification used to decide what the user sees
//! - **Feed Errors**: the typed failure every store/controller operation returns
//! - **Network Errors**: transport failures from the data source
//!
//! # Error Categories
//!
//! | Category | Kinds | Shown to user |
//! |----------|-------|---------------|
//! | Benign | AlreadyLoading, NoMorePages | No |
//! | Network | connection, timeout, rate limit | Yes |
//! | Server | HTTP 5xx | Yes |
//! | Data | InvalidData | Yes |
//! | Client | PostNotFound | Yes |

mod category;
mod feed_error;
mod network;

pub use category::ErrorCategory;
pub use feed_error::FeedError;
pub use network::NetworkError;

/// Type alias for Results using FeedError.
pub type FeedResult<T> = Result<T, FeedError>;
