//! View state module: data the presentation layer renders from.
//!
//! ```text
//! ┌─────────────────┐
//! │   FeedStore     │  posts + status (watch)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ FeedController  │  applies results and notifications
//! └────────┬────────┘
//!          │ state()
//!          ▼
//! ┌─────────────────┐
//! │  FeedViewState  │  read by presentation
//! └─────────────────┘
//! ```

mod feed_view;

pub use feed_view::FeedViewState;
