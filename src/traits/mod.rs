//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`FeedSource`] - Paged post retrieval consumed by the feed store
//! - [`HttpClient`] - HTTP GET used by the HTTP-backed feed source

pub mod http;
pub mod source;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use source::FeedSource;
