//! Mock implementations for demos and testing.
//!
//! # Available Mocks
//!
//! - [`MockFeedSource`] - Generated or scripted feed pages
//! - [`PostGenerator`] - Randomized posts covering every content variant
//! - [`MockHttpClient`] - HTTP client with configurable responses

pub mod generator;
pub mod http;
pub mod source;

pub use generator::PostGenerator;
pub use http::{MockHttpClient, MockResponse};
pub use source::{MockFeedSource, MockPage};
