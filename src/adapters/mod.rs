//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`HttpFeedSource`] - Feed pages from a JSON HTTP endpoint
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides the generated feed source used by the
//! demo runner and test doubles:
//! - [`mock::MockFeedSource`] - Generated or scripted pages
//! - [`mock::MockHttpClient`] - Configurable HTTP responses

pub mod http_source;
pub mod mock;
pub mod reqwest_http;

pub use http_source::HttpFeedSource;
pub use mock::{MockFeedSource, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
