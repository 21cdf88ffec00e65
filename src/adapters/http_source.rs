//! Feed source backed by a JSON HTTP endpoint.
//!
//! `GET {base_url}/feed?page={n}&limit=20` is expected to answer with
//! `{"posts": [...]}`.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{FeedError, FeedResult, NetworkError};
use crate::models::{FeedPage, Post, PAGE_SIZE};
use crate::traits::{FeedSource, Headers, HttpClient, HttpError, Response};

/// [`FeedSource`] that fetches pages through an [`HttpClient`].
#[derive(Clone)]
pub struct HttpFeedSource {
    client: Arc<dyn HttpClient>,
    base_url: String,
    headers: Headers,
    request_timeout: Option<Duration>,
}

impl HttpFeedSource {
    pub fn new(client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        Self {
            client,
            base_url,
            headers,
            request_timeout: None,
        }
    }

    /// Add a header sent with every page request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Deadline the client was built with, reported in timeout errors.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_url(&self, page: usize) -> String {
        format!("{}/feed?page={}&limit={}", self.base_url, page, PAGE_SIZE)
    }

    fn transport_error(&self, url: &str, err: HttpError) -> NetworkError {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(_) => NetworkError::Timeout {
                operation: "feed request".to_string(),
                after: self.request_timeout,
            },
            HttpError::ServerError { status: 429, .. } => NetworkError::RateLimited {
                retry_after_secs: None,
            },
            HttpError::ServerError { status, message } => {
                NetworkError::HttpStatus { status, message }
            }
            HttpError::Cancelled => NetworkError::Cancelled,
            HttpError::InvalidUrl(message) | HttpError::Other(message) => {
                NetworkError::Other { message }
            }
        }
    }

    fn status_error(response: &Response) -> FeedError {
        if response.status == 429 {
            let retry_after_secs = response
                .headers
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case("retry-after"))
                .and_then(|(_, value)| value.trim().parse().ok());
            return NetworkError::RateLimited { retry_after_secs }.into();
        }

        let message = response
            .text()
            .unwrap_or_default()
            .chars()
            .take(200)
            .collect();
        NetworkError::HttpStatus {
            status: response.status,
            message,
        }
        .into()
    }

    fn decode(response: &Response) -> FeedResult<Vec<Post>> {
        let page: FeedPage = response.json()?;

        let mut seen = HashSet::with_capacity(page.posts.len());
        for post in &page.posts {
            post.validate().map_err(FeedError::invalid_data)?;
            if !seen.insert(post.id.as_str()) {
                return Err(FeedError::invalid_data(format!(
                    "duplicate post id {} in page",
                    post.id
                )));
            }
        }

        Ok(page.posts)
    }
}

impl std::fmt::Debug for HttpFeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFeedSource")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_page(&self, page: usize) -> FeedResult<Vec<Post>> {
        let url = self.page_url(page);
        let response = self.client.get(&url, &self.headers).await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Feed request failed");
            FeedError::Network(self.transport_error(&url, e))
        })?;

        if !response.is_success() {
            tracing::warn!(url = %url, status = response.status, "Feed request returned error status");
            return Err(Self::status_error(&response));
        }

        let posts = Self::decode(&response).map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Feed payload rejected");
            e
        })?;
        tracing::debug!(page, count = posts.len(), "Fetched feed page");
        Ok(posts)
    }
}
