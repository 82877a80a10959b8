//! ESI HTTP client.
//!
//! Every call is a GET against `base_url + path`. Paginated resources announce their page
//! count in the `X-Pages` header of each response; [`EsiClient::get`] follows it and
//! concatenates the page bodies in page order into one JSON array.

use std::{sync::Arc, time::Duration};

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::{
    error::{esi::EsiError, Error},
    service::retry::RetryContext,
};

/// Upper bound on the pages followed for one logical call.
pub const MAX_PAGES: u32 = 1000;

const PAGES_HEADER: &str = "x-pages";

/// Settings for [`EsiClient`].
#[derive(Debug, Clone)]
pub struct EsiClientConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Per-request timeout, covering connect through body.
    pub timeout: Duration,
    /// Requests allowed in flight at once across all clones of the client.
    pub max_concurrent_requests: usize,
    pub retry: RetryContext,
}

impl EsiClientConfig {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: user_agent.into(),
            timeout: Duration::from_secs(30),
            max_concurrent_requests: 8,
            retry: RetryContext::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_concurrent_requests(mut self, max_concurrent_requests: usize) -> Self {
        self.max_concurrent_requests = max_concurrent_requests.max(1);
        self
    }

    pub fn with_retry(mut self, retry: RetryContext) -> Self {
        self.retry = retry;
        self
    }
}

/// Cheaply cloneable ESI client sharing one connection pool and one request cap.
#[derive(Clone)]
pub struct EsiClient {
    inner: Arc<EsiClientRef>,
}

struct EsiClientRef {
    http_client: reqwest::Client,
    base_url: String,
    permits: Semaphore,
    retry: RetryContext,
}

/// A single response page.
#[derive(Debug)]
struct Page {
    body: Value,
    pages: u32,
}

impl EsiClient {
    /// Builds the client.
    ///
    /// # Returns
    /// - `Ok(EsiClient)` - Client ready to issue requests
    /// - `Err(Error::ReqwestError)` - TLS backend could not be initialized
    pub fn new(config: EsiClientConfig) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(EsiClientRef {
                http_client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                permits: Semaphore::new(config.max_concurrent_requests.max(1)),
                retry: config.retry,
            }),
        })
    }

    /// Fetches `path`, following pagination from page 1.
    ///
    /// # Arguments
    /// - `path` - Expanded path, e.g. `/characters/2114794365/wallet/journal/`
    /// - `token` - Bearer token for authenticated resources, must already be valid
    ///
    /// # Returns
    /// - `Ok(Value)` - Body of a single-page response, or the concatenation of all pages
    /// - `Err(Error)` - The first failing page's error; nothing is returned from earlier pages
    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Value, Error> {
        self.get_from_page(path, token, 1).await
    }

    /// Fetches `path` starting at `first_page` and following pagination from there.
    pub async fn get_from_page(
        &self,
        path: &str,
        token: Option<&str>,
        first_page: u32,
    ) -> Result<Value, Error> {
        let first_page = first_page.max(1);
        let first = self.fetch_page(path, token, first_page).await?;
        let last_page = first.pages.min(MAX_PAGES);

        if last_page <= first_page {
            return Ok(first.body);
        }

        let Value::Array(mut items) = first.body else {
            return Err(EsiError::UnexpectedBody {
                path: path.to_string(),
                page: first_page,
            }
            .into());
        };

        for page in (first_page + 1)..=last_page {
            match self.fetch_page(path, token, page).await?.body {
                Value::Array(mut page_items) => items.append(&mut page_items),
                _ => {
                    return Err(EsiError::UnexpectedBody {
                        path: path.to_string(),
                        page,
                    }
                    .into())
                }
            }
        }

        tracing::debug!(path = %path, pages = last_page, items = items.len(), "Assembled paginated response");

        Ok(Value::Array(items))
    }

    /// Fetches `path` and deserializes the assembled body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, Error> {
        let body = self.get(path, token).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn fetch_page(&self, path: &str, token: Option<&str>, page: u32) -> Result<Page, Error> {
        let description = format!("GET {} page {}", path, page);

        self.inner
            .retry
            .execute_with_retry(&description, || self.request_page(path, token, page))
            .await
    }

    async fn request_page(&self, path: &str, token: Option<&str>, page: u32) -> Result<Page, Error> {
        let _permit = self
            .inner
            .permits
            .acquire()
            .await
            .map_err(|e| Error::InternalError(format!("ESI request semaphore closed: {}", e)))?;

        let url = format!("{}{}", self.inner.base_url, path);
        let mut request = self.inner.http_client.get(&url);
        if page > 1 {
            request = request.query(&[("page", page)]);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EsiError::Http {
                path: path.to_string(),
                status,
                body,
            }
            .into());
        }

        let pages = page_count(response.headers());
        let body = response.json::<Value>().await?;

        Ok(Page { body, pages })
    }
}

/// Missing or unparsable headers count as a single page.
fn page_count(headers: &HeaderMap) -> u32 {
    headers
        .get(PAGES_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|pages| *pages > 0)
        .unwrap_or(1)
}
