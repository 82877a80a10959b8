//! ESI mock endpoint creation utilities.
//!
//! Endpoints are registered on the shared mockito server and verify they were called the
//! expected number of times.

use mockito::{Matcher, Mock};
use serde_json::Value;

use crate::fixtures::eve::EveFixtures;

impl<'a> EveFixtures<'a> {
    /// Create a mock `GET {path}` returning `body` as a single page.
    ///
    /// # Arguments
    /// - `path` - Expanded ESI path, e.g. `/characters/2114794365/`
    /// - `body` - JSON body to return
    /// - `expected_requests` - Number of times this endpoint should be called
    ///
    /// # Returns
    /// - `Mock` - The created mock endpoint
    pub fn create_esi_endpoint(&mut self, path: &str, body: Value, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("GET", path)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create one mock per page of a paginated `GET {path}`.
    ///
    /// Every page carries `X-Pages: pages.len()`. Page 1 matches requests without a `page`
    /// query parameter, later pages match `?page=N`.
    ///
    /// # Returns
    /// - `Vec<Mock>` - Page mocks in page order
    pub fn create_paged_esi_endpoint(
        &mut self,
        path: &str,
        pages: Vec<Value>,
        expected_requests_per_page: usize,
    ) -> Vec<Mock> {
        let page_count = pages.len().to_string();

        pages
            .into_iter()
            .enumerate()
            .map(|(index, body)| {
                let page = index + 1;
                let query = if page == 1 {
                    Matcher::Exact(String::new())
                } else {
                    Matcher::UrlEncoded("page".to_string(), page.to_string())
                };

                self.setup
                    .server
                    .mock("GET", path)
                    .match_query(query)
                    .with_status(200)
                    .with_header("content-type", "application/json")
                    .with_header("x-pages", &page_count)
                    .with_body(body.to_string())
                    .expect(expected_requests_per_page)
                    .create()
            })
            .collect()
    }

    /// Create a mock `GET {path}` failing with `status`.
    pub fn create_esi_error_endpoint(
        &mut self,
        path: &str,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"mocked failure"}"#)
            .expect(expected_requests)
            .create()
    }

    /// Create a mock `GET {path}` that requires `Authorization: Bearer {token}`.
    pub fn create_authed_esi_endpoint(
        &mut self,
        path: &str,
        token: &str,
        body: Value,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", path)
            .match_header("authorization", format!("Bearer {}", token).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }
}
