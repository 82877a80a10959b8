//! SSO token endpoint mocks.

use mockito::{Matcher, Mock};

use crate::fixtures::auth::{factory::mock_token_response, AuthFixtures};

impl<'a> AuthFixtures<'a> {
    /// Create a mock `POST /v2/oauth/token` answering a refresh-token grant.
    ///
    /// Only requests carrying basic auth, `grant_type=refresh_token` and the given
    /// `refresh_token` match.
    ///
    /// # Arguments
    /// - `refresh_token` - Refresh token the request must present
    /// - `access_token` - Access token to return
    /// - `rotated_refresh_token` - Refresh token to return, if any
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn create_refresh_endpoint(
        &mut self,
        refresh_token: &str,
        access_token: &str,
        rotated_refresh_token: Option<&str>,
        expected_requests: usize,
    ) -> Mock {
        let body = mock_token_response(access_token, rotated_refresh_token);

        self.setup
            .server
            .mock("POST", "/v2/oauth/token")
            .match_header("authorization", Matcher::Regex("^Basic ".to_string()))
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".to_string(), "refresh_token".to_string()),
                Matcher::UrlEncoded("refresh_token".to_string(), refresh_token.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock `POST /v2/oauth/token` answering an authorization-code grant.
    pub fn create_code_endpoint(
        &mut self,
        code: &str,
        access_token: &str,
        refresh_token: &str,
        expected_requests: usize,
    ) -> Mock {
        let body = mock_token_response(access_token, Some(refresh_token));

        self.setup
            .server
            .mock("POST", "/v2/oauth/token")
            .match_header("authorization", Matcher::Regex("^Basic ".to_string()))
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".to_string(), "authorization_code".to_string()),
                Matcher::UrlEncoded("code".to_string(), code.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock `POST /v2/oauth/token` rejecting every grant with `status`.
    pub fn create_token_error_endpoint(&mut self, status: usize, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("POST", "/v2/oauth/token")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"invalid_grant","error_description":"Invalid refresh token"}"#)
            .expect(expected_requests)
            .create()
    }
}
