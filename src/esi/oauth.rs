//! EVE SSO token endpoint.
//!
//! Grants are exchanged at `{login_url}/v2/oauth/token` with the application's client id and
//! secret sent as HTTP basic auth.

use oauth2::{
    basic::BasicClient, AuthorizationCode, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
    RefreshToken, TokenResponse, TokenUrl,
};

use crate::{
    error::{auth::AuthError, Error},
    esi::claims::EsiClaims,
};

type SsoClient =
    BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Client for the SSO token endpoint.
#[derive(Clone)]
pub struct EsiOAuthClient {
    client: SsoClient,
    http_client: reqwest::Client,
}

/// Tokens returned by a successful grant, with the access token's claims decoded.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub access_token: String,
    /// `None` when the SSO did not rotate the refresh token.
    pub refresh_token: Option<String>,
    pub claims: EsiClaims,
}

impl EsiOAuthClient {
    /// Creates a token endpoint client.
    ///
    /// `http_client` must not follow redirects, the token endpoint never redirects and a
    /// redirect would forward the client credentials.
    ///
    /// # Arguments
    /// - `client_id` / `client_secret` - Application credentials from the EVE developer portal
    /// - `login_url` - SSO base URL, e.g. `https://login.eveonline.com`
    /// - `http_client` - HTTP client used for token requests
    pub fn new(
        client_id: &str,
        client_secret: &str,
        login_url: &str,
        http_client: reqwest::Client,
    ) -> Result<Self, Error> {
        let token_url = TokenUrl::new(format!(
            "{}/v2/oauth/token",
            login_url.trim_end_matches('/')
        ))?;

        let client = BasicClient::new(ClientId::new(client_id.to_string()))
            .set_client_secret(ClientSecret::new(client_secret.to_string()))
            .set_token_uri(token_url);

        Ok(Self {
            client,
            http_client,
        })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// # Returns
    /// - `Ok(TokenGrant)` - New access token and, if rotated, a new refresh token
    /// - `Err(AuthError::Refresh)` - Token endpoint unreachable or grant rejected
    /// - `Err(AuthError::InvalidToken)` - Returned access token could not be decoded
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, AuthError> {
        let response = self
            .client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthError::Refresh(e.to_string()))?;

        Self::grant(response)
    }

    /// Exchanges an authorization code from the SSO callback.
    ///
    /// # Returns
    /// - `Ok(TokenGrant)` - Access token and refresh token for the authorizing character
    /// - `Err(AuthError::CodeExchange)` - Token endpoint unreachable or code rejected
    /// - `Err(AuthError::InvalidToken)` - Returned access token could not be decoded
    pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant, AuthError> {
        let response = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthError::CodeExchange(e.to_string()))?;

        Self::grant(response)
    }

    fn grant(response: oauth2::basic::BasicTokenResponse) -> Result<TokenGrant, AuthError> {
        let access_token = response.access_token().secret().to_string();
        let claims = EsiClaims::decode_unverified(&access_token)?;

        Ok(TokenGrant {
            access_token,
            refresh_token: response.refresh_token().map(|t| t.secret().to_string()),
            claims,
        })
    }
}
