//! Access-token minting.
//!
//! Tokens carry the same claims as EVE SSO access tokens but are signed with a test HMAC
//! key instead of the SSO's RS256 key.

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use crate::{constant::TEST_JWT_SECRET, error::TestError};

/// Mint an access token for `character_id` granting `scopes`, expiring at `expires_at`.
///
/// # Returns
/// - `Ok(String)` - Encoded JWT
/// - `Err(TestError::JwtError)` - Encoding failed
pub fn mock_access_token(
    character_id: i64,
    scopes: &[&str],
    expires_at: DateTime<Utc>,
) -> Result<String, TestError> {
    let issued_at = expires_at - chrono::Duration::minutes(20);
    let claims = json!({
        "iss": "https://login.eveonline.com",
        "sub": format!("CHARACTER:EVE:{}", character_id),
        "aud": ["esi_client_id", "EVE Online"],
        "name": "Test Character",
        "owner": "test_owner_hash",
        "scp": scopes,
        "iat": issued_at.timestamp(),
        "exp": expires_at.timestamp(),
    });

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET),
    )?)
}

/// Token endpoint response body for a successful grant.
pub fn mock_token_response(access_token: &str, refresh_token: Option<&str>) -> serde_json::Value {
    let mut body = json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": 1199,
    });
    if let Some(refresh_token) = refresh_token {
        body["refresh_token"] = json!(refresh_token);
    }
    body
}
