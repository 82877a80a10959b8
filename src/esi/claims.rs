//! Access-token claims.
//!
//! EVE SSO access tokens are JWTs signed by the SSO. The sync engine only reads them to learn
//! who the token belongs to, which scopes it grants and when it expires, so the signature is
//! not verified here.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::auth::AuthError;

const CHARACTER_SUBJECT_PREFIX: &str = "CHARACTER:EVE:";

/// Claims carried by an EVE SSO access token.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EsiClaims {
    /// Subject, `CHARACTER:EVE:<character_id>`.
    pub sub: String,
    /// Granted scopes. The SSO sends a bare string when exactly one scope was granted.
    #[serde(default)]
    pub scp: Scopes,
    #[serde(default)]
    pub name: Option<String>,
    /// Issued-at, seconds since the Unix epoch.
    #[serde(default)]
    pub iat: Option<i64>,
    /// Expiry, seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scopes {
    One(String),
    Many(Vec<String>),
}

impl Default for Scopes {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl Scopes {
    pub fn contains(&self, scope: &str) -> bool {
        match self {
            Self::One(granted) => granted == scope,
            Self::Many(granted) => granted.iter().any(|s| s == scope),
        }
    }

    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(granted) => vec![granted.clone()],
            Self::Many(granted) => granted.clone(),
        }
    }
}

impl EsiClaims {
    /// Decodes the claims of `token` without verifying its signature or expiry.
    ///
    /// # Returns
    /// - `Ok(EsiClaims)` - Token is a well-formed JWT with a JSON claim set
    /// - `Err(AuthError::InvalidToken)` - Token is not a JWT or its claims don't parse
    pub fn decode_unverified(token: &str) -> Result<Self, AuthError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<Self>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// Character ID parsed from the subject claim.
    pub fn character_id(&self) -> Result<i64, AuthError> {
        self.sub
            .strip_prefix(CHARACTER_SUBJECT_PREFIX)
            .and_then(|id| id.parse::<i64>().ok())
            .ok_or_else(|| AuthError::InvalidSubject(self.sub.clone()))
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|iat| DateTime::from_timestamp(iat, 0))
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// A token without an expiry claim is treated as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expires_at) => now >= expires_at,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    use super::*;

    fn mint(claims: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"not-the-sso-key"),
        )
        .unwrap()
    }

    #[test]
    fn decodes_claims_without_verifying_signature() {
        let token = mint(json!({
            "sub": "CHARACTER:EVE:2114794365",
            "name": "Hyperion Kant",
            "scp": ["esi-wallet.read_character_wallet.v1", "publicData"],
            "iat": 1_700_000_000,
            "exp": 1_700_001_200,
        }));

        let claims = EsiClaims::decode_unverified(&token).unwrap();

        assert_eq!(claims.character_id().unwrap(), 2114794365);
        assert_eq!(claims.name.as_deref(), Some("Hyperion Kant"));
        assert!(claims.scp.contains("esi-wallet.read_character_wallet.v1"));
        assert!(!claims.scp.contains("esi-wallet.read_corporation_wallets.v1"));
        assert_eq!(claims.issued_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn accepts_single_scope_string() {
        let token = mint(json!({
            "sub": "CHARACTER:EVE:1",
            "scp": "esi-wallet.read_character_wallet.v1",
            "exp": 1_700_001_200,
        }));

        let claims = EsiClaims::decode_unverified(&token).unwrap();

        assert_eq!(
            claims.scp.to_vec(),
            vec!["esi-wallet.read_character_wallet.v1".to_string()]
        );
    }

    #[test]
    fn expiry_is_inclusive() {
        let exp = Utc::now();
        let token = mint(json!({ "sub": "CHARACTER:EVE:1", "exp": exp.timestamp() }));
        let claims = EsiClaims::decode_unverified(&token).unwrap();
        let exp = claims.expires_at().unwrap();

        assert!(!claims.is_expired_at(exp - Duration::seconds(1)));
        assert!(claims.is_expired_at(exp));
        assert!(claims.is_expired_at(exp + Duration::seconds(1)));
    }

    #[test]
    fn missing_expiry_is_expired() {
        let token = mint(json!({ "sub": "CHARACTER:EVE:1" }));
        let claims = EsiClaims::decode_unverified(&token).unwrap();

        assert!(claims.is_expired_at(Utc::now()));
        assert!(claims.scp.to_vec().is_empty());
    }

    #[test]
    fn rejects_malformed_tokens_and_subjects() {
        assert!(matches!(
            EsiClaims::decode_unverified("not-a-jwt"),
            Err(AuthError::InvalidToken(_))
        ));

        let token = mint(json!({ "sub": "CORPORATION:EVE:98000001", "exp": 1 }));
        let claims = EsiClaims::decode_unverified(&token).unwrap();
        assert!(matches!(
            claims.character_id(),
            Err(AuthError::InvalidSubject(_))
        ));
    }
}
