//! Access-token lifecycle for characters.
//!
//! A character holds exactly one access token. Tokens are validated from their own `exp`
//! claim and refreshed through the SSO when expired; every refreshed token is persisted
//! before it is handed to the caller.

use chrono::{DateTime, Utc};
use sea_orm::ConnectionTrait;

use crate::{
    data::{
        character::CharacterRepository,
        token::{parse_scopes, AccessTokenRepository, StoredToken},
    },
    error::{auth::AuthError, Error},
    esi::{EsiClaims, EsiOAuthClient, Scopes, TokenGrant},
};

pub struct TokenService<'a, C: ConnectionTrait> {
    db: &'a C,
    oauth: &'a EsiOAuthClient,
}

impl<'a, C: ConnectionTrait> TokenService<'a, C> {
    /// Creates a new instance of [`TokenService`]
    pub fn new(db: &'a C, oauth: &'a EsiOAuthClient) -> Self {
        Self { db, oauth }
    }

    /// Whether `token` can still be presented to ESI at `now`.
    ///
    /// Only the `exp` claim is consulted; the signature is not verified. A token that cannot
    /// be decoded or carries no `exp` is invalid, as is a token at or past its expiry.
    pub fn is_valid(
        &self,
        token: &entity::character_access_token::Model,
        now: DateTime<Utc>,
    ) -> bool {
        match EsiClaims::decode_unverified(&token.access_token) {
            Ok(claims) => !claims.is_expired_at(now),
            Err(_) => false,
        }
    }

    /// Exchanges the stored refresh token and replaces the stored token in place.
    ///
    /// If the SSO does not rotate the refresh token, the current one is kept.
    ///
    /// # Returns
    /// - `Ok(Model)` - The refreshed token, already persisted
    /// - `Err(Error::AuthError)` - Token endpoint unreachable or grant rejected; the stored
    ///   token is left untouched
    /// - `Err(Error::DbErr)` - Persisting the refreshed token failed
    pub async fn refresh(
        &self,
        token: &entity::character_access_token::Model,
    ) -> Result<entity::character_access_token::Model, Error> {
        let grant = self.oauth.refresh(&token.refresh_token).await?;

        tracing::debug!(
            character_id = token.character_id,
            rotated = grant.refresh_token.is_some(),
            "Refreshed access token"
        );

        let stored = stored_token(grant, Some(&token.refresh_token))?;

        Ok(AccessTokenRepository::new(self.db)
            .upsert(token.character_id, stored)
            .await?)
    }

    /// Returns a token for `character_id` that is valid now, refreshing it if needed.
    pub async fn valid_access_token(
        &self,
        character_id: i64,
    ) -> Result<entity::character_access_token::Model, Error> {
        self.valid_access_token_at(character_id, Utc::now()).await
    }

    /// Returns a token for `character_id` that is valid at `now`.
    ///
    /// At most one refresh is performed.
    ///
    /// # Returns
    /// - `Ok(Model)` - The stored token, or the refreshed and persisted replacement
    /// - `Err(Error::AuthError(AuthError::TokenNotFound))` - Character has no stored token
    /// - `Err(Error::AuthError(_))` - Refresh failed
    pub async fn valid_access_token_at(
        &self,
        character_id: i64,
        now: DateTime<Utc>,
    ) -> Result<entity::character_access_token::Model, Error> {
        let Some(token) = AccessTokenRepository::new(self.db)
            .get_by_character_id(character_id)
            .await?
        else {
            return Err(AuthError::TokenNotFound(character_id).into());
        };

        if self.is_valid(&token, now) {
            return Ok(token);
        }

        tracing::debug!(character_id, "Access token expired, refreshing");

        self.refresh(&token).await
    }

    /// Registers the character behind an SSO authorization code.
    ///
    /// Creates the character row if it does not exist yet and creates or replaces its
    /// access token.
    ///
    /// # Returns
    /// - `Ok(i64)` - The authorizing character's ID
    /// - `Err(Error::AuthError(AuthError::CodeExchange))` - Code rejected
    /// - `Err(Error::AuthError(AuthError::InvalidSubject))` - `sub` does not name a character
    /// - `Err(Error::AuthError(AuthError::MissingRefreshToken))` - Grant had no refresh token
    pub async fn register(&self, code: &str) -> Result<i64, Error> {
        let grant = self.oauth.exchange_code(code).await?;
        let character_id = grant.claims.character_id()?;
        let name = grant.claims.name.clone().unwrap_or_default();

        let stored = stored_token(grant, None)?;

        CharacterRepository::new(self.db)
            .get_or_create(character_id, &name)
            .await?;
        AccessTokenRepository::new(self.db)
            .upsert(character_id, stored)
            .await?;

        tracing::info!(character_id, "Registered character");

        Ok(character_id)
    }
}

/// Converts a grant into the persisted form, falling back to `current_refresh_token` when
/// the grant did not rotate it.
fn stored_token(
    grant: TokenGrant,
    current_refresh_token: Option<&str>,
) -> Result<StoredToken, AuthError> {
    let refresh_token = grant
        .refresh_token
        .or_else(|| current_refresh_token.map(str::to_string))
        .ok_or(AuthError::MissingRefreshToken)?;

    let expires_at = grant
        .claims
        .expires_at()
        .ok_or_else(|| AuthError::InvalidToken("missing exp claim".to_string()))?;
    let issued_at = grant.claims.issued_at().unwrap_or_else(Utc::now);

    Ok(StoredToken {
        access_token: grant.access_token,
        refresh_token,
        issued_at,
        expires_at,
        scopes: grant.claims.scp.to_vec(),
    })
}

/// Scopes granted to `token`, read from its `scp` claim or, if the token cannot be decoded,
/// from the stored scope column.
pub fn granted_scopes(token: &entity::character_access_token::Model) -> Scopes {
    match EsiClaims::decode_unverified(&token.access_token) {
        Ok(claims) => claims.scp,
        Err(_) => Scopes::Many(parse_scopes(&token.scopes)),
    }
}
