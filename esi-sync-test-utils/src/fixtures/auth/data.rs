//! Access-token row insertion.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    error::TestError,
    fixtures::auth::{factory::mock_access_token, AuthFixtures},
    model::CharacterAccessTokenModel,
};

impl<'a> AuthFixtures<'a> {
    /// Insert an access token for `character_id`.
    ///
    /// The character row must already exist. The stored scope column mirrors the token's
    /// `scp` claim.
    ///
    /// # Arguments
    /// - `character_id` - Owner of the token
    /// - `scopes` - Scopes granted by the minted token
    /// - `refresh_token` - Refresh token stored alongside
    /// - `expires_at` - Expiry of the minted token
    ///
    /// # Returns
    /// - `Ok(CharacterAccessTokenModel)` - The created token row
    /// - `Err(TestError)` - Minting or insertion failed
    pub async fn insert_mock_token(
        &self,
        character_id: i64,
        scopes: &[&str],
        refresh_token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<CharacterAccessTokenModel, TestError> {
        let access_token = mock_access_token(character_id, scopes, expires_at)?;
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::CharacterAccessToken::insert(entity::character_access_token::ActiveModel {
                character_id: ActiveValue::Set(character_id),
                access_token: ActiveValue::Set(access_token),
                refresh_token: ActiveValue::Set(refresh_token.to_string()),
                issued_at: ActiveValue::Set((expires_at - chrono::Duration::minutes(20)).naive_utc()),
                expires_at: ActiveValue::Set(expires_at.naive_utc()),
                scopes: ActiveValue::Set(scopes.join(" ")),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
