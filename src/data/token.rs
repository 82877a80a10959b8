use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

/// Token values to persist after a grant.
#[derive(Debug, Clone)]
pub struct StoredToken {
    pub access_token: String,
    pub refresh_token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub scopes: Vec<String>,
}

pub struct AccessTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AccessTokenRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_character_id(
        &self,
        character_id: i64,
    ) -> Result<Option<entity::character_access_token::Model>, DbErr> {
        entity::prelude::CharacterAccessToken::find()
            .filter(entity::character_access_token::Column::CharacterId.eq(character_id))
            .one(self.db)
            .await
    }

    /// Creates the character's token or replaces it in place.
    ///
    /// Scopes are stored space separated, the way the SSO encodes them in requests.
    pub async fn upsert(
        &self,
        character_id: i64,
        token: StoredToken,
    ) -> Result<entity::character_access_token::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let model = entity::character_access_token::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            access_token: ActiveValue::Set(token.access_token),
            refresh_token: ActiveValue::Set(token.refresh_token),
            issued_at: ActiveValue::Set(token.issued_at.naive_utc()),
            expires_at: ActiveValue::Set(token.expires_at.naive_utc()),
            scopes: ActiveValue::Set(token.scopes.join(" ")),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        entity::prelude::CharacterAccessToken::insert(model)
            .on_conflict(
                OnConflict::column(entity::character_access_token::Column::CharacterId)
                    .update_columns([
                        entity::character_access_token::Column::AccessToken,
                        entity::character_access_token::Column::RefreshToken,
                        entity::character_access_token::Column::IssuedAt,
                        entity::character_access_token::Column::ExpiresAt,
                        entity::character_access_token::Column::Scopes,
                        entity::character_access_token::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }
}

/// Splits the stored scope column.
pub fn parse_scopes(scopes: &str) -> Vec<String> {
    scopes.split_whitespace().map(str::to_string).collect()
}
