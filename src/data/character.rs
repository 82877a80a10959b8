use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::model::esi::CharacterProfile;

pub struct CharacterRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CharacterRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_character_id(
        &self,
        character_id: i64,
    ) -> Result<Option<entity::eve_character::Model>, DbErr> {
        entity::prelude::EveCharacter::find()
            .filter(entity::eve_character::Column::CharacterId.eq(character_id))
            .one(self.db)
            .await
    }

    /// Every stored character id, ascending.
    pub async fn get_all_character_ids(&self) -> Result<Vec<i64>, DbErr> {
        entity::prelude::EveCharacter::find()
            .select_only()
            .column(entity::eve_character::Column::CharacterId)
            .order_by_asc(entity::eve_character::Column::CharacterId)
            .into_tuple::<i64>()
            .all(self.db)
            .await
    }

    /// Returns the stored character, creating a name-only row when it doesn't exist yet.
    ///
    /// The profile endpoint fills in the remaining attributes on the character's first sync.
    pub async fn get_or_create(
        &self,
        character_id: i64,
        name: &str,
    ) -> Result<entity::eve_character::Model, DbErr> {
        if let Some(character) = self.get_by_character_id(character_id).await? {
            return Ok(character);
        }

        let now = Utc::now().naive_utc();
        let character = entity::eve_character::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            name: ActiveValue::Set(name.to_string()),
            corporation_id: ActiveValue::Set(None),
            alliance_id: ActiveValue::Set(None),
            birthday: ActiveValue::Set(None),
            bloodline_id: ActiveValue::Set(None),
            description: ActiveValue::Set(None),
            faction_id: ActiveValue::Set(None),
            gender: ActiveValue::Set(None),
            race_id: ActiveValue::Set(None),
            security_status: ActiveValue::Set(None),
            title: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        entity::prelude::EveCharacter::insert(character)
            .exec_with_returning(self.db)
            .await
    }

    /// Inserts or fully replaces the profile attributes of `character_id`.
    pub async fn upsert_profile(
        &self,
        character_id: i64,
        profile: CharacterProfile,
    ) -> Result<entity::eve_character::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let character = entity::eve_character::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            name: ActiveValue::Set(profile.name),
            corporation_id: ActiveValue::Set(profile.corporation_id),
            alliance_id: ActiveValue::Set(profile.alliance_id),
            birthday: ActiveValue::Set(profile.birthday.map(|date| date.naive_utc())),
            bloodline_id: ActiveValue::Set(profile.bloodline_id),
            description: ActiveValue::Set(profile.description),
            faction_id: ActiveValue::Set(profile.faction_id),
            gender: ActiveValue::Set(profile.gender),
            race_id: ActiveValue::Set(profile.race_id),
            security_status: ActiveValue::Set(profile.security_status),
            title: ActiveValue::Set(profile.title),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        entity::prelude::EveCharacter::insert(character)
            .on_conflict(
                OnConflict::column(entity::eve_character::Column::CharacterId)
                    .update_columns([
                        entity::eve_character::Column::Name,
                        entity::eve_character::Column::CorporationId,
                        entity::eve_character::Column::AllianceId,
                        entity::eve_character::Column::Birthday,
                        entity::eve_character::Column::BloodlineId,
                        entity::eve_character::Column::Description,
                        entity::eve_character::Column::FactionId,
                        entity::eve_character::Column::Gender,
                        entity::eve_character::Column::RaceId,
                        entity::eve_character::Column::SecurityStatus,
                        entity::eve_character::Column::Title,
                        entity::eve_character::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }
}
