//! Database insertion utilities for characters, corporations, the endpoint catalog and
//! subscriptions.

use chrono::{DateTime, Utc};
use entity::corporation_division::DivisionKind;
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    constant::{
        api, group, CHARACTER_WALLET_SCOPE, CORPORATION_DIVISIONS_SCOPE, CORPORATION_WALLET_SCOPE,
    },
    error::TestError,
    fixtures::eve::EveFixtures,
    model::{
        CharacterApiModel, CorporationDivisionModel, EsiApiModel, EveCharacterModel,
        EveCorporationModel,
    },
};

impl<'a> EveFixtures<'a> {
    /// Insert a mock character into the database.
    ///
    /// If a character with the specified ID already exists, returns the existing record.
    ///
    /// # Arguments
    /// - `character_id` - The EVE Online character ID to insert
    /// - `corporation_id` - Corporation the character belongs to, if known
    ///
    /// # Returns
    /// - `Ok(EveCharacterModel)` - The created or existing character record
    /// - `Err(TestError::DbErr)` - Database query or insert operation failed
    pub async fn insert_mock_character(
        &self,
        character_id: i64,
        corporation_id: Option<i64>,
    ) -> Result<EveCharacterModel, TestError> {
        if let Some(existing) = entity::prelude::EveCharacter::find()
            .filter(entity::eve_character::Column::CharacterId.eq(character_id))
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::EveCharacter::insert(entity::eve_character::ActiveModel {
                character_id: ActiveValue::Set(character_id),
                name: ActiveValue::Set(format!("Character {}", character_id)),
                corporation_id: ActiveValue::Set(corporation_id),
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
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a mock corporation with placeholder profile values.
    pub async fn insert_mock_corporation(
        &self,
        corporation_id: i64,
    ) -> Result<EveCorporationModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::EveCorporation::insert(entity::eve_corporation::ActiveModel {
                corporation_id: ActiveValue::Set(corporation_id),
                name: ActiveValue::Set(format!("Corporation {}", corporation_id)),
                ticker: ActiveValue::Set("OLD".to_string()),
                alliance_id: ActiveValue::Set(None),
                ceo_id: ActiveValue::Set(1),
                creator_id: ActiveValue::Set(1),
                date_founded: ActiveValue::Set(None),
                description: ActiveValue::Set(None),
                faction_id: ActiveValue::Set(None),
                home_station_id: ActiveValue::Set(None),
                member_count: ActiveValue::Set(1),
                shares: ActiveValue::Set(None),
                tax_rate: ActiveValue::Set(0.0),
                url: ActiveValue::Set(None),
                war_eligible: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert the endpoint groups and the nine catalog endpoints.
    ///
    /// Mirrors the catalog seeded by the migrations, which don't run against the SQLite
    /// test database.
    pub async fn insert_esi_catalog(&self) -> Result<Vec<EsiApiModel>, TestError> {
        let groups = [
            (group::CHARACTER, "Character"),
            (group::WALLET, "Wallet"),
            (group::CORPORATION, "Corporation"),
        ];
        for (id, name) in groups {
            entity::prelude::EsiApiGroup::insert(entity::esi_api_group::ActiveModel {
                id: ActiveValue::Set(id),
                name: ActiveValue::Set(name.to_string()),
            })
            .exec_without_returning(&self.setup.db)
            .await?;
        }

        let apis = [
            (api::CHARACTER_PROFILE, "Character Profile", "/characters/{character_id}/", 86400, None, group::CHARACTER, "character_profile"),
            (api::CORPORATION_PROFILE, "Corporation Profile", "/corporations/{corporation_id}/", 3600, None, group::CORPORATION, "corporation_profile"),
            (api::CHARACTER_WALLET, "Character Wallet", "/characters/{character_id}/wallet/", 120, Some(CHARACTER_WALLET_SCOPE), group::WALLET, "character_wallet"),
            (api::CHARACTER_WALLET_JOURNAL, "Character Wallet Journal", "/characters/{character_id}/wallet/journal/", 3600, Some(CHARACTER_WALLET_SCOPE), group::WALLET, "character_wallet_journal"),
            (api::CHARACTER_WALLET_TRANSACTIONS, "Character Wallet Transactions", "/characters/{character_id}/wallet/transactions/", 3600, Some(CHARACTER_WALLET_SCOPE), group::WALLET, "character_wallet_transactions"),
            (api::CORPORATION_DIVISIONS, "Corporation Divisions", "/corporations/{corporation_id}/divisions/", 3600, Some(CORPORATION_DIVISIONS_SCOPE), group::CORPORATION, "corporation_divisions"),
            (api::CORPORATION_WALLETS, "Corporation Wallets", "/corporations/{corporation_id}/wallets/", 300, Some(CORPORATION_WALLET_SCOPE), group::CORPORATION, "corporation_wallets"),
            (api::CORPORATION_WALLET_JOURNAL, "Corporation Wallet Journal", "/corporations/{corporation_id}/wallets/{division}/journal/", 3600, Some(CORPORATION_WALLET_SCOPE), group::CORPORATION, "corporation_wallet_journal"),
            (api::CORPORATION_WALLET_TRANSACTIONS, "Corporation Wallet Transactions", "/corporations/{corporation_id}/wallets/{division}/transactions/", 3600, Some(CORPORATION_WALLET_SCOPE), group::CORPORATION, "corporation_wallet_transactions"),
        ];

        let mut models = Vec::with_capacity(apis.len());
        for (id, name, path, cache_duration, scope, group_id, handler) in apis {
            models.push(self.insert_mock_api(id, name, path, cache_duration, scope, group_id, handler).await?);
        }

        Ok(models)
    }

    /// Insert a single catalog endpoint. Its group must already exist.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_mock_api(
        &self,
        id: i32,
        name: &str,
        path: &str,
        cache_duration: i32,
        scope: Option<&str>,
        group_id: i32,
        handler: &str,
    ) -> Result<EsiApiModel, TestError> {
        Ok(
            entity::prelude::EsiApi::insert(entity::esi_api::ActiveModel {
                id: ActiveValue::Set(id),
                name: ActiveValue::Set(name.to_string()),
                path: ActiveValue::Set(path.to_string()),
                cache_duration: ActiveValue::Set(cache_duration),
                scope: ActiveValue::Set(scope.map(str::to_string)),
                group_id: ActiveValue::Set(group_id),
                handler: ActiveValue::Set(handler.to_string()),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Subscribe `character_id` to `api_id` with the given schedule state.
    pub async fn insert_subscription(
        &self,
        character_id: i64,
        api_id: i32,
        last_execution: Option<DateTime<Utc>>,
    ) -> Result<CharacterApiModel, TestError> {
        Ok(
            entity::prelude::CharacterApi::insert(entity::character_api::ActiveModel {
                character_id: ActiveValue::Set(character_id),
                api_id: ActiveValue::Set(api_id),
                last_execution: ActiveValue::Set(last_execution.map(|t| t.naive_utc())),
                last_result: ActiveValue::Set(None),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a named division for `corporation_id`.
    pub async fn insert_mock_division(
        &self,
        corporation_id: i64,
        kind: DivisionKind,
        division: i32,
        name: &str,
    ) -> Result<CorporationDivisionModel, TestError> {
        Ok(
            entity::prelude::CorporationDivision::insert(entity::corporation_division::ActiveModel {
                corporation_id: ActiveValue::Set(corporation_id),
                kind: ActiveValue::Set(kind),
                division: ActiveValue::Set(division),
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
