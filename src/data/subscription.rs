use chrono::{DateTime, Utc};
use migration::Expr;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::data::api::EsiApiRepository;

/// Longest `last_result` stored, in characters.
pub const LAST_RESULT_MAX_CHARS: usize = 1500;

/// Character endpoint subscriptions and their schedule state.
pub struct SubscriptionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SubscriptionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_character_id(
        &self,
        character_id: i64,
    ) -> Result<Vec<entity::character_api::Model>, DbErr> {
        entity::prelude::CharacterApi::find()
            .filter(entity::character_api::Column::CharacterId.eq(character_id))
            .order_by_asc(entity::character_api::Column::ApiId)
            .all(self.db)
            .await
    }

    /// Subscribes a character to one endpoint, returning the existing subscription if present.
    pub async fn subscribe(
        &self,
        character_id: i64,
        api_id: i32,
    ) -> Result<entity::character_api::Model, DbErr> {
        if let Some(existing) = entity::prelude::CharacterApi::find()
            .filter(entity::character_api::Column::CharacterId.eq(character_id))
            .filter(entity::character_api::Column::ApiId.eq(api_id))
            .one(self.db)
            .await?
        {
            return Ok(existing);
        }

        entity::prelude::CharacterApi::insert(entity::character_api::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            api_id: ActiveValue::Set(api_id),
            last_execution: ActiveValue::Set(None),
            last_result: ActiveValue::Set(None),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Subscribes a character to every endpoint of a group.
    pub async fn subscribe_group(
        &self,
        character_id: i64,
        group_id: i32,
    ) -> Result<Vec<entity::character_api::Model>, DbErr> {
        let apis = EsiApiRepository::new(self.db).get_by_group_id(group_id).await?;

        let mut subscriptions = Vec::with_capacity(apis.len());
        for api in apis {
            subscriptions.push(self.subscribe(character_id, api.id).await?);
        }

        Ok(subscriptions)
    }

    /// Marks a subscription as successfully run at `now`.
    ///
    /// Both columns change in one statement.
    pub async fn record_success(
        &self,
        subscription_id: i32,
        now: DateTime<Utc>,
        result: &str,
    ) -> Result<(), DbErr> {
        entity::prelude::CharacterApi::update_many()
            .col_expr(
                entity::character_api::Column::LastExecution,
                Expr::value(now.naive_utc()),
            )
            .col_expr(
                entity::character_api::Column::LastResult,
                Expr::value(truncate_result(result)),
            )
            .filter(entity::character_api::Column::Id.eq(subscription_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Records a failed run, leaving `last_execution` untouched so the next pass retries.
    pub async fn record_failure(&self, subscription_id: i32, error: &str) -> Result<(), DbErr> {
        entity::prelude::CharacterApi::update_many()
            .col_expr(
                entity::character_api::Column::LastResult,
                Expr::value(truncate_result(error)),
            )
            .filter(entity::character_api::Column::Id.eq(subscription_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}

fn truncate_result(result: &str) -> String {
    result.chars().take(LAST_RESULT_MAX_CHARS).collect()
}
