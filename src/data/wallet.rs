use chrono::{NaiveDateTime, Utc};
use migration::{Expr, OnConflict};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{data::UpsertOutcome, model::esi::CorporationWalletBalance};

/// Current wallet balances. Balances are overwritten on every fetch, no history is kept.
pub struct WalletRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WalletRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_character_balance(
        &self,
        character_id: i64,
    ) -> Result<Option<entity::character_wallet::Model>, DbErr> {
        entity::prelude::CharacterWallet::find_by_id(character_id)
            .one(self.db)
            .await
    }

    pub async fn upsert_character_balance(
        &self,
        character_id: i64,
        balance: f64,
    ) -> Result<UpsertOutcome, DbErr> {
        let now = Utc::now().naive_utc();

        if self.get_character_balance(character_id).await?.is_some() {
            entity::prelude::CharacterWallet::update_many()
                .col_expr(entity::character_wallet::Column::Balance, Expr::value(balance))
                .col_expr(entity::character_wallet::Column::UpdatedAt, Expr::value(now))
                .filter(entity::character_wallet::Column::CharacterId.eq(character_id))
                .exec(self.db)
                .await?;

            return Ok(UpsertOutcome::Updated);
        }

        entity::prelude::CharacterWallet::insert(entity::character_wallet::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            balance: ActiveValue::Set(balance),
            updated_at: ActiveValue::Set(now),
        })
        .exec_without_returning(self.db)
        .await?;

        Ok(UpsertOutcome::Inserted)
    }

    pub async fn get_corporation_balances(
        &self,
        corporation_id: i64,
    ) -> Result<Vec<entity::corporation_wallet::Model>, DbErr> {
        entity::prelude::CorporationWallet::find()
            .filter(entity::corporation_wallet::Column::CorporationId.eq(corporation_id))
            .order_by_asc(entity::corporation_wallet::Column::Division)
            .all(self.db)
            .await
    }

    /// Overwrites each division's balance by `(corporation_id, division)`.
    ///
    pub async fn upsert_corporation_balances(
        &self,
        corporation_id: i64,
        balances: &[CorporationWalletBalance],
    ) -> Result<Vec<UpsertOutcome>, DbErr> {
        let now = Utc::now().naive_utc();
        let mut stored: Vec<i32> = self
            .get_corporation_balances(corporation_id)
            .await?
            .into_iter()
            .map(|wallet| wallet.division)
            .collect();

        let mut outcomes = Vec::with_capacity(balances.len());
        for wallet in balances {
            self.write_corporation_balance(corporation_id, wallet.division, wallet.balance, now)
                .await?;

            if stored.contains(&wallet.division) {
                outcomes.push(UpsertOutcome::Updated);
            } else {
                stored.push(wallet.division);
                outcomes.push(UpsertOutcome::Inserted);
            }
        }

        Ok(outcomes)
    }

    /// Writes one division balance, overwriting a row another member's pass stored meanwhile.
    async fn write_corporation_balance(
        &self,
        corporation_id: i64,
        division: i32,
        balance: f64,
        updated_at: NaiveDateTime,
    ) -> Result<(), DbErr> {
        entity::prelude::CorporationWallet::insert(entity::corporation_wallet::ActiveModel {
            corporation_id: ActiveValue::Set(corporation_id),
            division: ActiveValue::Set(division),
            balance: ActiveValue::Set(balance),
            updated_at: ActiveValue::Set(updated_at),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                entity::corporation_wallet::Column::CorporationId,
                entity::corporation_wallet::Column::Division,
            ])
            .update_columns([
                entity::corporation_wallet::Column::Balance,
                entity::corporation_wallet::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }
}
