//! Wallet market transaction ledgers, deduplicated by ESI `transaction_id` per owning wallet.
//!
//! Conflicting ids are skipped on insert, like the journal ledgers.

use std::collections::HashSet;

use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};

use crate::{
    data::{inserted_rows, retain_unseen, BATCH_SIZE},
    model::esi::WalletTransaction,
};

pub struct TransactionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TransactionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts the character transactions not stored yet, returning the inserted count.
    pub async fn insert_missing_for_character(
        &self,
        character_id: i64,
        transactions: Vec<WalletTransaction>,
    ) -> Result<u64, DbErr> {
        let mut stored = HashSet::new();
        for batch in transactions.chunks(BATCH_SIZE) {
            let transaction_ids: Vec<i64> = batch.iter().map(|t| t.transaction_id).collect();
            stored.extend(
                entity::prelude::CharacterWalletTransaction::find()
                    .select_only()
                    .column(entity::character_wallet_transaction::Column::TransactionId)
                    .filter(
                        entity::character_wallet_transaction::Column::CharacterId.eq(character_id),
                    )
                    .filter(
                        entity::character_wallet_transaction::Column::TransactionId
                            .is_in(transaction_ids),
                    )
                    .into_tuple::<i64>()
                    .all(self.db)
                    .await?,
            );
        }

        let missing = retain_unseen(transactions, stored, |t| t.transaction_id);
        let mut inserted = 0;

        for batch in missing.chunks(BATCH_SIZE) {
            let rows = batch
                .iter()
                .map(|t| entity::character_wallet_transaction::ActiveModel {
                    character_id: ActiveValue::Set(character_id),
                    transaction_id: ActiveValue::Set(t.transaction_id),
                    client_id: ActiveValue::Set(t.client_id),
                    date: ActiveValue::Set(t.date.naive_utc()),
                    is_buy: ActiveValue::Set(t.is_buy),
                    is_personal: ActiveValue::Set(t.is_personal),
                    journal_ref_id: ActiveValue::Set(t.journal_ref_id),
                    location_id: ActiveValue::Set(t.location_id),
                    quantity: ActiveValue::Set(t.quantity),
                    type_id: ActiveValue::Set(t.type_id),
                    unit_price: ActiveValue::Set(t.unit_price),
                    ..Default::default()
                });

            let result = entity::prelude::CharacterWalletTransaction::insert_many(rows)
                .on_conflict_do_nothing_on([
                    entity::character_wallet_transaction::Column::CharacterId,
                    entity::character_wallet_transaction::Column::TransactionId,
                ])
                .exec_without_returning(self.db)
                .await?;
            inserted += inserted_rows(result);
        }

        Ok(inserted)
    }

    /// Inserts the transactions of one corporation wallet division not stored yet.
    pub async fn insert_missing_for_corporation(
        &self,
        corporation_id: i64,
        division: i32,
        transactions: Vec<WalletTransaction>,
    ) -> Result<u64, DbErr> {
        let mut stored = HashSet::new();
        for batch in transactions.chunks(BATCH_SIZE) {
            let transaction_ids: Vec<i64> = batch.iter().map(|t| t.transaction_id).collect();
            stored.extend(
                entity::prelude::CorporationWalletTransaction::find()
                    .select_only()
                    .column(entity::corporation_wallet_transaction::Column::TransactionId)
                    .filter(
                        entity::corporation_wallet_transaction::Column::CorporationId
                            .eq(corporation_id),
                    )
                    .filter(entity::corporation_wallet_transaction::Column::Division.eq(division))
                    .filter(
                        entity::corporation_wallet_transaction::Column::TransactionId
                            .is_in(transaction_ids),
                    )
                    .into_tuple::<i64>()
                    .all(self.db)
                    .await?,
            );
        }

        let missing = retain_unseen(transactions, stored, |t| t.transaction_id);
        self.insert_corporation_rows(corporation_id, division, &missing)
            .await
    }

    async fn insert_corporation_rows(
        &self,
        corporation_id: i64,
        division: i32,
        transactions: &[WalletTransaction],
    ) -> Result<u64, DbErr> {
        let mut inserted = 0;

        for batch in transactions.chunks(BATCH_SIZE) {
            let rows = batch
                .iter()
                .map(|t| entity::corporation_wallet_transaction::ActiveModel {
                    corporation_id: ActiveValue::Set(corporation_id),
                    division: ActiveValue::Set(division),
                    transaction_id: ActiveValue::Set(t.transaction_id),
                    client_id: ActiveValue::Set(t.client_id),
                    date: ActiveValue::Set(t.date.naive_utc()),
                    is_buy: ActiveValue::Set(t.is_buy),
                    journal_ref_id: ActiveValue::Set(t.journal_ref_id),
                    location_id: ActiveValue::Set(t.location_id),
                    quantity: ActiveValue::Set(t.quantity),
                    type_id: ActiveValue::Set(t.type_id),
                    unit_price: ActiveValue::Set(t.unit_price),
                    ..Default::default()
                });

            let result = entity::prelude::CorporationWalletTransaction::insert_many(rows)
                .on_conflict_do_nothing_on([
                    entity::corporation_wallet_transaction::Column::CorporationId,
                    entity::corporation_wallet_transaction::Column::Division,
                    entity::corporation_wallet_transaction::Column::TransactionId,
                ])
                .exec_without_returning(self.db)
                .await?;
            inserted += inserted_rows(result);
        }

        Ok(inserted)
    }
}
