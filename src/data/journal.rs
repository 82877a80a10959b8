//! Wallet journal ledgers.
//!
//! Journal rows are append-only: an entry whose ESI `id` is already stored for the owning
//! wallet is never written again, even if ESI later reports different values for it. Inserts
//! skip conflicting ids, so a concurrent pass storing the same corporation entries first
//! does not fail this one.

use std::collections::HashSet;

use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};

use crate::{
    data::{inserted_rows, retain_unseen, BATCH_SIZE},
    model::esi::JournalEntry,
};

pub struct JournalRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> JournalRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts the character journal entries not stored yet.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of inserted rows
    /// - `Err(DbErr)` - Lookup or insert failed
    pub async fn insert_missing_for_character(
        &self,
        character_id: i64,
        entries: Vec<JournalEntry>,
    ) -> Result<u64, DbErr> {
        let mut stored = HashSet::new();
        for batch in entries.chunks(BATCH_SIZE) {
            let ref_ids: Vec<i64> = batch.iter().map(|entry| entry.id).collect();
            stored.extend(
                entity::prelude::CharacterWalletJournal::find()
                    .select_only()
                    .column(entity::character_wallet_journal::Column::RefId)
                    .filter(entity::character_wallet_journal::Column::CharacterId.eq(character_id))
                    .filter(entity::character_wallet_journal::Column::RefId.is_in(ref_ids))
                    .into_tuple::<i64>()
                    .all(self.db)
                    .await?,
            );
        }

        let missing = retain_unseen(entries, stored, |entry| entry.id);
        self.insert_character_rows(character_id, &missing).await
    }

    async fn insert_character_rows(
        &self,
        character_id: i64,
        entries: &[JournalEntry],
    ) -> Result<u64, DbErr> {
        let mut inserted = 0;

        for batch in entries.chunks(BATCH_SIZE) {
            let rows = batch.iter().map(|entry| entity::character_wallet_journal::ActiveModel {
                character_id: ActiveValue::Set(character_id),
                ref_id: ActiveValue::Set(entry.id),
                amount: ActiveValue::Set(entry.amount),
                balance: ActiveValue::Set(entry.balance),
                context_id: ActiveValue::Set(entry.context_id),
                context_id_type: ActiveValue::Set(entry.context_id_type.clone()),
                date: ActiveValue::Set(entry.date.naive_utc()),
                description: ActiveValue::Set(entry.description.clone()),
                first_party_id: ActiveValue::Set(entry.first_party_id),
                reason: ActiveValue::Set(entry.reason.clone()),
                ref_type: ActiveValue::Set(entry.ref_type.clone()),
                second_party_id: ActiveValue::Set(entry.second_party_id),
                tax: ActiveValue::Set(entry.tax),
                tax_receiver_id: ActiveValue::Set(entry.tax_receiver_id),
                ..Default::default()
            });

            let result = entity::prelude::CharacterWalletJournal::insert_many(rows)
                .on_conflict_do_nothing_on([
                    entity::character_wallet_journal::Column::CharacterId,
                    entity::character_wallet_journal::Column::RefId,
                ])
                .exec_without_returning(self.db)
                .await?;
            inserted += inserted_rows(result);
        }

        Ok(inserted)
    }

    /// Inserts the journal entries of one corporation wallet division not stored yet.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of inserted rows
    /// - `Err(DbErr)` - Lookup or insert failed
    pub async fn insert_missing_for_corporation(
        &self,
        corporation_id: i64,
        division: i32,
        entries: Vec<JournalEntry>,
    ) -> Result<u64, DbErr> {
        let mut stored = HashSet::new();
        for batch in entries.chunks(BATCH_SIZE) {
            let ref_ids: Vec<i64> = batch.iter().map(|entry| entry.id).collect();
            stored.extend(
                entity::prelude::CorporationWalletJournal::find()
                    .select_only()
                    .column(entity::corporation_wallet_journal::Column::RefId)
                    .filter(
                        entity::corporation_wallet_journal::Column::CorporationId
                            .eq(corporation_id),
                    )
                    .filter(entity::corporation_wallet_journal::Column::Division.eq(division))
                    .filter(entity::corporation_wallet_journal::Column::RefId.is_in(ref_ids))
                    .into_tuple::<i64>()
                    .all(self.db)
                    .await?,
            );
        }

        let missing = retain_unseen(entries, stored, |entry| entry.id);
        self.insert_corporation_rows(corporation_id, division, &missing)
            .await
    }

    /// Writes entries of one division, skipping ids another pass stored after the lookup.
    async fn insert_corporation_rows(
        &self,
        corporation_id: i64,
        division: i32,
        entries: &[JournalEntry],
    ) -> Result<u64, DbErr> {
        let mut inserted = 0;

        for batch in entries.chunks(BATCH_SIZE) {
            let rows = batch
                .iter()
                .map(|entry| entity::corporation_wallet_journal::ActiveModel {
                    corporation_id: ActiveValue::Set(corporation_id),
                    division: ActiveValue::Set(division),
                    ref_id: ActiveValue::Set(entry.id),
                    amount: ActiveValue::Set(entry.amount),
                    balance: ActiveValue::Set(entry.balance),
                    context_id: ActiveValue::Set(entry.context_id),
                    context_id_type: ActiveValue::Set(entry.context_id_type.clone()),
                    date: ActiveValue::Set(entry.date.naive_utc()),
                    description: ActiveValue::Set(entry.description.clone()),
                    first_party_id: ActiveValue::Set(entry.first_party_id),
                    reason: ActiveValue::Set(entry.reason.clone()),
                    ref_type: ActiveValue::Set(entry.ref_type.clone()),
                    second_party_id: ActiveValue::Set(entry.second_party_id),
                    tax: ActiveValue::Set(entry.tax),
                    tax_receiver_id: ActiveValue::Set(entry.tax_receiver_id),
                    ..Default::default()
                });

            let result = entity::prelude::CorporationWalletJournal::insert_many(rows)
                .on_conflict_do_nothing_on([
                    entity::corporation_wallet_journal::Column::CorporationId,
                    entity::corporation_wallet_journal::Column::Division,
                    entity::corporation_wallet_journal::Column::RefId,
                ])
                .exec_without_returning(self.db)
                .await?;
            inserted += inserted_rows(result);
        }

        Ok(inserted)
    }
}
