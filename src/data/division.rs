use std::collections::HashMap;

use entity::corporation_division::DivisionKind;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::{data::UpsertOutcome, model::esi::DivisionEntry};

/// Rows written by [`DivisionRepository::upsert_many`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DivisionChanges {
    pub inserted: u64,
    pub updated: u64,
}

pub struct DivisionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DivisionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_corporation_id(
        &self,
        corporation_id: i64,
        kind: DivisionKind,
    ) -> Result<Vec<entity::corporation_division::Model>, DbErr> {
        entity::prelude::CorporationDivision::find()
            .filter(entity::corporation_division::Column::CorporationId.eq(corporation_id))
            .filter(entity::corporation_division::Column::Kind.eq(kind))
            .order_by_asc(entity::corporation_division::Column::Division)
            .all(self.db)
            .await
    }

    /// Known wallet division numbers of a corporation, ascending.
    pub async fn get_wallet_divisions(&self, corporation_id: i64) -> Result<Vec<i32>, DbErr> {
        entity::prelude::CorporationDivision::find()
            .select_only()
            .column(entity::corporation_division::Column::Division)
            .filter(entity::corporation_division::Column::CorporationId.eq(corporation_id))
            .filter(entity::corporation_division::Column::Kind.eq(DivisionKind::Wallet))
            .order_by_asc(entity::corporation_division::Column::Division)
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Upserts divisions of one kind by `(corporation_id, kind, division)`.
    ///
    /// Existing rows get their name replaced, unknown divisions are inserted, divisions absent
    /// from `entries` are left alone. An entry without a name stores an empty name.
    ///
    /// # Returns
    /// - `Ok(DivisionChanges)` - Inserted rows and rows whose name changed
    /// - `Err(DbErr)` - Query or write failed
    pub async fn upsert_many(
        &self,
        corporation_id: i64,
        kind: DivisionKind,
        entries: &[DivisionEntry],
    ) -> Result<DivisionChanges, DbErr> {
        let mut names: HashMap<i32, String> = self
            .get_by_corporation_id(corporation_id, kind)
            .await?
            .into_iter()
            .map(|division| (division.division, division.name))
            .collect();

        let mut changes = DivisionChanges::default();

        for entry in entries {
            let name = entry.name.clone().unwrap_or_default();

            let outcome = match names.get(&entry.division) {
                Some(stored) if *stored == name => continue,
                Some(_) => UpsertOutcome::Updated,
                None => UpsertOutcome::Inserted,
            };

            self.write(corporation_id, kind, entry.division, &name).await?;

            // A payload repeating a division number updates the row just written
            names.insert(entry.division, name);
            match outcome {
                UpsertOutcome::Inserted => changes.inserted += 1,
                UpsertOutcome::Updated => changes.updated += 1,
            }
        }

        Ok(changes)
    }

    /// Writes one division name, renaming a row another member's pass stored meanwhile.
    async fn write(
        &self,
        corporation_id: i64,
        kind: DivisionKind,
        division: i32,
        name: &str,
    ) -> Result<(), DbErr> {
        entity::prelude::CorporationDivision::insert(entity::corporation_division::ActiveModel {
            corporation_id: ActiveValue::Set(corporation_id),
            kind: ActiveValue::Set(kind),
            division: ActiveValue::Set(division),
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                entity::corporation_division::Column::CorporationId,
                entity::corporation_division::Column::Kind,
                entity::corporation_division::Column::Division,
            ])
            .update_column(entity::corporation_division::Column::Name)
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }
}
