//! Data access layer repositories.
//!
//! Each repository borrows any `ConnectionTrait` so callers can pass either the pooled
//! connection or an open transaction. Writes are always scoped by the owning character or
//! corporation id.

pub mod api;
pub mod character;
pub mod corporation;
pub mod division;
pub mod journal;
pub mod subscription;
pub mod token;
pub mod transaction;
pub mod wallet;

use std::collections::HashSet;

use sea_orm::TryInsertResult;

/// Whether an upsert created a row or changed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Rows per `IN (...)` lookup and per multi-row insert.
pub(crate) const BATCH_SIZE: usize = 250;

/// Drops entries whose natural id is already stored, and repeats within `entries` itself.
///
/// The first occurrence of an id wins, ordering is otherwise preserved.
pub(crate) fn retain_unseen<T>(
    entries: Vec<T>,
    mut seen: HashSet<i64>,
    natural_id: impl Fn(&T) -> i64,
) -> Vec<T> {
    entries
        .into_iter()
        .filter(|entry| seen.insert(natural_id(entry)))
        .collect()
}

/// Rows written by an `ON CONFLICT DO NOTHING` insert.
///
/// Rows a concurrent writer stored first are skipped by the database and not counted.
pub(crate) fn inserted_rows(result: TryInsertResult<u64>) -> u64 {
    match result {
        TryInsertResult::Inserted(rows) => rows,
        TryInsertResult::Empty | TryInsertResult::Conflicted => 0,
    }
}
