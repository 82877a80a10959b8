//! Tests for ledger idempotence across overlapping sync windows.

use chrono::{Duration, SubsecRound, Utc};
use esi_sync::{data::journal::JournalRepository, model::esi::JournalEntry};
use esi_sync_test_utils::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde_json::json;

use crate::util::seeded_scheduler;

/// Tests a journal pass overlapping previously stored entries.
///
/// Verifies that the pass assembles every page, inserts only entries whose `id` is not
/// stored yet and leaves stored entries untouched even when ESI reports new values.
///
/// Expected: one row per id, stored amount of id 2 unchanged
#[tokio::test]
async fn overlapping_journal_window_is_not_duplicated() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    let scheduler = seeded_scheduler(&mut test).await;
    test.eve()
        .insert_mock_character(TEST_CHARACTER_ID, None)
        .await?;
    test.auth()
        .insert_mock_token(
            TEST_CHARACTER_ID,
            &[CHARACTER_WALLET_SCOPE],
            "refresh",
            Utc::now() + Duration::minutes(20),
        )
        .await?;
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CHARACTER_WALLET_JOURNAL, None)
        .await?;

    let stored: Vec<JournalEntry> = serde_json::from_value(json!([
        factory::mock_journal_entry(1, 10.0),
        factory::mock_journal_entry(2, 20.0),
    ]))
    .unwrap();
    JournalRepository::new(&test.db)
        .insert_missing_for_character(TEST_CHARACTER_ID, stored)
        .await?;

    let pages = test.eve().create_paged_esi_endpoint(
        &format!("/characters/{}/wallet/journal/", TEST_CHARACTER_ID),
        vec![
            json!([factory::mock_journal_entry(4, 40.0), factory::mock_journal_entry(3, 30.0)]),
            json!([factory::mock_journal_entry(2, 99.0), factory::mock_journal_entry(1, 10.0)]),
        ],
        1,
    );
    test.mocks.extend(pages);

    let report = scheduler.sync_character(TEST_CHARACTER_ID).await.unwrap();
    assert_eq!(report.succeeded(), 1);

    let rows = entity::prelude::CharacterWalletJournal::find()
        .filter(entity::character_wallet_journal::Column::CharacterId.eq(TEST_CHARACTER_ID))
        .order_by_asc(entity::character_wallet_journal::Column::RefId)
        .all(&test.db)
        .await?;
    let ref_ids: Vec<i64> = rows.iter().map(|row| row.ref_id).collect();
    assert_eq!(ref_ids, vec![1, 2, 3, 4]);
    assert_eq!(rows[1].amount, Some(20.0));

    let after = crate::util::subscription(&test, TEST_CHARACTER_ID, api::CHARACTER_WALLET_JOURNAL)
        .await;
    assert_eq!(
        after.last_result.as_deref(),
        Some("fetched=4 inserted=2 updated=0")
    );
    test.assert_mocks();

    Ok(())
}

/// Tests a transaction pass whose window was fully stored before.
///
/// Expected: success with nothing inserted, row count unchanged
#[tokio::test]
async fn fully_stored_transaction_window_inserts_nothing() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    let scheduler = seeded_scheduler(&mut test).await;
    let now = Utc::now().trunc_subsecs(0);
    test.eve()
        .insert_mock_character(TEST_CHARACTER_ID, None)
        .await?;
    test.auth()
        .insert_mock_token(
            TEST_CHARACTER_ID,
            &[CHARACTER_WALLET_SCOPE],
            "refresh",
            now + Duration::hours(4),
        )
        .await?;
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CHARACTER_WALLET_TRANSACTIONS, None)
        .await?;
    let endpoint = test.eve().create_esi_endpoint(
        &format!("/characters/{}/wallet/transactions/", TEST_CHARACTER_ID),
        json!([
            factory::mock_wallet_transaction(7, 5.0),
            factory::mock_wallet_transaction(8, 6.0),
        ]),
        2,
    );
    test.mocks.push(endpoint);

    // The second pass runs once the one hour cache has elapsed.
    scheduler
        .sync_character_at(TEST_CHARACTER_ID, now)
        .await
        .unwrap();
    let report = scheduler
        .sync_character_at(TEST_CHARACTER_ID, now + Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(report.succeeded(), 1);
    let rows = entity::prelude::CharacterWalletTransaction::find()
        .all(&test.db)
        .await?;
    assert_eq!(rows.len(), 2);

    let after = crate::util::subscription(
        &test,
        TEST_CHARACTER_ID,
        api::CHARACTER_WALLET_TRANSACTIONS,
    )
    .await;
    assert_eq!(
        after.last_result.as_deref(),
        Some("fetched=2 inserted=0 updated=0")
    );
    test.assert_mocks();

    Ok(())
}
