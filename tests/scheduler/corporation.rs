//! Tests for corporation endpoints resolved through the character's corporation.

use chrono::{Duration, SubsecRound, Utc};
use esi_sync::{data::division::DivisionRepository, scheduler::SyncOutcome};
use esi_sync_test_utils::prelude::*;
use serde_json::json;

use crate::util::{seeded_scheduler, subscription};

/// Tests a pass that discovers the character's corporation.
///
/// Verifies that a corporation learned from the character profile is used by the
/// corporation endpoints later in the same pass, and that wallet ledgers iterate the
/// wallet divisions stored by the divisions endpoint.
///
/// Expected: all three subscriptions succeed, one journal request per wallet division
#[tokio::test]
async fn corporation_learned_from_profile_is_used_in_same_pass() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    let scheduler = seeded_scheduler(&mut test).await;
    test.eve()
        .insert_mock_character(TEST_CHARACTER_ID, None)
        .await?;
    test.auth()
        .insert_mock_token(
            TEST_CHARACTER_ID,
            &[CORPORATION_DIVISIONS_SCOPE, CORPORATION_WALLET_SCOPE],
            "refresh",
            Utc::now() + Duration::minutes(20),
        )
        .await?;
    for api_id in [
        api::CHARACTER_PROFILE,
        api::CORPORATION_DIVISIONS,
        api::CORPORATION_WALLET_JOURNAL,
    ] {
        test.eve()
            .insert_subscription(TEST_CHARACTER_ID, api_id, None)
            .await?;
    }
    let profile = test.eve().create_esi_endpoint(
        &format!("/characters/{}/", TEST_CHARACTER_ID),
        factory::mock_character_profile("Director", TEST_CORPORATION_ID),
        1,
    );
    let divisions = test.eve().create_esi_endpoint(
        &format!("/corporations/{}/divisions/", TEST_CORPORATION_ID),
        factory::mock_divisions(&[(1, "Hangar")], &[(1, "Master"), (2, "Ops")]),
        1,
    );
    test.mocks.extend([profile, divisions]);
    for division in [1, 2] {
        let journal = test.eve().create_esi_endpoint(
            &format!(
                "/corporations/{}/wallets/{}/journal/",
                TEST_CORPORATION_ID, division
            ),
            json!([factory::mock_journal_entry(division * 10, 1.0)]),
            1,
        );
        test.mocks.push(journal);
    }

    let report = scheduler.sync_character(TEST_CHARACTER_ID).await.unwrap();

    assert_eq!(report.succeeded(), 3);
    assert!(matches!(
        report.outcome(api::CORPORATION_WALLET_JOURNAL),
        Some(SyncOutcome::Succeeded(summary)) if summary.fetched == 2 && summary.inserted == 2
    ));
    assert_eq!(
        DivisionRepository::new(&test.db)
            .get_wallet_divisions(TEST_CORPORATION_ID)
            .await?,
        vec![1, 2]
    );
    test.assert_mocks();

    Ok(())
}

/// Tests a corporation endpoint for a character without a known corporation.
///
/// Verifies that the endpoint succeeds without a request and still advances its
/// schedule, so it is not retried before its cache elapses.
///
/// Expected: Succeeded with nothing fetched, last_execution set
#[tokio::test]
async fn character_without_corporation_is_a_noop_success() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    let scheduler = seeded_scheduler(&mut test).await;
    let now = Utc::now().trunc_subsecs(0);
    test.eve()
        .insert_mock_character(TEST_CHARACTER_ID, None)
        .await?;
    test.auth()
        .insert_mock_token(
            TEST_CHARACTER_ID,
            &[CORPORATION_DIVISIONS_SCOPE],
            "refresh",
            now + Duration::minutes(20),
        )
        .await?;
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CORPORATION_DIVISIONS, None)
        .await?;

    let report = scheduler
        .sync_character_at(TEST_CHARACTER_ID, now)
        .await
        .unwrap();

    assert!(matches!(
        report.outcome(api::CORPORATION_DIVISIONS),
        Some(SyncOutcome::Succeeded(summary)) if summary.fetched == 0
    ));
    let after = subscription(&test, TEST_CHARACTER_ID, api::CORPORATION_DIVISIONS).await;
    assert_eq!(after.last_execution, Some(now.naive_utc()));

    Ok(())
}
