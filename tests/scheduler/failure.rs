//! Tests for failure handling in Scheduler::sync_character_at.
//!
//! A failed reconcile records the error but keeps `last_execution`, so the next pass
//! retries immediately, and never stops the character's other subscriptions.

use chrono::{Duration, SubsecRound, Utc};
use esi_sync::{error::Error, error::sync::SyncError, scheduler::SyncOutcome};
use esi_sync_test_utils::prelude::*;

use crate::util::{seeded_scheduler, subscription};

/// Tests that a failed call keeps its retry eligibility.
///
/// Verifies that a 500 from ESI leaves `last_execution` unchanged, records the error in
/// `last_result` and that an immediately following pass calls the endpoint again.
///
/// Expected: two failed passes, two requests, last_execution unchanged
#[tokio::test]
async fn failed_call_is_retried_on_next_pass() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    let scheduler = seeded_scheduler(&mut test).await;
    let now = Utc::now().trunc_subsecs(0);
    let last_execution = now - Duration::hours(2);
    test.eve()
        .insert_mock_character(TEST_CHARACTER_ID, None)
        .await?;
    test.auth()
        .insert_mock_token(
            TEST_CHARACTER_ID,
            &[CHARACTER_WALLET_SCOPE],
            "refresh",
            now + Duration::minutes(20),
        )
        .await?;
    test.eve()
        .insert_subscription(
            TEST_CHARACTER_ID,
            api::CHARACTER_WALLET_JOURNAL,
            Some(last_execution),
        )
        .await?;
    let endpoint = test.eve().create_esi_error_endpoint(
        &format!("/characters/{}/wallet/journal/", TEST_CHARACTER_ID),
        500,
        2,
    );
    test.mocks.push(endpoint);

    for _ in 0..2 {
        let report = scheduler
            .sync_character_at(TEST_CHARACTER_ID, now)
            .await
            .unwrap();

        assert!(matches!(
            report.outcome(api::CHARACTER_WALLET_JOURNAL),
            Some(SyncOutcome::Failed(_))
        ));

        let after = subscription(&test, TEST_CHARACTER_ID, api::CHARACTER_WALLET_JOURNAL).await;
        assert_eq!(
            after.last_execution.map(|t| t.trunc_subsecs(0)),
            Some(last_execution.naive_utc())
        );
        assert!(after.last_result.unwrap().contains("500"));
    }
    test.assert_mocks();

    Ok(())
}

/// Tests partial-failure isolation within one pass.
///
/// Verifies that a failing subscription does not prevent the following subscriptions
/// of the same character from running.
///
/// Expected: journal failed, profile succeeded
#[tokio::test]
async fn failure_does_not_block_other_subscriptions() -> Result<(), TestError> {
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
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CHARACTER_PROFILE, None)
        .await?;
    let journal = test.eve().create_esi_error_endpoint(
        &format!("/characters/{}/wallet/journal/", TEST_CHARACTER_ID),
        404,
        1,
    );
    let profile = test.eve().create_esi_endpoint(
        &format!("/characters/{}/", TEST_CHARACTER_ID),
        factory::mock_character_profile("Still Synced", TEST_CORPORATION_ID),
        1,
    );
    test.mocks.extend([journal, profile]);

    let report = scheduler.sync_character(TEST_CHARACTER_ID).await.unwrap();

    assert_eq!(report.failed(), 1);
    assert_eq!(report.succeeded(), 1);
    assert!(matches!(
        report.outcome(api::CHARACTER_PROFILE),
        Some(SyncOutcome::Succeeded(_))
    ));
    test.assert_mocks();

    Ok(())
}

/// Tests a pass for a character that is not stored.
///
/// Expected: Err(SyncError::CharacterNotFound)
#[tokio::test]
async fn unknown_character_is_an_error() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    let scheduler = seeded_scheduler(&mut test).await;

    let result = scheduler.sync_character(TEST_CHARACTER_ID).await;

    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::CharacterNotFound(id))) if id == TEST_CHARACTER_ID
    ));

    Ok(())
}

/// Tests a subscription to a catalog row with an unknown handler.
///
/// Verifies that the row is left out of the registry and its subscription is ignored
/// without failing the pass.
///
/// Expected: empty report, subscription untouched
#[tokio::test]
async fn subscription_to_unknown_handler_is_ignored() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    test.eve().insert_esi_catalog().await?;
    test.eve()
        .insert_mock_api(
            100,
            "Character Assets",
            "/characters/{character_id}/assets/",
            3600,
            None,
            group::CHARACTER,
            "character_assets",
        )
        .await?;
    let registry = esi_sync::registry::EndpointRegistry::load(&test.db)
        .await
        .unwrap();
    let scheduler = crate::TestSetupExt::scheduler(&test, registry);
    test.eve()
        .insert_mock_character(TEST_CHARACTER_ID, None)
        .await?;
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, 100, None)
        .await?;

    let report = scheduler.sync_character(TEST_CHARACTER_ID).await.unwrap();

    assert!(report.outcomes.is_empty());
    assert!(subscription(&test, TEST_CHARACTER_ID, 100)
        .await
        .last_result
        .is_none());

    Ok(())
}
