//! Tests for the scope gate in Scheduler::sync_character_at.

use chrono::{Duration, Utc};
use esi_sync::scheduler::{SkipReason, SyncOutcome};
use esi_sync_test_utils::prelude::*;
use serde_json::json;

use crate::util::{seeded_scheduler, subscription};

/// Tests a subscription whose scope the token lacks.
///
/// Verifies that the subscription is skipped even though it never ran, that no request
/// is made and that the schedule state is left untouched.
///
/// Expected: Skipped(MissingScope), no request, last_result still null
#[tokio::test]
async fn skips_endpoint_when_scope_not_granted() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    let scheduler = seeded_scheduler(&mut test).await;
    test.eve()
        .insert_mock_character(TEST_CHARACTER_ID, None)
        .await?;
    test.auth()
        .insert_mock_token(
            TEST_CHARACTER_ID,
            &[CORPORATION_WALLET_SCOPE],
            "refresh",
            Utc::now() + Duration::minutes(20),
        )
        .await?;
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CHARACTER_WALLET_JOURNAL, None)
        .await?;
    let endpoint = test.eve().create_esi_endpoint(
        &format!("/characters/{}/wallet/journal/", TEST_CHARACTER_ID),
        json!([]),
        0,
    );
    test.mocks.push(endpoint);

    let report = scheduler.sync_character(TEST_CHARACTER_ID).await.unwrap();

    assert_eq!(
        report.outcome(api::CHARACTER_WALLET_JOURNAL),
        Some(&SyncOutcome::Skipped(SkipReason::MissingScope))
    );

    let after = subscription(&test, TEST_CHARACTER_ID, api::CHARACTER_WALLET_JOURNAL).await;
    assert!(after.last_execution.is_none());
    assert!(after.last_result.is_none());
    test.assert_mocks();

    Ok(())
}

/// Tests the scope gate for a character without any token.
///
/// Verifies that scoped endpoints are skipped while public ones still run.
///
/// Expected: wallet skipped, profile succeeded
#[tokio::test]
async fn character_without_token_only_syncs_public_endpoints() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    let scheduler = seeded_scheduler(&mut test).await;
    test.eve()
        .insert_mock_character(TEST_CHARACTER_ID, None)
        .await?;
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CHARACTER_PROFILE, None)
        .await?;
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CHARACTER_WALLET, None)
        .await?;
    let endpoint = test.eve().create_esi_endpoint(
        &format!("/characters/{}/", TEST_CHARACTER_ID),
        factory::mock_character_profile("Public", TEST_CORPORATION_ID),
        1,
    );
    test.mocks.push(endpoint);

    let report = scheduler.sync_character(TEST_CHARACTER_ID).await.unwrap();

    assert!(matches!(
        report.outcome(api::CHARACTER_PROFILE),
        Some(SyncOutcome::Succeeded(_))
    ));
    assert_eq!(
        report.outcome(api::CHARACTER_WALLET),
        Some(&SyncOutcome::Skipped(SkipReason::MissingScope))
    );
    test.assert_mocks();

    Ok(())
}
