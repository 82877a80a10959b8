//! Tests for cache respect in Scheduler::sync_character_at.
//!
//! A subscription that ran successfully at `T` with cache duration `D` must not call ESI
//! before `T + D` and must call it from `T + D` on.

use chrono::{Duration, SubsecRound, Utc};
use esi_sync::scheduler::{SkipReason, SyncOutcome};
use esi_sync_test_utils::prelude::*;
use serde_json::json;

use crate::util::{seeded_scheduler, subscription};

/// Cache duration of the seeded character wallet endpoint.
const WALLET_CACHE_SECONDS: i64 = 120;

/// Tests a pass inside the cache window.
///
/// Verifies that a subscription whose cache has not elapsed is skipped without a
/// request and without touching its schedule state.
///
/// Expected: Skipped(Cached), no request, subscription unchanged
#[tokio::test]
async fn skips_subscription_within_cache_duration() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    let scheduler = seeded_scheduler(&mut test).await;
    let last_execution = Utc::now().trunc_subsecs(0);
    test.eve()
        .insert_mock_character(TEST_CHARACTER_ID, None)
        .await?;
    test.auth()
        .insert_mock_token(
            TEST_CHARACTER_ID,
            &[CHARACTER_WALLET_SCOPE],
            "refresh",
            last_execution + Duration::minutes(20),
        )
        .await?;
    let before = test
        .eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CHARACTER_WALLET, Some(last_execution))
        .await?;
    let endpoint = test.eve().create_esi_endpoint(
        &format!("/characters/{}/wallet/", TEST_CHARACTER_ID),
        json!(1.0),
        0,
    );
    test.mocks.push(endpoint);

    let now = last_execution + Duration::seconds(WALLET_CACHE_SECONDS - 1);
    let report = scheduler
        .sync_character_at(TEST_CHARACTER_ID, now)
        .await
        .unwrap();

    assert_eq!(
        report.outcome(api::CHARACTER_WALLET),
        Some(&SyncOutcome::Skipped(SkipReason::Cached))
    );
    assert_eq!(
        subscription(&test, TEST_CHARACTER_ID, api::CHARACTER_WALLET).await,
        before
    );
    test.assert_mocks();

    Ok(())
}

/// Tests a pass exactly when the cache elapses.
///
/// Verifies that the call happens at `T + D` and that success advances
/// `last_execution` to the pass time and records the summary.
///
/// Expected: Succeeded, one request, last_execution = now
#[tokio::test]
async fn calls_endpoint_once_cache_elapses() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    let scheduler = seeded_scheduler(&mut test).await;
    let last_execution = Utc::now().trunc_subsecs(0);
    test.eve()
        .insert_mock_character(TEST_CHARACTER_ID, None)
        .await?;
    let token = test
        .auth()
        .insert_mock_token(
            TEST_CHARACTER_ID,
            &[CHARACTER_WALLET_SCOPE],
            "refresh",
            last_execution + Duration::minutes(20),
        )
        .await?;
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CHARACTER_WALLET, Some(last_execution))
        .await?;
    let endpoint = test.eve().create_authed_esi_endpoint(
        &format!("/characters/{}/wallet/", TEST_CHARACTER_ID),
        &token.access_token,
        json!(1234.5),
        1,
    );
    test.mocks.push(endpoint);

    let now = last_execution + Duration::seconds(WALLET_CACHE_SECONDS);
    let report = scheduler
        .sync_character_at(TEST_CHARACTER_ID, now)
        .await
        .unwrap();

    assert!(matches!(
        report.outcome(api::CHARACTER_WALLET),
        Some(SyncOutcome::Succeeded(_))
    ));

    let after = subscription(&test, TEST_CHARACTER_ID, api::CHARACTER_WALLET).await;
    assert_eq!(
        after.last_execution.map(|t| t.trunc_subsecs(0)),
        Some(now.naive_utc())
    );
    assert_eq!(
        after.last_result.as_deref(),
        Some("fetched=1 inserted=1 updated=0")
    );
    test.assert_mocks();

    Ok(())
}

/// Tests a subscription that never ran.
///
/// Verifies that a null `last_execution` is always due, even for an endpoint with a
/// long cache duration.
///
/// Expected: Succeeded with one request
#[tokio::test]
async fn never_run_subscription_is_due() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    let scheduler = seeded_scheduler(&mut test).await;
    test.eve()
        .insert_mock_character(TEST_CHARACTER_ID, None)
        .await?;
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CHARACTER_PROFILE, None)
        .await?;
    let endpoint = test.eve().create_esi_endpoint(
        &format!("/characters/{}/", TEST_CHARACTER_ID),
        factory::mock_character_profile("Profile Name", TEST_CORPORATION_ID),
        1,
    );
    test.mocks.push(endpoint);

    let report = scheduler.sync_character(TEST_CHARACTER_ID).await.unwrap();

    assert_eq!(report.succeeded(), 1);
    test.assert_mocks();

    Ok(())
}
