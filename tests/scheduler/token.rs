//! Tests for token refresh transparency during a sync pass.

use chrono::{Duration, Utc};
use esi_sync::{data::token::AccessTokenRepository, scheduler::SyncOutcome};
use esi_sync_test_utils::prelude::*;
use serde_json::json;

use crate::util::{seeded_scheduler, subscription};

/// Tests a pass with an expired token.
///
/// Verifies that the refresh endpoint is called exactly once for all authenticated
/// subscriptions of the pass, that they are called with the new token and that the new
/// token is persisted even though one of those calls fails.
///
/// Expected: one refresh, new token stored, wallet failed, journal succeeded
#[tokio::test]
async fn expired_token_is_refreshed_once_and_persisted() -> Result<(), TestError> {
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
            Utc::now() - Duration::minutes(5),
        )
        .await?;
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CHARACTER_WALLET, None)
        .await?;
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CHARACTER_WALLET_JOURNAL, None)
        .await?;

    let fresh = auth_factory::mock_access_token(
        TEST_CHARACTER_ID,
        &[CHARACTER_WALLET_SCOPE],
        Utc::now() + Duration::minutes(20),
    )?;
    let refresh = test
        .auth()
        .create_refresh_endpoint("refresh", &fresh, Some("rotated"), 1);
    let wallet = test
        .server
        .mock("GET", format!("/characters/{}/wallet/", TEST_CHARACTER_ID).as_str())
        .match_header("authorization", format!("Bearer {}", fresh).as_str())
        .with_status(503)
        .expect(1)
        .create();
    let journal = test.eve().create_authed_esi_endpoint(
        &format!("/characters/{}/wallet/journal/", TEST_CHARACTER_ID),
        &fresh,
        json!([factory::mock_journal_entry(1, 10.0)]),
        1,
    );
    test.mocks.extend([refresh, wallet, journal]);

    let report = scheduler.sync_character(TEST_CHARACTER_ID).await.unwrap();

    assert!(matches!(
        report.outcome(api::CHARACTER_WALLET),
        Some(SyncOutcome::Failed(_))
    ));
    assert!(matches!(
        report.outcome(api::CHARACTER_WALLET_JOURNAL),
        Some(SyncOutcome::Succeeded(_))
    ));

    let stored = AccessTokenRepository::new(&test.db)
        .get_by_character_id(TEST_CHARACTER_ID)
        .await?
        .unwrap();
    assert_eq!(stored.access_token, fresh);
    assert_eq!(stored.refresh_token, "rotated");
    test.assert_mocks();

    Ok(())
}

/// Tests a pass whose token refresh is rejected.
///
/// Verifies that every authenticated subscription fails with the refresh error after a
/// single refresh attempt, public subscriptions still run and the stored token is kept.
///
/// Expected: wallet failed, profile succeeded, token unchanged
#[tokio::test]
async fn rejected_refresh_fails_authenticated_subscriptions() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    let scheduler = seeded_scheduler(&mut test).await;
    test.eve()
        .insert_mock_character(TEST_CHARACTER_ID, None)
        .await?;
    let expired = test
        .auth()
        .insert_mock_token(
            TEST_CHARACTER_ID,
            &[CHARACTER_WALLET_SCOPE],
            "revoked",
            Utc::now() - Duration::minutes(5),
        )
        .await?;
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CHARACTER_WALLET, None)
        .await?;
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CHARACTER_WALLET_JOURNAL, None)
        .await?;
    test.eve()
        .insert_subscription(TEST_CHARACTER_ID, api::CHARACTER_PROFILE, None)
        .await?;
    let refresh = test.auth().create_token_error_endpoint(400, 1);
    let profile = test.eve().create_esi_endpoint(
        &format!("/characters/{}/", TEST_CHARACTER_ID),
        factory::mock_character_profile("Public", TEST_CORPORATION_ID),
        1,
    );
    test.mocks.extend([refresh, profile]);

    let report = scheduler.sync_character(TEST_CHARACTER_ID).await.unwrap();

    assert_eq!(report.failed(), 2);
    assert_eq!(report.succeeded(), 1);

    let wallet = subscription(&test, TEST_CHARACTER_ID, api::CHARACTER_WALLET).await;
    assert!(wallet.last_execution.is_none());
    assert!(wallet.last_result.is_some());

    let stored = AccessTokenRepository::new(&test.db)
        .get_by_character_id(TEST_CHARACTER_ID)
        .await?
        .unwrap();
    assert_eq!(stored, expired);
    test.assert_mocks();

    Ok(())
}
