//! Tests for running passes over many characters with SyncPool.

use chrono::{Duration, Utc};
use esi_sync::scheduler::pool::{PoolRunSummary, SyncPool, SyncPoolConfig};
use esi_sync_test_utils::prelude::*;
use serde_json::json;

use crate::util::{seeded_scheduler, subscription};

const OTHER_CHARACTER_ID: i64 = 2114794366;

/// Tests a run over every stored character.
///
/// Verifies that each character gets its own pass and that one character's failing
/// subscription does not affect the other character.
///
/// Expected: two completed passes, both subscriptions recorded
#[tokio::test]
async fn run_all_passes_every_character() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    let scheduler = seeded_scheduler(&mut test).await;
    for character_id in [TEST_CHARACTER_ID, OTHER_CHARACTER_ID] {
        test.eve().insert_mock_character(character_id, None).await?;
        test.auth()
            .insert_mock_token(
                character_id,
                &[CHARACTER_WALLET_SCOPE],
                "refresh",
                Utc::now() + Duration::minutes(20),
            )
            .await?;
        test.eve()
            .insert_subscription(character_id, api::CHARACTER_WALLET, None)
            .await?;
    }
    let healthy = test.eve().create_esi_endpoint(
        &format!("/characters/{}/wallet/", TEST_CHARACTER_ID),
        json!(1250.5),
        1,
    );
    let failing = test.eve().create_esi_error_endpoint(
        &format!("/characters/{}/wallet/", OTHER_CHARACTER_ID),
        502,
        1,
    );
    test.mocks.extend([healthy, failing]);

    let pool = SyncPool::new(SyncPoolConfig::new(2), scheduler);
    let summary = pool.run_all().await.unwrap();

    assert_eq!(
        summary,
        PoolRunSummary {
            completed: 2,
            ..Default::default()
        }
    );
    let healthy = subscription(&test, TEST_CHARACTER_ID, api::CHARACTER_WALLET).await;
    assert!(healthy.last_execution.is_some());
    let failing = subscription(&test, OTHER_CHARACTER_ID, api::CHARACTER_WALLET).await;
    assert!(failing.last_execution.is_none());
    assert!(failing.last_result.unwrap().contains("502"));
    assert_eq!(pool.active_pass_count(), 0);
    test.assert_mocks();

    Ok(())
}

/// Tests a run including a character that is not stored.
///
/// Expected: one completed and one failed pass
#[tokio::test]
async fn missing_character_counts_as_failed_pass() -> Result<(), TestError> {
    let mut test = test_setup_with_sync_tables!()?;
    let scheduler = seeded_scheduler(&mut test).await;
    test.eve()
        .insert_mock_character(TEST_CHARACTER_ID, None)
        .await?;

    let pool = SyncPool::new(SyncPoolConfig::new(1), scheduler);
    let summary = pool.run(vec![TEST_CHARACTER_ID, OTHER_CHARACTER_ID]).await;

    assert_eq!(summary.completed, 1);
    assert_eq!(summary.failed, 1);

    Ok(())
}

/// Tests a run after shutdown.
///
/// Verifies that no pass is started once the pool is shut down.
///
/// Expected: one cancelled pass, no request
#[tokio::test]
async fn shut_down_pool_starts_no_passes() -> Result<(), TestError> {
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
        factory::mock_character_profile("Unused", TEST_CORPORATION_ID),
        0,
    );
    test.mocks.push(endpoint);

    let pool = SyncPool::new(SyncPoolConfig::default(), scheduler);
    pool.shutdown();
    let summary = pool.run(vec![TEST_CHARACTER_ID]).await;

    assert!(pool.is_shutdown());
    assert_eq!(summary.cancelled, 1);
    assert_eq!(summary.completed, 0);
    assert!(subscription(&test, TEST_CHARACTER_ID, api::CHARACTER_PROFILE)
        .await
        .last_result
        .is_none());
    test.assert_mocks();

    Ok(())
}
