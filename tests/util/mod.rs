//! Clients and a scheduler wired to a [`TestSetup`]'s mock server.

use std::{sync::Arc, time::Duration};

use esi_sync::{
    esi::{EsiClient, EsiClientConfig, EsiOAuthClient},
    registry::EndpointRegistry,
    scheduler::Scheduler,
    service::retry::RetryContext,
};
use esi_sync_test_utils::{constant::*, TestSetup};

/// Extension trait building production types against the mock server
pub trait TestSetupExt {
    /// ESI client without retries, so failing mocks are hit exactly once per call
    fn esi_client(&self) -> EsiClient;

    fn oauth_client(&self) -> EsiOAuthClient;

    /// Scheduler over the catalog currently stored in the test database
    fn scheduler(&self, registry: EndpointRegistry) -> Scheduler;
}

impl TestSetupExt for TestSetup {
    fn esi_client(&self) -> EsiClient {
        EsiClient::new(
            EsiClientConfig::new(self.url(), TEST_USER_AGENT).with_retry(
                RetryContext::new()
                    .with_max_attempts(1)
                    .with_initial_backoff(Duration::ZERO),
            ),
        )
        .expect("Failed to build ESI client")
    }

    fn oauth_client(&self) -> EsiOAuthClient {
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        EsiOAuthClient::new(
            TEST_ESI_CLIENT_ID,
            TEST_ESI_CLIENT_SECRET,
            &self.url(),
            http_client,
        )
        .expect("Failed to build OAuth client")
    }

    fn scheduler(&self, registry: EndpointRegistry) -> Scheduler {
        Scheduler::new(
            self.db.clone(),
            self.esi_client(),
            self.oauth_client(),
            Arc::new(registry),
        )
    }
}

/// Seeds the endpoint catalog and builds a scheduler over it
pub async fn seeded_scheduler(test: &mut TestSetup) -> Scheduler {
    test.eve()
        .insert_esi_catalog()
        .await
        .expect("Failed to insert catalog");
    let registry = EndpointRegistry::load(&test.db)
        .await
        .expect("Failed to load registry");

    test.scheduler(registry)
}

/// Loads the subscription of `character_id` to `api_id`
pub async fn subscription(
    test: &TestSetup,
    character_id: i64,
    api_id: i32,
) -> entity::character_api::Model {
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

    entity::prelude::CharacterApi::find()
        .filter(entity::character_api::Column::CharacterId.eq(character_id))
        .filter(entity::character_api::Column::ApiId.eq(api_id))
        .one(&test.db)
        .await
        .expect("Failed to query subscription")
        .expect("Subscription should exist")
}
