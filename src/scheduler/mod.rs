//! Per-character sync passes.
//!
//! A pass walks every subscription of one character. Each subscription is skipped while its
//! last successful response is within the endpoint's cache duration, or when the character's
//! token lacks the endpoint's scope. Otherwise its reconciler runs: success advances
//! `last_execution`, failure only records the error so the next pass retries immediately.
//! A failing subscription never stops the rest of the pass.

pub mod cron;
pub mod outcome;
pub mod pool;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

pub use outcome::{SkipReason, SyncOutcome, SyncReport};

use crate::{
    data::{
        character::CharacterRepository, subscription::SubscriptionRepository,
        token::AccessTokenRepository,
    },
    error::{sync::SyncError, Error},
    esi::{EsiClient, EsiOAuthClient, Scopes},
    reconciler::SyncContext,
    registry::{Endpoint, EndpointRegistry},
    service::token::{granted_scopes, TokenService},
    util::time::is_due,
};

/// Bearer token resolution, performed at most once per pass.
enum BearerToken {
    Unresolved,
    Valid(String),
    Failed(String),
}

/// Runs sync passes. Cheap to clone.
#[derive(Clone)]
pub struct Scheduler {
    db: DatabaseConnection,
    esi_client: EsiClient,
    oauth: EsiOAuthClient,
    registry: Arc<EndpointRegistry>,
}

impl Scheduler {
    pub fn new(
        db: DatabaseConnection,
        esi_client: EsiClient,
        oauth: EsiOAuthClient,
        registry: Arc<EndpointRegistry>,
    ) -> Self {
        Self {
            db,
            esi_client,
            oauth,
            registry,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn sync_character(&self, character_id: i64) -> Result<SyncReport, Error> {
        self.sync_character_at(character_id, Utc::now()).await
    }

    /// Runs one pass for `character_id` as of `now`.
    ///
    /// # Returns
    /// - `Ok(SyncReport)` - Outcome of every subscription with a known endpoint
    /// - `Err(Error::SyncError(SyncError::CharacterNotFound))` - Character is not stored
    /// - `Err(Error::DbErr)` - Loading subscriptions or recording an outcome failed
    pub async fn sync_character_at(
        &self,
        character_id: i64,
        now: DateTime<Utc>,
    ) -> Result<SyncReport, Error> {
        if CharacterRepository::new(&self.db)
            .get_by_character_id(character_id)
            .await?
            .is_none()
        {
            return Err(SyncError::CharacterNotFound(character_id).into());
        }

        let subscriptions = SubscriptionRepository::new(&self.db)
            .get_by_character_id(character_id)
            .await?;

        // Scope pre-check reads the current token without refreshing it.
        let granted: Scopes = AccessTokenRepository::new(&self.db)
            .get_by_character_id(character_id)
            .await?
            .map(|token| granted_scopes(&token))
            .unwrap_or_default();

        let mut bearer = BearerToken::Unresolved;
        let mut report = SyncReport::new(character_id);

        for subscription in subscriptions {
            let Some(endpoint) = self.registry.get(subscription.api_id) else {
                tracing::warn!(
                    character_id,
                    api_id = subscription.api_id,
                    "Subscription references an endpoint missing from the registry"
                );
                continue;
            };

            let outcome = self
                .sync_subscription(&subscription, endpoint, &granted, &mut bearer, now)
                .await?;

            report.push(endpoint.id, endpoint.handler, outcome);
        }

        tracing::info!(
            character_id,
            succeeded = report.succeeded(),
            failed = report.failed(),
            skipped = report.skipped(),
            "Finished sync pass"
        );

        Ok(report)
    }

    async fn sync_subscription(
        &self,
        subscription: &entity::character_api::Model,
        endpoint: &Endpoint,
        granted: &Scopes,
        bearer: &mut BearerToken,
        now: DateTime<Utc>,
    ) -> Result<SyncOutcome, Error> {
        let character_id = subscription.character_id;

        if !is_due(subscription.last_execution, endpoint.cache_duration, now) {
            tracing::trace!(character_id, endpoint = %endpoint.name, "Cached, skipping");
            return Ok(SyncOutcome::Skipped(SkipReason::Cached));
        }

        if let Some(scope) = &endpoint.scope {
            if !granted.contains(scope) {
                tracing::debug!(
                    character_id,
                    endpoint = %endpoint.name,
                    scope = %scope,
                    "Token lacks scope, skipping"
                );
                return Ok(SyncOutcome::Skipped(SkipReason::MissingScope));
            }
        }

        let subscription_repo = SubscriptionRepository::new(&self.db);

        let access_token = if endpoint.handler.requires_auth() {
            match self.bearer_token(character_id, bearer, now).await {
                Ok(token) => Some(token),
                Err(error) => {
                    tracing::warn!(
                        character_id,
                        endpoint = %endpoint.name,
                        "No valid access token: {}",
                        error
                    );
                    subscription_repo
                        .record_failure(subscription.id, &error)
                        .await?;
                    return Ok(SyncOutcome::Failed(error));
                }
            }
        } else {
            None
        };

        let ctx = SyncContext {
            db: &self.db,
            esi_client: &self.esi_client,
            character_id,
            endpoint,
            access_token: access_token.as_deref(),
        };

        match endpoint.handler.reconcile(&ctx).await {
            Ok(summary) => {
                tracing::debug!(
                    character_id,
                    endpoint = %endpoint.name,
                    handler = %endpoint.handler,
                    %summary,
                    "Reconciled endpoint"
                );
                subscription_repo
                    .record_success(subscription.id, now, &summary.to_string())
                    .await?;
                Ok(SyncOutcome::Succeeded(summary))
            }
            Err(e) => {
                let error = e.to_string();
                tracing::warn!(
                    character_id,
                    endpoint = %endpoint.name,
                    handler = %endpoint.handler,
                    "Reconcile failed: {}",
                    error
                );
                subscription_repo
                    .record_failure(subscription.id, &error)
                    .await?;
                Ok(SyncOutcome::Failed(error))
            }
        }
    }

    /// Resolves the character's bearer token on first use, refreshing it if expired.
    ///
    /// A failed resolution is remembered so the SSO is not asked again within the pass.
    async fn bearer_token(
        &self,
        character_id: i64,
        bearer: &mut BearerToken,
        now: DateTime<Utc>,
    ) -> Result<String, String> {
        if let BearerToken::Unresolved = bearer {
            *bearer = match TokenService::new(&self.db, &self.oauth)
                .valid_access_token_at(character_id, now)
                .await
            {
                Ok(token) => BearerToken::Valid(token.access_token),
                Err(e) => BearerToken::Failed(e.to_string()),
            };
        }

        match bearer {
            BearerToken::Valid(token) => Ok(token.clone()),
            BearerToken::Failed(error) => Err(error.clone()),
            BearerToken::Unresolved => Err("access token unresolved".to_string()),
        }
    }
}
