//! Reconcilers mapping one endpoint's payload onto durable rows.
//!
//! Every reconciler receives a [`SyncContext`] for one (character, endpoint) pair, performs
//! its ESI call(s) and writes the result scoped by the owning character or corporation.
//! Multi-row writes run inside a transaction so a failed reconcile persists nothing.

pub mod division;
pub mod journal;
pub mod profile;
pub mod transaction;
pub mod wallet;

use std::fmt;

use sea_orm::DatabaseConnection;

use crate::{
    data::{character::CharacterRepository, UpsertOutcome},
    error::{sync::SyncError, Error},
    esi::EsiClient,
    registry::{Endpoint, PathVars},
};

/// Everything a reconciler needs for one subscription.
pub struct SyncContext<'a> {
    pub db: &'a DatabaseConnection,
    pub esi_client: &'a EsiClient,
    pub character_id: i64,
    pub endpoint: &'a Endpoint,
    /// Bearer token, already validated. `None` for public endpoints.
    pub access_token: Option<&'a str>,
}

impl<'a> SyncContext<'a> {
    /// Current corporation of the character.
    ///
    /// Read from the database rather than captured at pass start so a profile refreshed
    /// earlier in the same pass is honored.
    pub async fn corporation_id(&self) -> Result<Option<i64>, Error> {
        let character = CharacterRepository::new(self.db)
            .get_by_character_id(self.character_id)
            .await?
            .ok_or(SyncError::CharacterNotFound(self.character_id))?;

        Ok(character.corporation_id)
    }

    /// The endpoint path expanded with `vars`.
    pub fn path(&self, vars: &PathVars) -> Result<String, Error> {
        Ok(self.endpoint.path.expand(vars)?)
    }

    pub fn vars(&self) -> PathVars {
        PathVars::character(self.character_id)
    }
}

/// Counts reported by a reconciler and written to the subscription's `last_result`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub fetched: u64,
    pub inserted: u64,
    pub updated: u64,
}

impl ReconcileSummary {
    pub fn fetched(fetched: u64) -> Self {
        Self {
            fetched,
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Inserted => self.inserted += 1,
            UpsertOutcome::Updated => self.updated += 1,
        }
    }
}

impl fmt::Display for ReconcileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fetched={} inserted={} updated={}",
            self.fetched, self.inserted, self.updated
        )
    }
}

#[cfg(test)]
pub(crate) mod test {
    use esi_sync_test_utils::TestSetup;

    use crate::{
        esi::EsiClient,
        registry::{Endpoint, EndpointRegistry},
        util::test::TestClients,
    };

    /// Clients and the seeded catalog for reconciler tests.
    pub struct ReconcileSetup {
        pub esi_client: EsiClient,
        pub registry: EndpointRegistry,
    }

    impl ReconcileSetup {
        /// Seeds the catalog into `test` and loads it.
        pub async fn new(test: &mut TestSetup) -> Self {
            test.eve()
                .insert_esi_catalog()
                .await
                .expect("Failed to insert catalog");
            let registry = EndpointRegistry::load(&test.db)
                .await
                .expect("Failed to load registry");

            Self {
                esi_client: test.esi_client(),
                registry,
            }
        }

        pub fn endpoint(&self, api_id: i32) -> &Endpoint {
            self.registry.get(api_id).expect("Endpoint not seeded")
        }
    }
}
