//! Endpoint catalog loaded once at startup.
//!
//! Each catalog row names an ESI route, how long its responses stay fresh, the scope a token
//! needs for it and the [`Handler`] that reconciles its payload. Rows naming an unknown
//! handler are logged and left out; the rest of the catalog still loads.

pub mod handler;
pub mod path;

use std::collections::HashMap;

use chrono::Duration;
use sea_orm::ConnectionTrait;

pub use handler::Handler;
pub use path::{PathTemplate, PathVars};

use crate::{data::api::EsiApiRepository, error::Error};

/// A resolved catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub id: i32,
    pub name: String,
    pub path: PathTemplate,
    pub cache_duration: Duration,
    pub scope: Option<String>,
    pub group_id: i32,
    pub handler: Handler,
}

/// Immutable lookup of endpoints by catalog id.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    endpoints: HashMap<i32, Endpoint>,
}

impl EndpointRegistry {
    /// Loads every catalog row from the database.
    pub async fn load<C: ConnectionTrait>(db: &C) -> Result<Self, Error> {
        let models = EsiApiRepository::new(db).get_all().await?;
        let registry = Self::from_models(models);

        tracing::info!(endpoints = registry.len(), "Loaded endpoint registry");

        Ok(registry)
    }

    pub fn from_models(models: Vec<entity::esi_api::Model>) -> Self {
        let mut endpoints = HashMap::with_capacity(models.len());

        for model in models {
            let handler = match model.handler.parse::<Handler>() {
                Ok(handler) => handler,
                Err(e) => {
                    tracing::warn!(endpoint = %model.name, "Skipping catalog entry: {}", e);
                    continue;
                }
            };

            endpoints.insert(
                model.id,
                Endpoint {
                    id: model.id,
                    name: model.name,
                    path: PathTemplate::new(model.path),
                    cache_duration: Duration::seconds(model.cache_duration.into()),
                    scope: model.scope.filter(|scope| !scope.is_empty()),
                    group_id: model.group_id,
                    handler,
                },
            );
        }

        Self { endpoints }
    }

    pub fn get(&self, api_id: i32) -> Option<&Endpoint> {
        self.endpoints.get(&api_id)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
