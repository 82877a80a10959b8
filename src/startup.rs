use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    error::Error,
    esi::{EsiClient, EsiClientConfig, EsiOAuthClient},
    registry::EndpointRegistry,
    scheduler::{
        pool::{SyncPool, SyncPoolConfig},
        Scheduler,
    },
};

/// Install the fmt subscriber, filtered by `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Build the ESI client with the configured user agent, timeout and request cap
pub fn build_esi_client(config: &Config) -> Result<EsiClient, Error> {
    EsiClient::new(
        EsiClientConfig::new(&config.esi_base_url, &config.user_agent)
            .with_timeout(config.esi_request_timeout)
            .with_max_concurrent_requests(config.esi_max_concurrent_requests),
    )
}

/// Build the SSO token client
pub fn build_oauth_client(config: &Config) -> Result<EsiOAuthClient, Error> {
    let http_client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.esi_request_timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    EsiOAuthClient::new(
        &config.esi_client_id,
        &config.esi_client_secret,
        &config.esi_login_url,
        http_client,
    )
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Load the endpoint catalog and build the sync pool
pub async fn build_sync_pool(
    config: &Config,
    db: DatabaseConnection,
    esi_client: EsiClient,
    oauth: EsiOAuthClient,
) -> Result<SyncPool, Error> {
    let registry = EndpointRegistry::load(&db).await?;
    let scheduler = Scheduler::new(db, esi_client, oauth, Arc::new(registry));

    let pool_config =
        SyncPoolConfig::new(config.sync_workers).with_pass_timeout(config.sync_pass_timeout);

    Ok(SyncPool::new(pool_config, scheduler))
}
