use esi_sync::{config::Config, scheduler::cron::CronScheduler, startup};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    startup::init_tracing();

    if let Err(e) = run(config).await {
        tracing::error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), esi_sync::error::Error> {
    let esi_client = startup::build_esi_client(&config)?;
    let oauth = startup::build_oauth_client(&config)?;
    let db = startup::connect_to_database(&config).await?;
    let pool = startup::build_sync_pool(&config, db, esi_client, oauth).await?;

    let mut cron = CronScheduler::new().await?;
    cron.start(&config.sync_cron, pool.clone()).await?;

    tracing::info!("Sync engine running, press ctrl-c to stop");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }

    pool.shutdown();
    cron.shutdown().await?;

    tracing::info!("Sync engine stopped");

    Ok(())
}
