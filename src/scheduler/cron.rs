//! Periodic sync ticks.

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::Error, scheduler::pool::SyncPool};

/// Runs [`SyncPool::run_all`] on a cron schedule.
pub struct CronScheduler {
    sched: JobScheduler,
}

impl CronScheduler {
    /// Creates a new instance of [`CronScheduler`].
    ///
    /// # Returns
    /// - `Ok(CronScheduler)` - Scheduler created, not yet started
    /// - `Err(Error::SchedulerError)` - The underlying job scheduler failed to initialize
    pub async fn new() -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { sched })
    }

    /// Registers the sync tick and starts the scheduler.
    ///
    /// # Arguments
    /// - `cron` - Six-field cron expression (with seconds), e.g. `0 */5 * * * *`
    /// - `pool` - Pool whose `run_all` is invoked every tick
    ///
    /// # Returns
    /// - `Ok(())` - Job registered and scheduler started
    /// - `Err(Error::SchedulerError)` - Invalid cron expression or scheduler failure
    pub async fn start(&mut self, cron: &str, pool: SyncPool) -> Result<(), Error> {
        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let pool = pool.clone();

                Box::pin(async move {
                    if pool.is_shutdown() {
                        return;
                    }

                    match pool.run_all().await {
                        Ok(summary) => tracing::debug!(?summary, "Sync tick finished"),
                        Err(e) => tracing::error!("Error running sync tick: {:?}", e),
                    }
                })
            })?)
            .await?;

        self.sched.start().await?;

        tracing::info!(cron, "Sync scheduler started");

        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<(), Error> {
        self.sched.shutdown().await?;
        Ok(())
    }
}
