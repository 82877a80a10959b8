//! Bounded pool running one sync pass per character.
//!
//! Passes for different characters run concurrently up to the configured limit. A character
//! already being synced is not started again until its pass ends, so overlapping ticks
//! never run two passes for the same character. Every pass runs under a timeout and is
//! dropped on shutdown; a dropped pass rolls back its open transaction and records nothing
//! for the subscription it was working on.

mod config;

pub use config::SyncPoolConfig;

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use tokio::{
    sync::{watch, OwnedSemaphorePermit, Semaphore},
    task::JoinSet,
};

use crate::{
    data::character::CharacterRepository,
    error::{sync::SyncError, Error},
    scheduler::Scheduler,
};

/// Totals for one [`SyncPool::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolRunSummary {
    pub completed: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub cancelled: usize,
    /// Characters whose previous pass was still running.
    pub already_running: usize,
}

enum PassResult {
    Completed,
    Failed,
    TimedOut,
    Cancelled,
}

/// Sync pool. Cheap to clone, clones share the same limit and in-flight set.
#[derive(Clone)]
pub struct SyncPool {
    inner: Arc<SyncPoolRef>,
}

struct SyncPoolRef {
    config: SyncPoolConfig,
    scheduler: Scheduler,
    semaphore: Arc<Semaphore>,
    in_flight: Mutex<HashSet<i64>>,
    shutdown: watch::Sender<bool>,
}

/// Removes a character from the in-flight set when its pass ends, even by panic.
struct InFlightGuard {
    pool: Arc<SyncPoolRef>,
    character_id: i64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.pool.in_flight.lock() {
            in_flight.remove(&self.character_id);
        }
    }
}

impl SyncPool {
    pub fn new(config: SyncPoolConfig, scheduler: Scheduler) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_passes));
        let (shutdown, _) = watch::channel(false);

        Self {
            inner: Arc::new(SyncPoolRef {
                config,
                scheduler,
                semaphore,
                in_flight: Mutex::new(HashSet::new()),
                shutdown,
            }),
        }
    }

    /// Runs a pass for every stored character.
    pub async fn run_all(&self) -> Result<PoolRunSummary, Error> {
        let character_ids = CharacterRepository::new(self.inner.scheduler.db())
            .get_all_character_ids()
            .await?;

        Ok(self.run(character_ids).await)
    }

    /// Runs one pass per character and waits for all of them.
    ///
    /// A failing or timed out pass is logged and never affects the others.
    pub async fn run(&self, character_ids: Vec<i64>) -> PoolRunSummary {
        let mut summary = PoolRunSummary::default();
        let mut shutdown = self.inner.shutdown.subscribe();
        let mut passes = JoinSet::new();

        for character_id in character_ids {
            let Some(guard) = self.claim(character_id) else {
                tracing::debug!(character_id, "Pass already running, skipping");
                summary.already_running += 1;
                continue;
            };

            let permit = tokio::select! {
                // Shutdown takes priority over starting new passes.
                biased;

                _ = shutdown.wait_for(|stop| *stop) => None,
                permit = self.inner.semaphore.clone().acquire_owned() => permit.ok(),
            };
            let Some(permit) = permit else {
                summary.cancelled += 1;
                break;
            };

            let pool = self.clone();
            passes.spawn(async move { pool.execute_pass(guard, permit).await });
        }

        while let Some(result) = passes.join_next().await {
            match result {
                Ok(PassResult::Completed) => summary.completed += 1,
                Ok(PassResult::Failed) => summary.failed += 1,
                Ok(PassResult::TimedOut) => summary.timed_out += 1,
                Ok(PassResult::Cancelled) => summary.cancelled += 1,
                Err(e) => {
                    tracing::error!("Sync pass panicked: {:?}", e);
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            completed = summary.completed,
            failed = summary.failed,
            timed_out = summary.timed_out,
            cancelled = summary.cancelled,
            already_running = summary.already_running,
            "Sync run finished"
        );

        summary
    }

    /// Stops starting new passes and cancels running ones.
    pub fn shutdown(&self) {
        tracing::info!("Shutting down sync pool");

        self.inner.semaphore.close();
        self.inner.shutdown.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.inner.shutdown.borrow()
    }

    /// Number of passes currently running.
    pub fn active_pass_count(&self) -> usize {
        self.inner
            .in_flight
            .lock()
            .map(|in_flight| in_flight.len())
            .unwrap_or_default()
    }

    fn claim(&self, character_id: i64) -> Option<InFlightGuard> {
        let mut in_flight = self.inner.in_flight.lock().ok()?;
        if !in_flight.insert(character_id) {
            return None;
        }

        Some(InFlightGuard {
            pool: Arc::clone(&self.inner),
            character_id,
        })
    }

    async fn execute_pass(
        &self,
        guard: InFlightGuard,
        _permit: OwnedSemaphorePermit,
    ) -> PassResult {
        let character_id = guard.character_id;
        let timeout = self.inner.config.pass_timeout();
        let mut shutdown = self.inner.shutdown.subscribe();
        let pass = tokio::time::timeout(timeout, self.inner.scheduler.sync_character(character_id));

        let result = tokio::select! {
            biased;

            _ = shutdown.wait_for(|stop| *stop) => {
                tracing::info!(character_id, "Sync pass cancelled by shutdown");
                return PassResult::Cancelled;
            }

            result = pass => result,
        };

        match result {
            Ok(Ok(_)) => PassResult::Completed,
            Ok(Err(e)) => {
                tracing::error!(character_id, "Sync pass failed: {}", e);
                PassResult::Failed
            }
            Err(_) => {
                let error = SyncError::PassTimedOut {
                    character_id,
                    timeout_secs: timeout.as_secs(),
                };
                tracing::error!(character_id, "{}", error);
                PassResult::TimedOut
            }
        }
    }
}
