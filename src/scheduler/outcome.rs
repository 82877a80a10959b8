//! Per-subscription results of a sync pass.

use std::fmt;

use crate::{reconciler::ReconcileSummary, registry::Handler};

/// Why a subscription was not called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The last successful response is still within the endpoint's cache duration.
    Cached,
    /// The character's token does not grant the endpoint's scope.
    MissingScope,
}

/// What happened to one subscription during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Skipped(SkipReason),
    Succeeded(ReconcileSummary),
    Failed(String),
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Skipped(SkipReason::Cached) => f.write_str("skipped (cached)"),
            SyncOutcome::Skipped(SkipReason::MissingScope) => {
                f.write_str("skipped (missing scope)")
            }
            SyncOutcome::Succeeded(summary) => write!(f, "succeeded ({})", summary),
            SyncOutcome::Failed(error) => write!(f, "failed ({})", error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionOutcome {
    pub api_id: i32,
    pub handler: Handler,
    pub outcome: SyncOutcome,
}

/// Outcomes of one character's pass, in subscription order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub character_id: i64,
    pub outcomes: Vec<SubscriptionOutcome>,
}

impl SyncReport {
    pub fn new(character_id: i64) -> Self {
        Self {
            character_id,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, api_id: i32, handler: Handler, outcome: SyncOutcome) {
        self.outcomes.push(SubscriptionOutcome {
            api_id,
            handler,
            outcome,
        });
    }

    /// Outcome recorded for catalog endpoint `api_id`.
    pub fn outcome(&self, api_id: i32) -> Option<&SyncOutcome> {
        self.outcomes
            .iter()
            .find(|entry| entry.api_id == api_id)
            .map(|entry| &entry.outcome)
    }

    pub fn succeeded(&self) -> usize {
        self.count(|outcome| matches!(outcome, SyncOutcome::Succeeded(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, SyncOutcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, SyncOutcome::Skipped(_)))
    }

    fn count(&self, predicate: impl Fn(&SyncOutcome) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|entry| predicate(&entry.outcome))
            .count()
    }
}
