// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0
//! Barrier-based rendezvous for agents coordinating among themselves.
//!
//! The registry tracks, per barrier id, the set of agent identities that have
//! arrived. No strategy executor consults it; agents that want a mid-round
//! rendezvous (for example two parallel agents exchanging state before their
//! final insights) call it through the coordinator.

use std::collections::HashSet;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::collaboration::Barrier;
use crate::domain::error::CoordinationError;

/// Tracks arrivals per barrier identifier.
#[derive(Default)]
pub struct BarrierRegistry {
    arrivals: DashMap<String, HashSet<String>>,
}

impl BarrierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an agent reached the barrier. Idempotent.
    pub fn arrive(&self, barrier_id: &str, agent_name: &str) {
        let inserted = self
            .arrivals
            .entry(barrier_id.to_string())
            .or_default()
            .insert(agent_name.to_string());
        if inserted {
            debug!(barrier_id, agent_name, "Agent arrived at barrier");
        }
    }

    /// Snapshot of the identities that have arrived at a barrier.
    pub fn arrived(&self, barrier_id: &str) -> HashSet<String> {
        self.arrivals
            .get(barrier_id)
            .map(|set| set.value().clone())
            .unwrap_or_default()
    }

    /// Suspend until every required agent has arrived.
    ///
    /// Polls at `poll_interval` until `barrier.timeout` elapses, then fails
    /// with [`CoordinationError::BarrierTimeout`]. A fired cancellation token
    /// aborts the wait with [`CoordinationError::Cancelled`].
    pub async fn wait(
        &self,
        barrier: &Barrier,
        poll_interval: Duration,
        token: &CancellationToken,
    ) -> Result<(), CoordinationError> {
        let deadline = Instant::now() + barrier.timeout;

        loop {
            if self.is_satisfied(barrier) {
                debug!(barrier_id = %barrier.id, "Barrier released");
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(CoordinationError::BarrierTimeout {
                    barrier_id: barrier.id.clone(),
                    timeout: barrier.timeout,
                });
            }
            tokio::select! {
                _ = token.cancelled() => return Err(CoordinationError::Cancelled),
                _ = tokio::time::sleep(poll_interval) => {}
            }
        }
    }

    fn is_satisfied(&self, barrier: &Barrier) -> bool {
        match self.arrivals.get(&barrier.id) {
            Some(arrived) => barrier.required_agents.is_subset(arrived.value()),
            None => barrier.required_agents.is_empty(),
        }
    }
}
