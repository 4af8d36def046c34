//! Coordinator Application Service
//!
//! The façade for multi-agent collaboration: receives a [`Collaboration`]
//! descriptor plus one [`Context`], dispatches to the matching strategy
//! executor, measures wall-clock execution time, flattens insights, and
//! returns an [`AggregatedReport`].
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Orchestrate one coordination round end to end
//! - **Dependencies:** Domain (Collaboration, Report), Infrastructure
//!   (KnowledgeStore, BarrierRegistry)
//!
//! # Failure capture
//!
//! `orchestrate` never returns an error and never panics. An agent
//! invocation fault, an empty participant list, or a cancellation is caught
//! at this boundary, converted into a single synthetic insight titled
//! `"Orchestration Failed"`, and returned as `success: false` with an
//! accurate `execution_time`. No exception crosses the public boundary.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::application::strategies;
use crate::domain::collaboration::{
    Barrier, Collaboration, CollaborationStrategy, DEFAULT_MAX_ITERATIONS,
};
use crate::domain::context::Context;
use crate::domain::error::CoordinationError;
use crate::domain::insight::Insight;
use crate::domain::knowledge::AgentKnowledge;
use crate::domain::report::{AggregatedReport, Report};
use crate::infrastructure::barrier_registry::BarrierRegistry;
use crate::infrastructure::knowledge_store::KnowledgeStore;

/// Tuning knobs for one coordinator instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Interval at which barrier waits re-check the arrival set.
    #[serde(with = "humantime_serde")]
    pub barrier_poll_interval: Duration,

    /// Iteration budget applied when a collaboration omits `max_iterations`.
    pub default_max_iterations: u32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            barrier_poll_interval: Duration::from_millis(100),
            default_max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Coordinator (Application Service)
///
/// Owns one [`KnowledgeStore`] and one [`BarrierRegistry`]; neither is shared
/// across coordinator instances. Agents that want cross-agent knowledge or a
/// mid-round rendezvous reach both through the accessors below.
pub struct Coordinator {
    config: CoordinatorConfig,
    knowledge: Arc<KnowledgeStore>,
    barriers: Arc<BarrierRegistry>,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::with_config(CoordinatorConfig::default())
    }

    pub fn with_config(config: CoordinatorConfig) -> Self {
        Self {
            config,
            knowledge: Arc::new(KnowledgeStore::new()),
            barriers: Arc::new(BarrierRegistry::new()),
        }
    }

    // ========================================================================
    // Orchestration
    // ========================================================================

    /// Run one coordination round to completion.
    pub async fn orchestrate(
        &self,
        collaboration: &Collaboration,
        context: &Context,
    ) -> AggregatedReport {
        self.orchestrate_with_token(collaboration, context, &CancellationToken::new())
            .await
    }

    /// Run one coordination round under a cancellation token.
    ///
    /// A fired token is fatal and non-retryable: the round is aborted and the
    /// cancellation is captured like any other fault.
    pub async fn orchestrate_with_token(
        &self,
        collaboration: &Collaboration,
        context: &Context,
        token: &CancellationToken,
    ) -> AggregatedReport {
        let started = Instant::now();

        info!(
            coordinator_id = %collaboration.coordinator_id,
            strategy = %collaboration.strategy,
            participants = collaboration.participants.len(),
            request_id = %context.request_id,
            "Starting collaboration"
        );

        match self.dispatch(collaboration, context, token).await {
            Ok(reports) => {
                let all_insights = reports
                    .iter()
                    .flat_map(|report| report.insights.iter().cloned())
                    .collect();

                info!(
                    coordinator_id = %collaboration.coordinator_id,
                    reports = reports.len(),
                    "Collaboration completed"
                );

                AggregatedReport {
                    coordinator_id: collaboration.coordinator_id.clone(),
                    strategy: collaboration.strategy,
                    all_insights,
                    individual_reports: reports,
                    execution_time: started.elapsed(),
                    success: true,
                }
            }
            Err(error) => {
                warn!(
                    coordinator_id = %collaboration.coordinator_id,
                    error = %format!("{error:#}"),
                    "Orchestration failed"
                );

                let synthetic =
                    Insight::error("Orchestration Failed", format!("{error:#}"));

                AggregatedReport {
                    coordinator_id: collaboration.coordinator_id.clone(),
                    strategy: collaboration.strategy,
                    all_insights: vec![synthetic],
                    individual_reports: Vec::new(),
                    execution_time: started.elapsed(),
                    success: false,
                }
            }
        }
    }

    async fn dispatch(
        &self,
        collaboration: &Collaboration,
        context: &Context,
        token: &CancellationToken,
    ) -> Result<Vec<Report>> {
        if collaboration.participants.is_empty() {
            return Err(CoordinationError::NoParticipants.into());
        }

        let participants = collaboration.participants.as_slice();
        match collaboration.strategy {
            CollaborationStrategy::Sequential => {
                strategies::run_sequential(participants, context, &self.knowledge, token).await
            }
            CollaborationStrategy::Parallel => {
                strategies::run_parallel(participants, context, &self.knowledge, token).await
            }
            CollaborationStrategy::Conditional => {
                strategies::run_conditional(
                    participants,
                    context,
                    &self.knowledge,
                    collaboration.condition.as_ref(),
                    token,
                )
                .await
            }
            CollaborationStrategy::Iterative => {
                let max_iterations = collaboration
                    .max_iterations
                    .unwrap_or(self.config.default_max_iterations);
                strategies::run_iterative(
                    participants,
                    context,
                    &self.knowledge,
                    collaboration.condition.as_ref(),
                    max_iterations,
                    token,
                )
                .await
            }
        }
    }

    // ========================================================================
    // Knowledge sharing
    // ========================================================================

    /// Handle to this coordinator's knowledge store, for agents that read
    /// shared knowledge during their own `run`.
    pub fn knowledge_store(&self) -> Arc<KnowledgeStore> {
        self.knowledge.clone()
    }

    /// Share insights from one agent with a set of targets (self-share is a
    /// no-op). The single integration point between executors and the store.
    pub async fn share_insights(
        &self,
        source_agent: &str,
        target_agents: &[String],
        insights: &[Insight],
    ) {
        self.knowledge.share(source_agent, target_agents, insights).await;
    }

    /// Knowledge accumulated for the given agent.
    pub async fn shared_knowledge(&self, agent_name: &str) -> Vec<AgentKnowledge> {
        self.knowledge.get(agent_name).await
    }

    /// Wipe every agent's accumulated knowledge.
    pub async fn clear_knowledge(&self) {
        self.knowledge.clear().await;
    }

    // ========================================================================
    // Barrier hosting
    // ========================================================================

    /// Handle to this coordinator's barrier registry, for agents that
    /// rendezvous among themselves mid-execution.
    pub fn barrier_registry(&self) -> Arc<BarrierRegistry> {
        self.barriers.clone()
    }

    /// Record an agent's arrival at a barrier. Idempotent.
    pub fn arrive_at_barrier(&self, barrier_id: &str, agent_name: &str) {
        self.barriers.arrive(barrier_id, agent_name);
    }

    /// Suspend until every agent the barrier requires has arrived, failing
    /// after the barrier's timeout.
    pub async fn wait_for_barrier(&self, barrier: &Barrier) -> Result<(), CoordinationError> {
        self.barriers
            .wait(barrier, self.config.barrier_poll_interval, &CancellationToken::new())
            .await
    }

    /// Cancellation-aware variant of [`wait_for_barrier`](Self::wait_for_barrier).
    pub async fn wait_for_barrier_with_token(
        &self,
        barrier: &Barrier,
        token: &CancellationToken,
    ) -> Result<(), CoordinationError> {
        self.barriers
            .wait(barrier, self.config.barrier_poll_interval, token)
            .await
    }

    /// Snapshot of identities currently arrived at a barrier.
    pub fn arrived_at_barrier(&self, barrier_id: &str) -> HashSet<String> {
        self.barriers.arrived(barrier_id)
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}
