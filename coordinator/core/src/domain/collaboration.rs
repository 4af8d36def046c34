// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::agent::Agent;
use crate::domain::report::Report;

/// Rounds an iterative collaboration runs when no bound is given.
pub const DEFAULT_MAX_ITERATIONS: u32 = 5;

/// How long a barrier waits for its required agents before failing.
pub const DEFAULT_BARRIER_TIMEOUT: Duration = Duration::from_secs(30);

/// Closed set of execution policies. Each strategy consumes the ordered
/// participant list plus a context and produces an ordered report list with
/// strategy-specific ordering and propagation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaborationStrategy {
    /// One agent at a time, in participant order; each agent's insights are
    /// shared before the next agent runs.
    Sequential,
    /// All agents concurrently against the same context; all-or-nothing join;
    /// results ordered by participant position, not completion.
    Parallel,
    /// First agent unconditional; each later agent runs only if the
    /// continuation condition holds over the reports so far.
    Conditional,
    /// Repeated sequential rounds up to a bound, stopping early when the
    /// condition holds over a round's reports.
    Iterative,
}

impl std::fmt::Display for CollaborationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollaborationStrategy::Sequential => write!(f, "sequential"),
            CollaborationStrategy::Parallel => write!(f, "parallel"),
            CollaborationStrategy::Conditional => write!(f, "conditional"),
            CollaborationStrategy::Iterative => write!(f, "iterative"),
        }
    }
}

/// Predicate over the reports collected so far, used by the conditional and
/// iterative strategies to decide whether to continue.
pub type ContinuationCondition = Arc<dyn Fn(&[Report]) -> bool + Send + Sync>;

/// A named rendezvous point requiring a specific set of agent identities to
/// arrive before waiters proceed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barrier {
    pub id: String,
    pub required_agents: HashSet<String>,

    #[serde(with = "humantime_serde", default = "default_barrier_timeout")]
    pub timeout: Duration,
}

fn default_barrier_timeout() -> Duration {
    DEFAULT_BARRIER_TIMEOUT
}

impl Barrier {
    pub fn new<I, S>(id: impl Into<String>, required_agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            required_agents: required_agents.into_iter().map(Into::into).collect(),
            timeout: DEFAULT_BARRIER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A coordination request: which agents to run, under which strategy, with
/// optional termination parameters.
///
/// Participant order is itself a contract: sequential and iterative execute
/// in this order, conditional evaluates eligibility in this order, and
/// parallel uses it only for result positions, never for scheduling.
pub struct Collaboration {
    pub coordinator_id: String,
    pub participants: Vec<Arc<dyn Agent>>,
    pub strategy: CollaborationStrategy,

    /// Required by conditional/iterative; ignored otherwise. When absent,
    /// conditional always continues while iterative always runs the full
    /// iteration budget. The two fallbacks differ on purpose.
    pub condition: Option<ContinuationCondition>,

    /// Iteration bound for the iterative strategy. Defaults to
    /// [`DEFAULT_MAX_ITERATIONS`] when absent.
    pub max_iterations: Option<u32>,

    /// Reserved: accepted but not consumed by any strategy executor. Agents
    /// that rendezvous among themselves use the coordinator's barrier
    /// registry directly.
    pub sync_barrier: Option<Barrier>,
}

impl Collaboration {
    pub fn new(
        coordinator_id: impl Into<String>,
        participants: Vec<Arc<dyn Agent>>,
        strategy: CollaborationStrategy,
    ) -> Self {
        Self {
            coordinator_id: coordinator_id.into(),
            participants,
            strategy,
            condition: None,
            max_iterations: None,
            sync_barrier: None,
        }
    }

    pub fn with_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&[Report]) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Arc::new(condition));
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_barrier(mut self, barrier: Barrier) -> Self {
        self.sync_barrier = Some(barrier);
        self
    }

    /// Declared names of all participants, in participant order.
    pub fn participant_names(&self) -> Vec<String> {
        self.participants
            .iter()
            .map(|agent| agent.name().to_string())
            .collect()
    }
}

impl std::fmt::Debug for Collaboration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaboration")
            .field("coordinator_id", &self.coordinator_id)
            .field("participants", &self.participant_names())
            .field("strategy", &self.strategy)
            .field("condition", &self.condition.as_ref().map(|_| "<predicate>"))
            .field("max_iterations", &self.max_iterations)
            .field("sync_barrier", &self.sync_barrier)
            .finish()
    }
}
