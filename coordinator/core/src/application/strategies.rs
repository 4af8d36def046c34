// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0
//! Strategy executors.
//!
//! Each executor consumes the ordered participant list plus one shared
//! context and produces reports in a strategy-specific order. Executors do
//! not catch agent faults; a failing `run` propagates to `orchestrate`,
//! which owns the top-level capture.
//!
//! Knowledge flow differs per strategy: sequential shares each report's
//! insights before the next agent runs (so later agents can read them
//! mid-round), while parallel shares only after the full join, so no agent
//! observes another's output until all have finished.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use futures::future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::agent::Agent;
use crate::domain::collaboration::ContinuationCondition;
use crate::domain::context::Context;
use crate::domain::error::CoordinationError;
use crate::domain::report::Report;
use crate::infrastructure::knowledge_store::KnowledgeStore;

async fn invoke(agent: &Arc<dyn Agent>, context: &Context) -> Result<Report> {
    agent
        .run(context)
        .await
        .with_context(|| format!("agent '{}' failed", agent.name()))
}

/// Run agents one at a time in participant order, sharing each report's
/// insights with all other participants before the next agent runs.
pub(crate) async fn run_sequential(
    participants: &[Arc<dyn Agent>],
    context: &Context,
    knowledge: &KnowledgeStore,
    token: &CancellationToken,
) -> Result<Vec<Report>> {
    let names: Vec<String> = participants.iter().map(|a| a.name().to_string()).collect();
    let mut reports = Vec::with_capacity(participants.len());

    for agent in participants {
        if token.is_cancelled() {
            return Err(CoordinationError::Cancelled.into());
        }
        debug!(agent = agent.name(), "Running agent");
        let report = invoke(agent, context).await?;
        knowledge.share(agent.name(), &names, &report.insights).await;
        reports.push(report);
    }

    Ok(reports)
}

/// Fan out every agent at once against the same context and join all of them.
///
/// The join is all-or-nothing: any invocation fault fails the whole round.
/// Results are buffered by input index, so the output order is participant
/// order regardless of real completion order. Insights are shared only after
/// the join, in participant order.
pub(crate) async fn run_parallel(
    participants: &[Arc<dyn Agent>],
    context: &Context,
    knowledge: &KnowledgeStore,
    token: &CancellationToken,
) -> Result<Vec<Report>> {
    if token.is_cancelled() {
        return Err(CoordinationError::Cancelled.into());
    }

    let names: Vec<String> = participants.iter().map(|a| a.name().to_string()).collect();
    debug!(participants = names.len(), "Fanning out parallel agents");

    let reports =
        future::try_join_all(participants.iter().map(|agent| invoke(agent, context))).await?;

    for (agent, report) in participants.iter().zip(&reports) {
        knowledge.share(agent.name(), &names, &report.insights).await;
    }

    Ok(reports)
}

/// Run the first agent unconditionally, then each later agent only if the
/// condition holds over the reports collected so far.
///
/// A skipped agent produces no report and is absent from the result. An
/// absent condition means "always continue".
pub(crate) async fn run_conditional(
    participants: &[Arc<dyn Agent>],
    context: &Context,
    knowledge: &KnowledgeStore,
    condition: Option<&ContinuationCondition>,
    token: &CancellationToken,
) -> Result<Vec<Report>> {
    let names: Vec<String> = participants.iter().map(|a| a.name().to_string()).collect();
    let mut reports: Vec<Report> = Vec::new();

    for (index, agent) in participants.iter().enumerate() {
        if token.is_cancelled() {
            return Err(CoordinationError::Cancelled.into());
        }
        if index > 0 {
            let proceed = condition.map(|check| check(&reports)).unwrap_or(true);
            if !proceed {
                debug!(agent = agent.name(), "Condition not met, skipping agent");
                continue;
            }
        }
        debug!(agent = agent.name(), "Running agent");
        let report = invoke(agent, context).await?;
        knowledge.share(agent.name(), &names, &report.insights).await;
        reports.push(report);
    }

    Ok(reports)
}

/// Run the whole participant list in repeated sequential rounds, accumulating
/// every round's reports, until the condition holds over a round's reports or
/// the iteration budget is exhausted.
///
/// The condition sees only the current round, never the accumulator. An
/// absent condition means the loop always runs the full budget.
pub(crate) async fn run_iterative(
    participants: &[Arc<dyn Agent>],
    context: &Context,
    knowledge: &KnowledgeStore,
    condition: Option<&ContinuationCondition>,
    max_iterations: u32,
    token: &CancellationToken,
) -> Result<Vec<Report>> {
    let mut all_reports = Vec::new();

    for round in 1..=max_iterations {
        debug!(round, max_iterations, "Starting iterative round");
        let round_reports = run_sequential(participants, context, knowledge, token).await?;
        let converged = condition.map(|check| check(&round_reports)).unwrap_or(false);
        all_reports.extend(round_reports);
        if converged {
            debug!(round, "Iteration condition met, stopping early");
            break;
        }
    }

    Ok(all_reports)
}
