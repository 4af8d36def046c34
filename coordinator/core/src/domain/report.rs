// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::collaboration::CollaborationStrategy;
use crate::domain::insight::Insight;

/// The complete output of one agent invocation.
///
/// Created by a single `run` call and never mutated after return; owned
/// thereafter by whichever strategy executor collected it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Identity of the producing agent; matches the agent's declared name.
    pub agent: String,

    /// Findings in the order the agent produced them. Possibly empty.
    pub insights: Vec<Insight>,

    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Build a report stamped with the current time.
    pub fn new(agent: impl Into<String>, insights: Vec<Insight>) -> Self {
        Self {
            agent: agent.into(),
            insights,
            generated_at: Utc::now(),
        }
    }
}

/// The coordinator's return value for one `orchestrate` call.
///
/// `success: false` with a single "Orchestration Failed" insight indicates an
/// infrastructure fault; `success: true` containing error-signal insights
/// means the pipeline ran to completion but found problems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedReport {
    pub coordinator_id: String,
    pub strategy: CollaborationStrategy,

    /// Concatenation of every report's insights, preserving report order and
    /// insight order within each report. No reordering, no deduplication.
    pub all_insights: Vec<Insight>,

    /// Per-agent reports in executor-determined order.
    pub individual_reports: Vec<Report>,

    /// Wall-clock time measured around the whole dispatch.
    #[serde(with = "humantime_serde")]
    pub execution_time: Duration,

    pub success: bool,
}
