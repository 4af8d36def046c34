// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0

use std::time::Duration;

use thiserror::Error;

/// Errors raised by the coordination core itself.
///
/// Agent invocation faults surface as `anyhow::Error` from [`Agent::run`]
/// and are wrapped with context by the strategy executors; every variant
/// here, like those faults, is caught at the `orchestrate` boundary and
/// folded into a failed [`AggregatedReport`].
///
/// [`Agent::run`]: crate::domain::agent::Agent::run
/// [`AggregatedReport`]: crate::domain::report::AggregatedReport
#[derive(Debug, Error)]
pub enum CoordinationError {
    #[error("collaboration has no participants")]
    NoParticipants,

    #[error("barrier '{barrier_id}' timed out after {timeout:?}")]
    BarrierTimeout { barrier_id: String, timeout: Duration },

    #[error("orchestration cancelled")]
    Cancelled,
}
