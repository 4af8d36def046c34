// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::context::Context;
use crate::domain::report::Report;

/// The single capability the coordinator requires of a participant.
///
/// Anything that can accept a shared context and asynchronously produce a
/// report is an agent; no hierarchy beyond this trait. Concrete analyzers
/// (architecture, security, DevOps, QA, ...) live outside this crate.
///
/// # Contract
///
/// Ordinary negative findings are expressed as warn/error insights inside the
/// returned [`Report`], never as `Err`. Returning `Err` signals an
/// infrastructure-level fault and is fatal to the whole orchestration, so
/// implementations are expected to be defensive and convert recoverable
/// problems into insights.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Declared identity. [`Report::agent`] must match this value.
    fn name(&self) -> &str;

    /// Produce a report for one coordination round.
    ///
    /// The context is shared across all participants and must be treated as
    /// read-only. An agent may perform its own I/O internally; that is opaque
    /// to the coordination core.
    async fn run(&self, context: &Context) -> Result<Report>;
}
