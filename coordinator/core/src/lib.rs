// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0
//! Concord coordinator core.
//!
//! Composes independent diagnostic agents into orchestrated execution
//! pipelines: sequential, parallel, conditional, and iterative strategies
//! with cross-agent knowledge sharing and barrier-based synchronization.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Coordination primitives and the `orchestrate` façade

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
pub use application::coordinator::{Coordinator, CoordinatorConfig};
