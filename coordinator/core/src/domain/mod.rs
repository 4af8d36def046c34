// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0
//! Domain layer: value types exchanged between agents and the coordinator.

pub mod agent;
pub mod collaboration;
pub mod context;
pub mod error;
pub mod insight;
pub mod knowledge;
pub mod report;
