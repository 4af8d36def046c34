// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0
//! Application layer: the coordinator façade and its strategy executors.

pub mod coordinator;
pub(crate) mod strategies;
