// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure layer: in-process shared-state primitives owned by a
//! single coordinator instance.

pub mod barrier_registry;
pub mod knowledge_store;
