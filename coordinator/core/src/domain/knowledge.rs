// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::insight::Insight;

/// A knowledge-sharing record: insights one agent contributed to another.
///
/// Entries are append-only per target agent; the store never removes them
/// except via an explicit `clear` that wipes everything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentKnowledge {
    pub source_agent: String,
    pub timestamp: DateTime<Utc>,
    pub insights: Vec<Insight>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl AgentKnowledge {
    /// Build a record stamped with the current time.
    pub fn new(source_agent: impl Into<String>, insights: Vec<Insight>) -> Self {
        Self {
            source_agent: source_agent.into(),
            timestamp: Utc::now(),
            insights,
            metadata: None,
        }
    }
}
