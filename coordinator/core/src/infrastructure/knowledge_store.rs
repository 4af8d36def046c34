// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0
//! Cross-agent knowledge registry for one coordinator.
//!
//! Maps each agent identity to the knowledge entries other agents contributed
//! to it within a coordination round. All writes happen at the executors'
//! synchronization points (post-invocation for sequential rounds, post-join
//! for parallel), so a plain `RwLock`-guarded map is sufficient.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::insight::Insight;
use crate::domain::knowledge::AgentKnowledge;

/// In-process map from agent identity to accumulated knowledge entries.
#[derive(Default)]
pub struct KnowledgeStore {
    entries: RwLock<HashMap<String, Vec<AgentKnowledge>>>,
}

impl KnowledgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one timestamped entry to every target agent except the source.
    ///
    /// Self-sharing is a silent no-op, not an error. Entries are append-only;
    /// nothing removes them short of [`clear`](Self::clear).
    pub async fn share(&self, source_agent: &str, target_agents: &[String], insights: &[Insight]) {
        let mut entries = self.entries.write().await;
        for target in target_agents {
            if target == source_agent {
                continue;
            }
            entries
                .entry(target.clone())
                .or_default()
                .push(AgentKnowledge::new(source_agent, insights.to_vec()));
        }
        debug!(
            source_agent,
            targets = target_agents.len(),
            insights = insights.len(),
            "Shared insights"
        );
    }

    /// Knowledge accumulated for the given agent. Empty if none.
    pub async fn get(&self, agent_name: &str) -> Vec<AgentKnowledge> {
        let entries = self.entries.read().await;
        entries.get(agent_name).cloned().unwrap_or_default()
    }

    /// Wipe the entire store unconditionally.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
