// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input handed to every agent invocation within one coordination round.
///
/// The same `Context` is passed (by reference) to every participant, so it is
/// immutable for the duration of one `orchestrate` call. Agents must treat it
/// as read-only; nothing in the coordination core writes to it after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    /// Opaque correlation id, supplied by the caller.
    pub request_id: String,

    /// Creation time of the coordination round.
    pub timestamp: DateTime<Utc>,

    /// Free-form structured input for the agents.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub payload: HashMap<String, serde_json::Value>,
}

impl Context {
    /// Create a context stamped with the current time and an empty payload.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            payload: HashMap::new(),
        }
    }

    /// Create a context with a generated v4 UUID as the correlation id, for
    /// callers that have no upstream request id to thread through.
    pub fn generated() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    /// Attach a payload entry, serializing the value to JSON.
    pub fn with_payload_entry(
        mut self,
        key: impl Into<String>,
        value: impl Serialize,
    ) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        self.payload.insert(key.into(), value);
        Ok(self)
    }
}
