// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Severity of a finding.
///
/// Conditional and iterative strategies make continuation decisions from
/// signals; callers use them to triage output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Info => write!(f, "info"),
            Signal::Warn => write!(f, "warn"),
            Signal::Error => write!(f, "error"),
        }
    }
}

/// One atomic finding produced by an agent. Immutable once created.
///
/// Negative findings of any severity travel through normal data flow as
/// insights; they are not errors and never fail an orchestration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
    pub signal: Signal,

    /// Structured payload for machine consumption.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub data: HashMap<String, serde_json::Value>,
}

impl Insight {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        signal: Signal,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            signal,
            data: HashMap::new(),
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Signal::Info)
    }

    pub fn warn(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Signal::Warn)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Signal::Error)
    }

    /// Attach a structured data entry.
    pub fn with_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }
}
