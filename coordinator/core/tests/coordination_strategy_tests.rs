// Copyright (c) 2026 Concord Labs
// SPDX-License-Identifier: AGPL-3.0

//! Integration tests for the four collaboration strategies.
//!
//! These exercise the coordinator façade end to end:
//! - Sequential: report count, flattening order, cross-agent knowledge flow
//! - Parallel: participant-order results, all-or-nothing fault handling
//! - Conditional: skip semantics and the always-continue fallback
//! - Iterative: per-round accumulation, early stop, the full-budget fallback
//!
//! Plus the no-throw guarantee, knowledge isolation, clear semantics, and a
//! barrier rendezvous between two parallel agents.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use concord_core::application::coordinator::Coordinator;
use concord_core::domain::agent::Agent;
use concord_core::domain::collaboration::{Barrier, Collaboration, CollaborationStrategy};
use concord_core::domain::context::Context;
use concord_core::domain::insight::{Insight, Signal};
use concord_core::domain::report::Report;
use concord_core::infrastructure::barrier_registry::BarrierRegistry;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("concord_core=debug")
        .with_test_writer()
        .try_init();
}

/// Produces one fixed insight per run, titled after the agent.
struct StaticAgent {
    name: String,
    signal: Signal,
}

impl StaticAgent {
    fn arc(name: &str, signal: Signal) -> Arc<dyn Agent> {
        Arc::new(Self {
            name: name.to_string(),
            signal,
        })
    }
}

#[async_trait]
impl Agent for StaticAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, _context: &Context) -> Result<Report> {
        let insight = Insight::new(
            format!("{} finding", self.name),
            format!("produced by {}", self.name),
            self.signal,
        );
        Ok(Report::new(&self.name, vec![insight]))
    }
}

/// Sleeps before reporting, to decouple completion order from position.
struct DelayedAgent {
    name: String,
    delay: Duration,
}

#[async_trait]
impl Agent for DelayedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, _context: &Context) -> Result<Report> {
        tokio::time::sleep(self.delay).await;
        Ok(Report::new(
            &self.name,
            vec![Insight::info(format!("{} finding", self.name), "")],
        ))
    }
}

/// Fails with an infrastructure-level fault.
struct FailingAgent {
    name: String,
}

#[async_trait]
impl Agent for FailingAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, _context: &Context) -> Result<Report> {
        Err(anyhow!("connection pool exhausted"))
    }
}

/// Arrives at a shared barrier, waits for its peers, then reports. Models two
/// parallel agents rendezvousing before producing their final insights.
struct RendezvousAgent {
    name: String,
    barrier: Barrier,
    registry: Arc<BarrierRegistry>,
    arrival_delay: Duration,
}

#[async_trait]
impl Agent for RendezvousAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, _context: &Context) -> Result<Report> {
        tokio::time::sleep(self.arrival_delay).await;
        self.registry.arrive(&self.barrier.id, &self.name);
        self.registry
            .wait(
                &self.barrier,
                Duration::from_millis(5),
                &tokio_util::sync::CancellationToken::new(),
            )
            .await?;
        Ok(Report::new(
            &self.name,
            vec![Insight::info(format!("{} synced", self.name), "")],
        ))
    }
}

fn three_static_agents() -> Vec<Arc<dyn Agent>> {
    vec![
        StaticAgent::arc("architecture", Signal::Info),
        StaticAgent::arc("security", Signal::Warn),
        StaticAgent::arc("qa", Signal::Info),
    ]
}

#[tokio::test]
async fn sequential_produces_one_report_per_participant() {
    init_tracing();
    let coordinator = Coordinator::new();
    let collaboration = Collaboration::new(
        "coord-1",
        three_static_agents(),
        CollaborationStrategy::Sequential,
    );

    let report = coordinator
        .orchestrate(&collaboration, &Context::new("req-1"))
        .await;

    assert!(report.success);
    assert_eq!(report.individual_reports.len(), 3);
    let agents: Vec<&str> = report
        .individual_reports
        .iter()
        .map(|r| r.agent.as_str())
        .collect();
    assert_eq!(agents, ["architecture", "security", "qa"]);
}

#[tokio::test]
async fn aggregation_flattens_in_report_then_insight_order() {
    let coordinator = Coordinator::new();
    let collaboration = Collaboration::new(
        "coord-1",
        three_static_agents(),
        CollaborationStrategy::Sequential,
    );

    let report = coordinator
        .orchestrate(&collaboration, &Context::new("req-1"))
        .await;

    let flattened: Vec<String> = report
        .all_insights
        .iter()
        .map(|i| i.title.clone())
        .collect();
    let expected: Vec<String> = report
        .individual_reports
        .iter()
        .flat_map(|r| r.insights.iter().map(|i| i.title.clone()))
        .collect();
    assert_eq!(flattened, expected);
    assert_eq!(
        flattened,
        ["architecture finding", "security finding", "qa finding"]
    );
}

#[tokio::test]
async fn aggregation_keeps_duplicate_insights() {
    let coordinator = Coordinator::new();
    // Two agents whose findings share a title: no deduplication may occur.
    let collaboration = Collaboration::new(
        "coord-1",
        vec![
            StaticAgent::arc("twin", Signal::Info),
            StaticAgent::arc("twin", Signal::Info),
        ],
        CollaborationStrategy::Sequential,
    );

    let report = coordinator
        .orchestrate(&collaboration, &Context::new("req-1"))
        .await;

    assert_eq!(report.all_insights.len(), 2);
    assert_eq!(report.all_insights[0].title, report.all_insights[1].title);
}

#[tokio::test]
async fn sequential_feeds_later_agents_through_knowledge_store() {
    let coordinator = Coordinator::new();
    let collaboration = Collaboration::new(
        "coord-1",
        three_static_agents(),
        CollaborationStrategy::Sequential,
    );

    coordinator
        .orchestrate(&collaboration, &Context::new("req-1"))
        .await;

    // The last agent received one entry from each of the two before it.
    let received = coordinator.shared_knowledge("qa").await;
    let sources: Vec<&str> = received.iter().map(|k| k.source_agent.as_str()).collect();
    assert_eq!(sources, ["architecture", "security"]);
}

#[tokio::test]
async fn parallel_results_follow_participant_order() {
    let coordinator = Coordinator::new();
    // b and c resolve well before a does.
    let collaboration = Collaboration::new(
        "coord-1",
        vec![
            Arc::new(DelayedAgent {
                name: "a".to_string(),
                delay: Duration::from_millis(40),
            }) as Arc<dyn Agent>,
            Arc::new(DelayedAgent {
                name: "b".to_string(),
                delay: Duration::from_millis(1),
            }),
            Arc::new(DelayedAgent {
                name: "c".to_string(),
                delay: Duration::from_millis(10),
            }),
        ],
        CollaborationStrategy::Parallel,
    );

    let report = coordinator
        .orchestrate(&collaboration, &Context::new("req-1"))
        .await;

    assert!(report.success);
    let agents: Vec<&str> = report
        .individual_reports
        .iter()
        .map(|r| r.agent.as_str())
        .collect();
    assert_eq!(agents, ["a", "b", "c"]);
}

#[tokio::test]
async fn parallel_fault_yields_failed_report_with_no_partials() {
    let coordinator = Coordinator::new();
    let collaboration = Collaboration::new(
        "coord-1",
        vec![
            StaticAgent::arc("healthy", Signal::Info),
            Arc::new(FailingAgent {
                name: "broken".to_string(),
            }),
        ],
        CollaborationStrategy::Parallel,
    );

    let report = coordinator
        .orchestrate(&collaboration, &Context::new("req-1"))
        .await;

    assert!(!report.success);
    assert_eq!(report.individual_reports.len(), 0);
    assert_eq!(report.all_insights.len(), 1);
    let synthetic = &report.all_insights[0];
    assert_eq!(synthetic.title, "Orchestration Failed");
    assert_eq!(synthetic.signal, Signal::Error);
    assert!(synthetic.description.contains("broken"));
}

#[tokio::test]
async fn conditional_runs_everyone_while_no_error_signals_appear() {
    let coordinator = Coordinator::new();
    // Continue as long as no collected insight carries an error signal;
    // these fixtures never produce one.
    let collaboration = Collaboration::new(
        "coord-1",
        three_static_agents(),
        CollaborationStrategy::Conditional,
    )
    .with_condition(|reports| {
        !reports
            .iter()
            .flat_map(|r| r.insights.iter())
            .any(|i| i.signal == Signal::Error)
    });

    let report = coordinator
        .orchestrate(&collaboration, &Context::new("req-1"))
        .await;

    assert!(report.success);
    assert_eq!(report.individual_reports.len(), 3);
}

#[tokio::test]
async fn conditional_stops_after_first_report_when_condition_fails() {
    let coordinator = Coordinator::new();
    let collaboration = Collaboration::new(
        "coord-1",
        three_static_agents(),
        CollaborationStrategy::Conditional,
    )
    .with_condition(|_| false);

    let report = coordinator
        .orchestrate(&collaboration, &Context::new("req-1"))
        .await;

    assert!(report.success);
    assert_eq!(report.individual_reports.len(), 1);
    assert_eq!(report.individual_reports[0].agent, "architecture");
}

#[tokio::test]
async fn iterative_single_agent_runs_once_per_round() {
    let coordinator = Coordinator::new();
    let collaboration = Collaboration::new(
        "coord-1",
        vec![StaticAgent::arc("solo", Signal::Info)],
        CollaborationStrategy::Iterative,
    )
    .with_condition(|_| false)
    .with_max_iterations(3);

    let report = coordinator
        .orchestrate(&collaboration, &Context::new("req-1"))
        .await;

    assert!(report.success);
    assert_eq!(report.individual_reports.len(), 3);
}

#[tokio::test]
async fn iterative_accumulates_n_times_m_reports() {
    let coordinator = Coordinator::new();
    let collaboration = Collaboration::new(
        "coord-1",
        vec![
            StaticAgent::arc("a", Signal::Info),
            StaticAgent::arc("b", Signal::Info),
        ],
        CollaborationStrategy::Iterative,
    )
    .with_condition(|_| false)
    .with_max_iterations(3);

    let report = coordinator
        .orchestrate(&collaboration, &Context::new("req-1"))
        .await;

    assert_eq!(report.individual_reports.len(), 6);
}

#[tokio::test]
async fn iterative_without_condition_uses_default_budget() {
    let coordinator = Coordinator::new();
    let collaboration = Collaboration::new(
        "coord-1",
        vec![StaticAgent::arc("solo", Signal::Info)],
        CollaborationStrategy::Iterative,
    );

    let report = coordinator
        .orchestrate(&collaboration, &Context::new("req-1"))
        .await;

    // Absent condition and bound: the loop runs the default five rounds.
    assert_eq!(report.individual_reports.len(), 5);
}

#[tokio::test]
async fn knowledge_sharing_never_reaches_the_source() {
    let coordinator = Coordinator::new();
    let targets = vec!["a".to_string(), "b".to_string()];
    let insights = vec![Insight::info("observation", "shared around")];

    coordinator.share_insights("a", &targets, &insights).await;

    assert!(coordinator.shared_knowledge("a").await.is_empty());
    let received = coordinator.shared_knowledge("b").await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].source_agent, "a");
}

#[tokio::test]
async fn clearing_knowledge_leaves_nothing_behind() {
    let coordinator = Coordinator::new();
    let targets = vec!["b".to_string()];
    coordinator
        .share_insights("a", &targets, &[Insight::info("observation", "")])
        .await;

    coordinator.clear_knowledge().await;

    assert!(coordinator.shared_knowledge("a").await.is_empty());
    assert!(coordinator.shared_knowledge("b").await.is_empty());
}

#[tokio::test]
async fn parallel_agents_can_rendezvous_at_a_barrier() {
    init_tracing();
    let coordinator = Coordinator::new();
    let registry = coordinator.barrier_registry();
    let barrier =
        Barrier::new("pre-report", ["early", "late"]).with_timeout(Duration::from_secs(2));

    let collaboration = Collaboration::new(
        "coord-1",
        vec![
            Arc::new(RendezvousAgent {
                name: "early".to_string(),
                barrier: barrier.clone(),
                registry: registry.clone(),
                arrival_delay: Duration::ZERO,
            }) as Arc<dyn Agent>,
            Arc::new(RendezvousAgent {
                name: "late".to_string(),
                barrier: barrier.clone(),
                registry,
                arrival_delay: Duration::from_millis(30),
            }),
        ],
        CollaborationStrategy::Parallel,
    )
    .with_barrier(barrier);

    let report = coordinator
        .orchestrate(&collaboration, &Context::new("req-1"))
        .await;

    assert!(report.success);
    assert_eq!(report.individual_reports.len(), 2);
}

#[tokio::test]
async fn context_payload_reaches_agents_unchanged() {
    /// Echoes a payload entry back as an insight.
    struct EchoAgent;

    #[async_trait]
    impl Agent for EchoAgent {
        fn name(&self) -> &str {
            "echo"
        }

        async fn run(&self, context: &Context) -> Result<Report> {
            let target = context
                .payload
                .get("target")
                .and_then(|v| v.as_str())
                .unwrap_or("<missing>");
            Ok(Report::new(
                "echo",
                vec![Insight::info("target", target)],
            ))
        }
    }

    let coordinator = Coordinator::new();
    let context = Context::generated()
        .with_payload_entry("target", "billing-service")
        .unwrap();
    let collaboration = Collaboration::new(
        "coord-1",
        vec![Arc::new(EchoAgent) as Arc<dyn Agent>],
        CollaborationStrategy::Sequential,
    );

    let report = coordinator.orchestrate(&collaboration, &context).await;

    assert_eq!(report.all_insights[0].description, "billing-service");
}
