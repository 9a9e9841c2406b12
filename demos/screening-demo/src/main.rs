//! Screening workflow walkthrough.
//!
//! Wires deterministic stand-in checkers and a rule-based supervisor into
//! the executor and runs transactions through every major path: routine
//! auto-approval, high-value arbitration, hard escalation, and structural
//! rejection.

use anyhow::Result;
use async_trait::async_trait;
use screening_engine::{
    CheckerRegistry, ComplianceChecker, EngineConfig, SupervisorReviewer, WorkflowExecutor,
};
use screening_types::{
    CheckKind, CheckResult, DecisionStatus, ScreeningResult, SupervisorDecision, Transaction,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Stand-in for an identity verification service.
struct IdentityChecker;

#[async_trait]
impl ComplianceChecker for IdentityChecker {
    fn kind(&self) -> CheckKind {
        CheckKind::Identity
    }

    async fn check(&self, transaction: &Transaction) -> ScreeningResult<CheckResult> {
        let verified = transaction
            .user_id
            .as_deref()
            .is_some_and(|id| !id.starts_with("anon"));
        let result = if verified {
            CheckResult::new(CheckKind::Identity)
                .with_score(0.1)
                .with_finding("identity", "user identity on file")
        } else {
            CheckResult::new(CheckKind::Identity)
                .with_score(0.6)
                .with_finding("identity", "identity could not be confirmed")
                .with_recommendation("request additional identity documents")
        };
        Ok(result)
    }
}

/// Stand-in for a sanctions/AML screening vendor.
struct SanctionsChecker;

#[async_trait]
impl ComplianceChecker for SanctionsChecker {
    fn kind(&self) -> CheckKind {
        CheckKind::Sanctions
    }

    async fn check(&self, transaction: &Transaction) -> ScreeningResult<CheckResult> {
        let amount = transaction.amount.unwrap_or(0.0);
        let score = (amount / 250_000.0).clamp(0.05, 0.95);
        Ok(CheckResult::new(CheckKind::Sanctions)
            .with_score(score)
            .with_finding("sanctions", "no list match found"))
    }
}

/// Stand-in for a jurisdiction rule engine.
struct JurisdictionChecker;

#[async_trait]
impl ComplianceChecker for JurisdictionChecker {
    fn kind(&self) -> CheckKind {
        CheckKind::Jurisdiction
    }

    async fn check(&self, transaction: &Transaction) -> ScreeningResult<CheckResult> {
        let result = match transaction.asset_type.as_deref() {
            Some(tag) => CheckResult::new(CheckKind::Jurisdiction)
                .with_score(0.5)
                .with_finding(
                    "jurisdiction",
                    format!("'{tag}' instruments require venue reporting"),
                )
                .with_recommendation("file venue disclosure within 24h"),
            None => CheckResult::new(CheckKind::Jurisdiction)
                .with_score(0.2)
                .with_finding("jurisdiction", "no instrument-specific rules apply"),
        };
        Ok(result)
    }
}

/// Rule-based arbitration desk: approves mid-band transfers below 100k,
/// escalates everything else.
struct DeskSupervisor;

#[async_trait]
impl SupervisorReviewer for DeskSupervisor {
    async fn arbitrate(
        &self,
        transaction: &Transaction,
        _results: &BTreeMap<CheckKind, CheckResult>,
    ) -> ScreeningResult<SupervisorDecision> {
        let amount = transaction.amount.unwrap_or(0.0);
        let decision = if amount < 100_000.0 {
            SupervisorDecision::new(0.2, DecisionStatus::Approved)
                .with_finding("supervisor", "cleared after desk review")
        } else {
            SupervisorDecision::new(0.8, DecisionStatus::Escalated)
                .with_finding("supervisor", "amount above desk authority")
                .with_recommendation("route to senior compliance officer")
        };
        Ok(decision)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_target(false)
        .init();

    let mut registry = CheckerRegistry::new();
    registry.register(Arc::new(IdentityChecker));
    registry.register(Arc::new(SanctionsChecker));
    registry.register(Arc::new(JurisdictionChecker));

    let executor = WorkflowExecutor::new(registry, Arc::new(DeskSupervisor), EngineConfig::default());

    let transactions = vec![
        Transaction::new("txn-routine", "transfer")
            .with_amount(120.0)
            .with_user("user-1"),
        Transaction::new("txn-high-value", "transfer")
            .with_amount(75_000.0)
            .with_user("user-2"),
        Transaction::new("txn-security", "security")
            .with_amount(12_000.0)
            .with_user("anon-3")
            .with_asset_type("equity"),
        Transaction::new("", "transfer").with_amount(50.0),
    ];

    for transaction in transactions {
        let record = executor.execute(transaction).await;
        println!("{}", serde_json::to_string_pretty(&record)?);
    }

    Ok(())
}
