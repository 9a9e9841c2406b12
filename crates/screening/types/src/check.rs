use crate::decision::DecisionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compliance dimensions evaluated by specialist checkers.
///
/// Variant order is the canonical dispatch order; result maps keyed by kind
/// iterate in this order when findings are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Identity,
    Sanctions,
    Jurisdiction,
}

impl CheckKind {
    pub const ALL: [CheckKind; 3] = [Self::Identity, Self::Sanctions, Self::Jurisdiction];

    pub fn name(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Sanctions => "sanctions",
            Self::Jurisdiction => "jurisdiction",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classified free-text observation attached to a check or decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: String,
    pub detail: String,
}

impl Finding {
    pub fn new(category: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            detail: detail.into(),
        }
    }
}

/// Output of one specialist check. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub kind: CheckKind,
    /// Normalized risk in [0,1]; absent when the check completed without a
    /// usable score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    pub findings: Vec<Finding>,
    pub recommendations: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

impl CheckResult {
    pub fn new(kind: CheckKind) -> Self {
        Self {
            kind,
            risk_score: None,
            findings: Vec::new(),
            recommendations: Vec::new(),
            completed_at: Utc::now(),
        }
    }

    /// Attach a risk score, clamped into [0,1].
    pub fn with_score(mut self, score: f64) -> Self {
        self.risk_score = Some(score.clamp(0.0, 1.0));
        self
    }

    pub fn with_finding(mut self, category: impl Into<String>, detail: impl Into<String>) -> Self {
        self.findings.push(Finding::new(category, detail));
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendations.push(recommendation.into());
        self
    }
}

/// Override decision returned by supervisor arbitration.
///
/// The risk score replaces the aggregate outright; an `Escalated` status is
/// final regardless of the numeric score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupervisorDecision {
    pub risk_score: f64,
    pub status: DecisionStatus,
    pub findings: Vec<Finding>,
    pub recommendations: Vec<String>,
}

impl SupervisorDecision {
    pub fn new(risk_score: f64, status: DecisionStatus) -> Self {
        Self {
            risk_score,
            status,
            findings: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    pub fn with_finding(mut self, category: impl Into<String>, detail: impl Into<String>) -> Self {
        self.findings.push(Finding::new(category, detail));
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendations.push(recommendation.into());
        self
    }
}
