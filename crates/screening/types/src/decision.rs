use crate::check::{CheckKind, Finding};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal outcome of a screening run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Approved,
    Escalated,
}

/// The terminal, auditable record of one screening run.
///
/// This is the only artifact handed back across the system boundary. It is
/// never mutated after construction; the error path produces one too, with
/// risk forced to 1.0 and the raw error messages attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub trace_id: String,
    pub transaction_id: String,
    pub status: DecisionStatus,
    pub risk_score: f64,
    pub findings: Vec<Finding>,
    pub recommendations: Vec<String>,
    /// Checks that contributed a result, in dispatch order.
    pub checks_consulted: Vec<CheckKind>,
    pub processing_time_ms: u64,
    pub completed_at: DateTime<Utc>,
    /// Raw error messages when the run terminated on the error path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}
