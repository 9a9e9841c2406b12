use screening_types::{CheckKind, CheckResult, SupervisorDecision, Transaction};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Named steps of the screening state machine.
///
/// The step is tracked for observability; branching is decided by the
/// routing policy, never by inspecting the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    Validating,
    Dispatching,
    Aggregating,
    SupervisorReview,
    Reporting,
    ErrorHandling,
}

impl WorkflowStep {
    pub fn name(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Dispatching => "dispatching",
            Self::Aggregating => "aggregating",
            Self::SupervisorReview => "supervisor_review",
            Self::Reporting => "reporting",
            Self::ErrorHandling => "error_handling",
        }
    }
}

/// Mutable state threaded through one screening run.
///
/// Owned exclusively by the executor for the lifetime of the run. Check
/// results are written only after the dispatch join point, and the error
/// list is append-only.
#[derive(Debug)]
pub struct WorkflowState {
    pub trace_id: String,
    pub transaction: Transaction,
    pub step: WorkflowStep,
    pub check_results: BTreeMap<CheckKind, CheckResult>,
    pub supervisor_decision: Option<SupervisorDecision>,
    pub errors: Vec<String>,
    pub aggregated_risk: f64,
    pub dispatch_elapsed: Duration,
    started: Instant,
}

impl WorkflowState {
    pub fn new(transaction: Transaction) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string(),
            transaction,
            step: WorkflowStep::Validating,
            check_results: BTreeMap::new(),
            supervisor_decision: None,
            errors: Vec::new(),
            aggregated_risk: 0.0,
            dispatch_elapsed: Duration::ZERO,
            started: Instant::now(),
        }
    }

    /// Advance the state machine, emitting one structured event per
    /// transition.
    pub fn enter(&mut self, step: WorkflowStep) {
        tracing::info!(
            trace_id = %self.trace_id,
            transaction_id = %self.transaction.id,
            from = self.step.name(),
            to = step.name(),
            "workflow step transition"
        );
        self.step = step;
    }

    /// Append a workflow-level error. Entries are never overwritten.
    pub fn record_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(
            trace_id = %self.trace_id,
            transaction_id = %self.transaction.id,
            error = %message,
            "workflow error"
        );
        self.errors.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Wall-clock time since the run started.
    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
