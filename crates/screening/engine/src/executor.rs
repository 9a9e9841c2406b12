use crate::dispatcher::CheckDispatcher;
use crate::policy::{aggregate_risk, route, NoResultPolicy, Route, RoutingConfig};
use crate::registry::CheckerRegistry;
use crate::report;
use crate::selector::{required_checks, SelectorConfig};
use crate::state::{WorkflowState, WorkflowStep};
use crate::supervisor::SupervisorReviewer;
use screening_types::{DecisionRecord, ScreeningError, ScreeningResult, Transaction};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Engine configuration: selection and routing thresholds.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub selector: SelectorConfig,
    pub routing: RoutingConfig,
}

/// The workflow executor — the single entry point the transport layer calls.
///
/// Sequences validation, dispatch, aggregation, routing, arbitration, and
/// reporting over a [`WorkflowState`] it exclusively owns. Never returns an
/// error: every failure mode terminates in an escalated [`DecisionRecord`].
/// Holds no cross-invocation state, so one executor serves any number of
/// concurrent callers.
pub struct WorkflowExecutor {
    dispatcher: CheckDispatcher,
    supervisor: Arc<dyn SupervisorReviewer>,
    config: EngineConfig,
}

impl WorkflowExecutor {
    pub fn new(
        registry: CheckerRegistry,
        supervisor: Arc<dyn SupervisorReviewer>,
        config: EngineConfig,
    ) -> Self {
        Self {
            dispatcher: CheckDispatcher::new(registry),
            supervisor,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full screening workflow for one transaction.
    pub async fn execute(&self, transaction: Transaction) -> DecisionRecord {
        self.run(transaction, None).await
    }

    /// Run with an absolute deadline over the whole call.
    ///
    /// On expiry the run takes the error path and still returns a
    /// best-effort record naming the step that timed out.
    pub async fn execute_with_deadline(
        &self,
        transaction: Transaction,
        deadline: Duration,
    ) -> DecisionRecord {
        self.run(transaction, Some(Instant::now() + deadline)).await
    }

    async fn run(&self, transaction: Transaction, deadline: Option<Instant>) -> DecisionRecord {
        let mut state = WorkflowState::new(transaction);
        tracing::info!(
            trace_id = %state.trace_id,
            transaction_id = %state.transaction.id,
            "screening run started"
        );

        if let Err(error) = state.transaction.validate() {
            state.record_error(error.to_string());
            return self.fail(state);
        }

        state.enter(WorkflowStep::Dispatching);
        let checks = required_checks(&state.transaction, &self.config.selector);
        let dispatch_started = std::time::Instant::now();
        let dispatched = with_deadline(
            deadline,
            "dispatch",
            self.dispatcher.dispatch(&state.transaction, &checks),
        )
        .await;
        state.dispatch_elapsed = dispatch_started.elapsed();
        match dispatched {
            Ok(results) => {
                tracing::debug!(
                    trace_id = %state.trace_id,
                    selected = checks.len(),
                    collected = results.len(),
                    elapsed_ms = state.dispatch_elapsed.as_millis() as u64,
                    "dispatch settled"
                );
                state.check_results = results;
            }
            Err(error) => {
                state.record_error(error.to_string());
                return self.fail(state);
            }
        }

        state.enter(WorkflowStep::Aggregating);
        state.aggregated_risk = aggregate_risk(&state.check_results);
        let scoreless = state
            .check_results
            .values()
            .all(|result| result.risk_score.is_none());
        if scoreless && self.config.routing.no_result_policy == NoResultPolicy::Escalate {
            state.record_error("no selected check produced a risk score");
        }

        match route(state.aggregated_risk, state.has_errors(), &self.config.routing) {
            Route::ErrorHandling => return self.fail(state),
            Route::SupervisorReview => {
                state.enter(WorkflowStep::SupervisorReview);
                let arbitration = with_deadline(
                    deadline,
                    "supervisor review",
                    self.supervisor
                        .arbitrate(&state.transaction, &state.check_results),
                )
                .await;
                match arbitration {
                    Ok(decision) => {
                        tracing::info!(
                            trace_id = %state.trace_id,
                            risk = decision.risk_score,
                            status = ?decision.status,
                            "supervisor decision replaces aggregate"
                        );
                        state.aggregated_risk = decision.risk_score.clamp(0.0, 1.0);
                        state.supervisor_decision = Some(decision);
                    }
                    Err(error) => {
                        state.record_error(error.to_string());
                        return self.fail(state);
                    }
                }
            }
            Route::Report => {}
        }

        state.enter(WorkflowStep::Reporting);
        let record = report::compile(state, &self.config.routing);
        tracing::info!(
            trace_id = %record.trace_id,
            transaction_id = %record.transaction_id,
            status = ?record.status,
            risk = record.risk_score,
            "screening run completed"
        );
        record
    }

    fn fail(&self, mut state: WorkflowState) -> DecisionRecord {
        state.enter(WorkflowStep::ErrorHandling);
        report::compile(state, &self.config.routing)
    }
}

async fn with_deadline<T>(
    deadline: Option<Instant>,
    step: &'static str,
    operation: impl Future<Output = ScreeningResult<T>>,
) -> ScreeningResult<T> {
    match deadline {
        Some(at) => match tokio::time::timeout_at(at, operation).await {
            Ok(result) => result,
            Err(_) => Err(ScreeningError::DeadlineExceeded(step)),
        },
        None => operation.await,
    }
}
