use crate::policy::RoutingConfig;
use crate::state::WorkflowState;
use chrono::Utc;
use screening_types::{DecisionRecord, DecisionStatus, Finding};

/// Fixed recommendation attached to every error-path record.
pub const MANUAL_REVIEW_RECOMMENDATION: &str = "manual review required";

/// Assemble the terminal decision record from whatever upstream state
/// exists. Consumes the workflow state; nothing else survives a run.
///
/// A non-empty error list selects the all-error fallback: findings are
/// synthesized one per error message, risk is forced to 1.0, and the status
/// is forced to escalated.
pub fn compile(state: WorkflowState, config: &RoutingConfig) -> DecisionRecord {
    if state.has_errors() {
        return compile_error(state);
    }

    let escalated_by_supervisor = state
        .supervisor_decision
        .as_ref()
        .is_some_and(|decision| decision.status == DecisionStatus::Escalated);
    let status = if state.aggregated_risk > config.auto_clear_threshold || escalated_by_supervisor {
        DecisionStatus::Escalated
    } else {
        DecisionStatus::Approved
    };

    // Concatenate in check-dispatch order, then supervisor order. Duplicates
    // are preserved; each contributing list keeps its internal order.
    let mut findings = Vec::new();
    let mut recommendations = Vec::new();
    let mut checks_consulted = Vec::with_capacity(state.check_results.len());
    for (kind, result) in &state.check_results {
        checks_consulted.push(*kind);
        findings.extend(result.findings.iter().cloned());
        recommendations.extend(result.recommendations.iter().cloned());
    }
    if let Some(decision) = &state.supervisor_decision {
        findings.extend(decision.findings.iter().cloned());
        recommendations.extend(decision.recommendations.iter().cloned());
    }

    let processing_time_ms = state.elapsed_ms();
    DecisionRecord {
        trace_id: state.trace_id,
        transaction_id: state.transaction.id,
        status,
        risk_score: state.aggregated_risk,
        findings,
        recommendations,
        checks_consulted,
        processing_time_ms,
        completed_at: Utc::now(),
        errors: Vec::new(),
    }
}

fn compile_error(state: WorkflowState) -> DecisionRecord {
    let findings: Vec<Finding> = state
        .errors
        .iter()
        .map(|message| Finding::new("error", message.clone()))
        .collect();
    let checks_consulted = state.check_results.keys().copied().collect();

    let processing_time_ms = state.elapsed_ms();
    DecisionRecord {
        trace_id: state.trace_id,
        transaction_id: state.transaction.id,
        status: DecisionStatus::Escalated,
        risk_score: 1.0,
        findings,
        recommendations: vec![MANUAL_REVIEW_RECOMMENDATION.to_string()],
        checks_consulted,
        processing_time_ms,
        completed_at: Utc::now(),
        errors: state.errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screening_types::{CheckKind, CheckResult, SupervisorDecision, Transaction};

    fn state_with_results() -> WorkflowState {
        let mut state = WorkflowState::new(
            Transaction::new("txn-1", "transfer")
                .with_amount(100.0)
                .with_user("user-1"),
        );
        state.check_results.insert(
            CheckKind::Sanctions,
            CheckResult::new(CheckKind::Sanctions)
                .with_score(0.4)
                .with_finding("sanctions", "name similarity below match threshold")
                .with_recommendation("re-screen in 30 days"),
        );
        state.check_results.insert(
            CheckKind::Identity,
            CheckResult::new(CheckKind::Identity)
                .with_score(0.2)
                .with_finding("identity", "user identity on file"),
        );
        state
    }

    #[test]
    fn findings_merge_in_dispatch_order_then_supervisor() {
        let mut state = state_with_results();
        state.aggregated_risk = 0.1;
        state.supervisor_decision = Some(
            SupervisorDecision::new(0.1, DecisionStatus::Approved)
                .with_finding("supervisor", "cleared after manual inspection"),
        );

        let record = compile(state, &RoutingConfig::default());
        let categories: Vec<&str> = record
            .findings
            .iter()
            .map(|finding| finding.category.as_str())
            .collect();
        assert_eq!(categories, vec!["identity", "sanctions", "supervisor"]);
        assert_eq!(
            record.checks_consulted,
            vec![CheckKind::Identity, CheckKind::Sanctions]
        );
    }

    #[test]
    fn risk_above_threshold_escalates() {
        let mut state = state_with_results();
        state.aggregated_risk = 0.31;
        let record = compile(state, &RoutingConfig::default());
        assert_eq!(record.status, DecisionStatus::Escalated);
    }

    #[test]
    fn risk_at_threshold_approves() {
        let mut state = state_with_results();
        state.aggregated_risk = 0.3;
        let record = compile(state, &RoutingConfig::default());
        assert_eq!(record.status, DecisionStatus::Approved);
        assert!(record.errors.is_empty());
    }

    #[test]
    fn supervisor_escalation_overrides_low_risk() {
        let mut state = state_with_results();
        state.aggregated_risk = 0.1;
        state.supervisor_decision = Some(SupervisorDecision::new(0.1, DecisionStatus::Escalated));
        let record = compile(state, &RoutingConfig::default());
        assert_eq!(record.status, DecisionStatus::Escalated);
    }

    #[test]
    fn duplicate_findings_are_preserved() {
        let mut state = WorkflowState::new(Transaction::new("txn-1", "transfer"));
        state.check_results.insert(
            CheckKind::Identity,
            CheckResult::new(CheckKind::Identity)
                .with_score(0.1)
                .with_finding("identity", "duplicate")
                .with_finding("identity", "duplicate"),
        );
        let record = compile(state, &RoutingConfig::default());
        assert_eq!(record.findings.len(), 2);
    }

    #[test]
    fn error_path_is_maximally_conservative() {
        let mut state = WorkflowState::new(Transaction::new("txn-1", "transfer"));
        state.record_error("invalid transaction: transaction id is required");
        state.record_error("supervisor arbitration failed: desk offline");

        let record = compile(state, &RoutingConfig::default());
        assert_eq!(record.status, DecisionStatus::Escalated);
        assert_eq!(record.risk_score, 1.0);
        assert_eq!(record.findings.len(), 2);
        assert!(record.findings.iter().all(|f| f.category == "error"));
        assert_eq!(
            record.recommendations,
            vec![MANUAL_REVIEW_RECOMMENDATION.to_string()]
        );
        assert_eq!(record.errors.len(), 2);
    }
}
