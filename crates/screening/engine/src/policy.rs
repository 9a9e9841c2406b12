use screening_types::{CheckKind, CheckResult};
use std::collections::BTreeMap;

/// Behavior when no selected check produced a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoResultPolicy {
    /// Aggregate to zero risk and continue (historical behavior).
    #[default]
    SilentPass,
    /// Treat the empty aggregate as a workflow-level error.
    Escalate,
}

/// Routing thresholds applied once aggregation completes.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Risk at or below this value auto-clears without arbitration; it is
    /// also the escalation threshold for the final record.
    pub auto_clear_threshold: f64,
    /// Risk above this value escalates directly, bypassing arbitration.
    pub hard_escalate_threshold: f64,
    pub no_result_policy: NoResultPolicy,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            auto_clear_threshold: 0.3,
            hard_escalate_threshold: 0.7,
            no_result_policy: NoResultPolicy::SilentPass,
        }
    }
}

/// Next workflow branch selected by the routing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ErrorHandling,
    SupervisorReview,
    Report,
}

/// Arithmetic mean of the risk scores that are present.
///
/// Failed or score-less checks are excluded from both numerator and
/// denominator; an empty set aggregates to zero.
pub fn aggregate_risk(results: &BTreeMap<CheckKind, CheckResult>) -> f64 {
    let scores: Vec<f64> = results
        .values()
        .filter_map(|result| result.risk_score)
        .collect();
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Routing decision, in fixed precedence: errors, hard escalation,
/// arbitration band, auto-clear.
///
/// Both ends of the band bypass arbitration: low risk auto-clears and very
/// high risk escalates straight to reporting.
pub fn route(aggregated_risk: f64, has_errors: bool, config: &RoutingConfig) -> Route {
    if has_errors {
        Route::ErrorHandling
    } else if aggregated_risk > config.hard_escalate_threshold {
        Route::Report
    } else if aggregated_risk > config.auto_clear_threshold {
        Route::SupervisorReview
    } else {
        Route::Report
    }
}
