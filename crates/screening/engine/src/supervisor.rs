use async_trait::async_trait;
use screening_types::{CheckKind, CheckResult, ScreeningResult, SupervisorDecision, Transaction};
use std::collections::BTreeMap;

/// Higher-authority arbitration capability for mid-band risk.
///
/// Invoked only when the routing policy lands in the arbitration band,
/// with every check result gathered so far as context. The returned score
/// replaces the aggregate outright, and an escalated status is final.
/// Unlike a specialist checker, a failure here fails the whole run.
#[async_trait]
pub trait SupervisorReviewer: Send + Sync {
    async fn arbitrate(
        &self,
        transaction: &Transaction,
        results: &BTreeMap<CheckKind, CheckResult>,
    ) -> ScreeningResult<SupervisorDecision>;
}
