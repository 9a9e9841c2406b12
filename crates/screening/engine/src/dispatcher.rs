use crate::registry::CheckerRegistry;
use screening_types::{CheckKind, CheckResult, ScreeningError, ScreeningResult, Transaction};
use std::collections::{BTreeMap, BTreeSet};

/// Concurrent fan-out over the selected specialist checkers.
///
/// Every selected checker runs as its own task and every task settles before
/// results are returned; one failing checker never prevents the others from
/// being collected. A failed checker contributes no result for its kind and
/// is not retried. Only failures of the dispatcher's own orchestration (a
/// selected kind with no registered handler) surface as errors.
#[derive(Default, Clone)]
pub struct CheckDispatcher {
    registry: CheckerRegistry,
}

impl CheckDispatcher {
    pub fn new(registry: CheckerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CheckerRegistry {
        &self.registry
    }

    pub async fn dispatch(
        &self,
        transaction: &Transaction,
        checks: &BTreeSet<CheckKind>,
    ) -> ScreeningResult<BTreeMap<CheckKind, CheckResult>> {
        // A selected kind without a registered handler is a configuration
        // fault of the orchestration itself, not a checker failure.
        let mut selected = Vec::with_capacity(checks.len());
        for kind in checks {
            match self.registry.get(*kind) {
                Some(checker) => selected.push((*kind, checker)),
                None => return Err(ScreeningError::CheckerNotRegistered(*kind)),
            }
        }

        let mut handles = Vec::with_capacity(selected.len());
        for (kind, checker) in selected {
            let txn = transaction.clone();
            handles.push((kind, tokio::spawn(async move { checker.check(&txn).await })));
        }

        let mut results = BTreeMap::new();
        for (kind, handle) in handles {
            match handle.await {
                Ok(Ok(result)) => {
                    results.insert(kind, result);
                }
                Ok(Err(error)) => {
                    tracing::warn!(
                        transaction_id = %transaction.id,
                        check = %kind,
                        error = %error,
                        "checker failed; continuing without its result"
                    );
                }
                Err(join_error) => {
                    tracing::error!(
                        transaction_id = %transaction.id,
                        check = %kind,
                        error = %join_error,
                        "checker task aborted; continuing without its result"
                    );
                }
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ComplianceChecker;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct ScoreChecker {
        kind: CheckKind,
        score: f64,
        delay: Duration,
    }

    #[async_trait]
    impl ComplianceChecker for ScoreChecker {
        fn kind(&self) -> CheckKind {
            self.kind
        }

        async fn check(&self, _transaction: &Transaction) -> ScreeningResult<CheckResult> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(CheckResult::new(self.kind).with_score(self.score))
        }
    }

    struct FailingChecker {
        kind: CheckKind,
    }

    #[async_trait]
    impl ComplianceChecker for FailingChecker {
        fn kind(&self) -> CheckKind {
            self.kind
        }

        async fn check(&self, _transaction: &Transaction) -> ScreeningResult<CheckResult> {
            Err(ScreeningError::check_failed(self.kind, "upstream unavailable"))
        }
    }

    struct PanickingChecker {
        kind: CheckKind,
    }

    #[async_trait]
    impl ComplianceChecker for PanickingChecker {
        fn kind(&self) -> CheckKind {
            self.kind
        }

        async fn check(&self, _transaction: &Transaction) -> ScreeningResult<CheckResult> {
            panic!("checker bug");
        }
    }

    fn all_kinds() -> BTreeSet<CheckKind> {
        CheckKind::ALL.into_iter().collect()
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_the_others() {
        let mut registry = CheckerRegistry::new();
        registry.register(Arc::new(ScoreChecker {
            kind: CheckKind::Identity,
            score: 0.2,
            delay: Duration::from_millis(20),
        }));
        registry.register(Arc::new(FailingChecker {
            kind: CheckKind::Sanctions,
        }));
        registry.register(Arc::new(ScoreChecker {
            kind: CheckKind::Jurisdiction,
            score: 0.4,
            delay: Duration::ZERO,
        }));

        let dispatcher = CheckDispatcher::new(registry);
        let txn = Transaction::new("txn-1", "security").with_user("user-1");
        let results = dispatcher.dispatch(&txn, &all_kinds()).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.contains_key(&CheckKind::Identity));
        assert!(!results.contains_key(&CheckKind::Sanctions));
        assert!(results.contains_key(&CheckKind::Jurisdiction));
    }

    #[tokio::test]
    async fn panicking_checker_is_contained() {
        let mut registry = CheckerRegistry::new();
        registry.register(Arc::new(PanickingChecker {
            kind: CheckKind::Identity,
        }));
        registry.register(Arc::new(ScoreChecker {
            kind: CheckKind::Sanctions,
            score: 0.3,
            delay: Duration::ZERO,
        }));

        let dispatcher = CheckDispatcher::new(registry);
        let txn = Transaction::new("txn-1", "transfer").with_user("user-1");
        let checks = [CheckKind::Identity, CheckKind::Sanctions]
            .into_iter()
            .collect();
        let results = dispatcher.dispatch(&txn, &checks).await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(results.contains_key(&CheckKind::Sanctions));
    }

    #[tokio::test]
    async fn missing_registration_is_an_orchestration_error() {
        let mut registry = CheckerRegistry::new();
        registry.register(Arc::new(ScoreChecker {
            kind: CheckKind::Identity,
            score: 0.2,
            delay: Duration::ZERO,
        }));

        let dispatcher = CheckDispatcher::new(registry);
        let txn = Transaction::new("txn-1", "transfer").with_user("user-1");
        let checks = [CheckKind::Identity, CheckKind::Sanctions]
            .into_iter()
            .collect();

        let error = dispatcher.dispatch(&txn, &checks).await.unwrap_err();
        assert!(matches!(
            error,
            ScreeningError::CheckerNotRegistered(CheckKind::Sanctions)
        ));
    }

    #[tokio::test]
    async fn results_are_keyed_in_dispatch_order() {
        let mut registry = CheckerRegistry::new();
        // Slowest first: completion order must not affect result order.
        registry.register(Arc::new(ScoreChecker {
            kind: CheckKind::Identity,
            score: 0.1,
            delay: Duration::from_millis(30),
        }));
        registry.register(Arc::new(ScoreChecker {
            kind: CheckKind::Sanctions,
            score: 0.2,
            delay: Duration::from_millis(10),
        }));
        registry.register(Arc::new(ScoreChecker {
            kind: CheckKind::Jurisdiction,
            score: 0.3,
            delay: Duration::ZERO,
        }));

        let dispatcher = CheckDispatcher::new(registry);
        let txn = Transaction::new("txn-1", "security").with_user("user-1");
        let results = dispatcher.dispatch(&txn, &all_kinds()).await.unwrap();

        let order: Vec<CheckKind> = results.keys().copied().collect();
        assert_eq!(
            order,
            vec![CheckKind::Identity, CheckKind::Sanctions, CheckKind::Jurisdiction]
        );
    }
}
