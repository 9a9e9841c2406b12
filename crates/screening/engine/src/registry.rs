use async_trait::async_trait;
use screening_types::{CheckKind, CheckResult, ScreeningResult, Transaction};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Pluggable specialist checker capability.
///
/// Implementations evaluate one compliance dimension for a transaction. The
/// orchestrator assumes nothing about latency beyond "eventually settles";
/// a returned error means no result is recorded for the kind and the run
/// continues without it.
#[async_trait]
pub trait ComplianceChecker: Send + Sync {
    fn kind(&self) -> CheckKind;

    async fn check(&self, transaction: &Transaction) -> ScreeningResult<CheckResult>;
}

/// Mapping table from check kind to its handler.
///
/// Registering a second checker for the same kind replaces the first.
#[derive(Default, Clone)]
pub struct CheckerRegistry {
    checkers: BTreeMap<CheckKind, Arc<dyn ComplianceChecker>>,
}

impl CheckerRegistry {
    pub fn new() -> Self {
        Self {
            checkers: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, checker: Arc<dyn ComplianceChecker>) {
        self.checkers.insert(checker.kind(), checker);
    }

    pub fn get(&self, kind: CheckKind) -> Option<Arc<dyn ComplianceChecker>> {
        self.checkers.get(&kind).cloned()
    }

    pub fn has(&self, kind: CheckKind) -> bool {
        self.checkers.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}
