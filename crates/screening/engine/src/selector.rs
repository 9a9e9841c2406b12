use screening_types::{CheckKind, Transaction, TransactionKind};
use std::collections::BTreeSet;

/// Required-check selection thresholds.
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Amounts above this value always receive sanctions screening.
    pub high_value_threshold: f64,
    /// Asset-type tags that mark a transaction as a security instrument.
    pub security_asset_tags: BTreeSet<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            high_value_threshold: 50_000.0,
            security_asset_tags: ["security", "bond", "equity", "stock", "derivative"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Map a transaction to the set of checks that must run.
///
/// Pure, total, deterministic. Rules are evaluated independently; a
/// transaction that triggers none of them still receives the baseline
/// identity + sanctions screen.
pub fn required_checks(transaction: &Transaction, config: &SelectorConfig) -> BTreeSet<CheckKind> {
    let mut checks = BTreeSet::new();

    if transaction
        .user_id
        .as_deref()
        .is_some_and(|id| !id.trim().is_empty())
    {
        checks.insert(CheckKind::Identity);
    }

    if transaction
        .amount
        .is_some_and(|amount| amount > config.high_value_threshold)
    {
        checks.insert(CheckKind::Sanctions);
    }

    let security_tagged = transaction.asset_type.as_deref().is_some_and(|tag| {
        config
            .security_asset_tags
            .iter()
            .any(|known| known.eq_ignore_ascii_case(tag.trim()))
    });
    if transaction.kind() == Some(TransactionKind::Security) || security_tagged {
        checks.insert(CheckKind::Jurisdiction);
    }

    if checks.is_empty() {
        checks.insert(CheckKind::Identity);
        checks.insert(CheckKind::Sanctions);
    }

    checks
}
