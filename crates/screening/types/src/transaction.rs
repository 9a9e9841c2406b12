use crate::error::ScreeningError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of transaction types accepted by the screening workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Transfer,
    Trade,
    Withdrawal,
    Deposit,
    Security,
}

impl TransactionKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Trade => "trade",
            Self::Withdrawal => "withdrawal",
            Self::Deposit => "deposit",
            Self::Security => "security",
        }
    }

    /// Parse a type label, case-insensitively. `None` for anything outside
    /// the closed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "transfer" => Some(Self::Transfer),
            "trade" => Some(Self::Trade),
            "withdrawal" => Some(Self::Withdrawal),
            "deposit" => Some(Self::Deposit),
            "security" => Some(Self::Security),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable transaction input entering the screening workflow.
///
/// The type label stays a string at the boundary; it is validated against
/// [`TransactionKind`] before any checker runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub transaction_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(id: impl Into<String>, transaction_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            transaction_type: transaction_type.into(),
            amount: None,
            user_id: None,
            asset_type: None,
            occurred_at: Utc::now(),
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_asset_type(mut self, asset_type: impl Into<String>) -> Self {
        self.asset_type = Some(asset_type.into());
        self
    }

    /// Parsed transaction kind, if the type label is in the closed set.
    pub fn kind(&self) -> Option<TransactionKind> {
        TransactionKind::parse(&self.transaction_type)
    }

    /// Structural validation, applied once before any checker is invoked.
    ///
    /// Stops at the first violated invariant: id, then type, then amount.
    pub fn validate(&self) -> Result<TransactionKind, ScreeningError> {
        if self.id.trim().is_empty() {
            return Err(ScreeningError::InvalidTransaction(
                "transaction id is required".to_string(),
            ));
        }

        if self.transaction_type.trim().is_empty() {
            return Err(ScreeningError::InvalidTransaction(
                "transaction type is required".to_string(),
            ));
        }

        let kind = self.kind().ok_or_else(|| {
            ScreeningError::InvalidTransaction(format!(
                "unknown transaction type '{}'",
                self.transaction_type
            ))
        })?;

        if let Some(amount) = self.amount {
            if !amount.is_finite() {
                return Err(ScreeningError::InvalidTransaction(
                    "transaction amount must be finite".to_string(),
                ));
            }
            if amount < 0.0 {
                return Err(ScreeningError::InvalidTransaction(format!(
                    "transaction amount {amount} is negative"
                )));
            }
        }

        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds_case_insensitively() {
        assert_eq!(
            TransactionKind::parse("Transfer"),
            Some(TransactionKind::Transfer)
        );
        assert_eq!(
            TransactionKind::parse("SECURITY"),
            Some(TransactionKind::Security)
        );
        assert_eq!(TransactionKind::parse("loan"), None);
        assert_eq!(TransactionKind::parse(""), None);
    }

    #[test]
    fn valid_transaction_passes() {
        let txn = Transaction::new("txn-1", "transfer")
            .with_amount(250.0)
            .with_user("user-1");
        assert_eq!(txn.validate().unwrap(), TransactionKind::Transfer);
    }

    #[test]
    fn missing_id_is_rejected() {
        let err = Transaction::new("", "transfer").validate().unwrap_err();
        assert!(err.to_string().contains("id is required"));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = Transaction::new("txn-1", "loan").validate().unwrap_err();
        assert!(err.to_string().contains("unknown transaction type 'loan'"));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = Transaction::new("txn-1", "deposit")
            .with_amount(-1.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn absent_amount_is_allowed() {
        assert!(Transaction::new("txn-1", "trade").validate().is_ok());
    }
}
