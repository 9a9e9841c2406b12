use crate::check::CheckKind;
use thiserror::Error;

/// Screening workflow errors.
#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("check '{kind}' failed: {message}")]
    CheckFailed { kind: CheckKind, message: String },

    #[error("no checker registered for '{0}'")]
    CheckerNotRegistered(CheckKind),

    #[error("supervisor arbitration failed: {0}")]
    Supervisor(String),

    #[error("deadline exceeded during {0}")]
    DeadlineExceeded(&'static str),
}

impl ScreeningError {
    pub fn check_failed(kind: CheckKind, message: impl Into<String>) -> Self {
        Self::CheckFailed {
            kind,
            message: message.into(),
        }
    }
}

pub type ScreeningResult<T> = Result<T, ScreeningError>;
