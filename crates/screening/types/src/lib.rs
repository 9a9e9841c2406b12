//! Data model for the transaction compliance screening workflow.
//!
//! These types cross the boundary between the workflow engine and its
//! collaborators: the [`Transaction`] entering a run, the [`CheckResult`]
//! each specialist checker returns, the [`SupervisorDecision`] produced by
//! arbitration, and the terminal [`DecisionRecord`] handed back to the
//! caller. Everything here is serializable so transport and persistence
//! layers can carry it unchanged.

#![deny(unsafe_code)]

pub mod check;
pub mod decision;
pub mod error;
pub mod transaction;

pub use check::{CheckKind, CheckResult, Finding, SupervisorDecision};
pub use decision::{DecisionRecord, DecisionStatus};
pub use error::{ScreeningError, ScreeningResult};
pub use transaction::{Transaction, TransactionKind};
