//! Workflow orchestrator for transaction compliance screening.
//!
//! The engine validates a transaction, fans out concurrently to the
//! compliance checks that apply to it, aggregates their risk scores under
//! partial failure, routes between automatic reporting and supervisor
//! arbitration, and compiles a terminal, auditable
//! [`DecisionRecord`](screening_types::DecisionRecord). The executor never
//! returns an error: every failure mode terminates in an escalated record.
//!
//! # Architecture
//!
//! [`WorkflowExecutor`] composes specialized components:
//!
//! - [`selector::required_checks`] — maps a transaction to its mandatory checks
//! - [`CheckDispatcher`] — concurrent fan-out/fan-in over registered checkers
//! - [`policy`] — risk aggregation and the routing decision
//! - [`SupervisorReviewer`] — override-capable arbitration for mid-band risk
//! - [`report`] — terminal record compilation, including the all-error fallback
//!
//! Collaborators are injected at construction; the engine holds no global
//! state and is safe for unbounded concurrent use.
//!
//! # Example
//!
//! ```rust
//! use screening_engine::{required_checks, route, Route, RoutingConfig, SelectorConfig};
//! use screening_types::{CheckKind, Transaction};
//!
//! let transaction = Transaction::new("txn-1", "transfer")
//!     .with_amount(60_000.0)
//!     .with_user("user-9");
//!
//! let checks = required_checks(&transaction, &SelectorConfig::default());
//! assert!(checks.contains(&CheckKind::Identity));
//! assert!(checks.contains(&CheckKind::Sanctions));
//!
//! // Only the mid band is arbitrated; both ends report directly.
//! assert_eq!(route(0.5, false, &RoutingConfig::default()), Route::SupervisorReview);
//! assert_eq!(route(0.9, false, &RoutingConfig::default()), Route::Report);
//! ```

#![deny(unsafe_code)]

pub mod dispatcher;
pub mod executor;
pub mod policy;
pub mod registry;
pub mod report;
pub mod selector;
pub mod state;
pub mod supervisor;

pub use dispatcher::CheckDispatcher;
pub use executor::{EngineConfig, WorkflowExecutor};
pub use policy::{aggregate_risk, route, NoResultPolicy, Route, RoutingConfig};
pub use registry::{CheckerRegistry, ComplianceChecker};
pub use selector::{required_checks, SelectorConfig};
pub use state::{WorkflowState, WorkflowStep};
pub use supervisor::SupervisorReviewer;
