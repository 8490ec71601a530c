//! Claim workflow engine
//!
//! Everything between the REST surface and the record store:
//!
//! - [`workflow`] - the claim lifecycle orchestrator
//! - [`matcher`] - surveyor eligibility and ranking
//! - [`submission`] - claim submission validation
//! - [`notify`] - the outbound notification seam
//! - [`settlement`] - deferred, cancellable settlement tasks
//! - [`config`] / [`error`] - tunables and the error taxonomy

#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod matcher;
pub mod notify;
pub mod settlement;
pub mod submission;
pub mod workflow;

pub use config::WorkflowConfig;
pub use error::{ErrorKind, FieldError, WorkflowError};
pub use notify::{
    LogNotifier, NoopNotifier, NotificationKind, NotificationPayload, NotificationStatus, Notifier,
};
pub use settlement::SettlementScheduler;
pub use submission::{ClaimSubmission, ValidSubmission};
pub use workflow::{
    ClaimStats, ClaimWorkflow, DecisionReceipt, PaymentReceipt, PolicyReceipt, PolicyRegistration,
    PolicyWithCustomer, SubmissionReceipt, SurveyReportInput,
};

/// Crate version, surfaced by the service health endpoint
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
