//! Claimflow Model - entity types and the claim state machine
//!
//! Defines the records the workflow operates on:
//! - Identifiers (claim, policy, customer, surveyor)
//! - Customer and medical profile
//! - Policy with type-specific numbering
//! - Surveyor with case-load capacity
//! - Claim, its timeline, and the survey report
//! - The claim status state machine

#![warn(unreachable_pub)]

pub mod claim;
pub mod customer;
pub mod ids;
pub mod policy;
pub mod status;
pub mod surveyor;
pub mod timeline;

pub use claim::{
    AssignedSurveyor, Claim, ClaimDetails, ClaimKind, Decision, DocumentRef, Priority,
    SurveyReport,
};
pub use customer::{Customer, MedicalProfile};
pub use ids::{ClaimId, CustomerId, PolicyId, SurveyorId};
pub use policy::{Policy, PolicyNumber, PolicyStatus, PolicyType};
pub use status::{ClaimStatus, TransitionError};
pub use surveyor::{Availability, Specialization, Surveyor};
pub use timeline::{complete_step, initial_timeline, TimelineEntry, TimelineStep};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
