//! Claim records
//!
//! A claim is created on submission and mutated only by the workflow
//! engine for the rest of its lifecycle. It embeds a snapshot of the
//! assigned surveyor, the fixed timeline checklist, uploaded document
//! descriptors, and (once filed) the survey report.

use crate::ids::{ClaimId, CustomerId, PolicyId, SurveyorId};
use crate::policy::PolicyNumber;
use crate::status::ClaimStatus;
use crate::timeline::TimelineEntry;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Claim domain, matching the policy's line of business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimKind {
    Health,
    Motor,
    Property,
    Travel,
}

impl ClaimKind {
    /// Parse the lowercase form used in submission paths
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "health" => Some(ClaimKind::Health),
            "motor" => Some(ClaimKind::Motor),
            "property" | "home" => Some(ClaimKind::Property),
            "travel" => Some(ClaimKind::Travel),
            _ => None,
        }
    }
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ClaimKind::Health => "Health Claim",
            ClaimKind::Motor => "Motor Claim",
            ClaimKind::Property => "Property Claim",
            ClaimKind::Travel => "Travel Claim",
        };
        write!(f, "{label}")
    }
}

/// Priority derived from the estimated amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Canonical derivation rule: `>100000 -> High`, `>50000 -> Medium`
    #[inline]
    #[must_use]
    pub fn from_estimate(estimated_amount: u64) -> Self {
        if estimated_amount > 100_000 {
            Priority::High
        } else if estimated_amount > 50_000 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

/// Review board decision on a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approved,
    Rejected,
    /// Validated no-op: the claim stays in medical review
    Pending,
}

impl Decision {
    /// Parse the lowercase form used in process requests
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "approved" => Some(Decision::Approved),
            "rejected" => Some(Decision::Rejected),
            "pending" => Some(Decision::Pending),
            _ => None,
        }
    }
}

/// Snapshot of the surveyor taken at assignment time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedSurveyor {
    pub id: SurveyorId,
    pub name: String,
    pub phone: String,
    pub assigned_date: NaiveDate,
}

/// Descriptor of an uploaded supporting document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: String,
    pub name: String,
    /// MIME type
    pub content_type: String,
    /// Storage location
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Survey report filed by the assigned surveyor. Written once; there is
/// no revision support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyReport {
    pub surveyor_id: SurveyorId,
    pub surveyor_name: String,
    pub submitted_date: NaiveDate,
    pub findings: String,
    pub recommendation: String,
    /// Settlement amount the surveyor estimates, in whole rupees
    pub estimated_settlement: u64,
    pub medical_validation: bool,
    pub documents_verified: bool,
    pub notes: String,
    /// Fixed list of document categories the surveyor reviewed
    pub documents_reviewed: Vec<String>,
}

/// Domain-specific detail blob attached at submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClaimDetails {
    Health {
        hospital_name: String,
        diagnosis: String,
        treatment: Option<String>,
        admission_date: Option<NaiveDate>,
        discharge_date: Option<NaiveDate>,
    },
    Motor {
        vehicle_registration: String,
        accident_location: Option<String>,
        garage_name: Option<String>,
    },
    Property {
        property_address: String,
        damage_type: Option<String>,
    },
    Travel {
        destination: String,
        travel_dates: Option<String>,
    },
}

/// A compensation request tracked through the fixed review sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    /// Authenticated user who raised the claim
    pub user_id: String,
    pub customer_id: CustomerId,
    pub policy_id: PolicyId,
    pub policy_number: PolicyNumber,
    pub kind: ClaimKind,
    /// Subtype within the domain, e.g. "Hospitalization"
    pub claim_type: String,
    pub incident_date: NaiveDate,
    pub reported_date: NaiveDate,
    pub status: ClaimStatus,
    pub priority: Priority,
    /// Claimant's estimate, in whole rupees
    pub estimated_amount: u64,
    /// Amount granted by the review board; zero until decided
    pub approved_amount: u64,
    /// Amount settled; zero until payment initiates
    pub claim_amount: u64,
    pub description: String,
    pub details: ClaimDetails,
    pub assigned_surveyor: Option<AssignedSurveyor>,
    pub documents: Vec<DocumentRef>,
    pub timeline: Vec<TimelineEntry>,
    pub survey_report: Option<SurveyReport>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Whether a survey report has been filed
    #[inline]
    #[must_use]
    pub fn has_survey_report(&self) -> bool {
        self.survey_report.is_some()
    }
}
