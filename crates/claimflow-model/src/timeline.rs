//! Claim timeline - the ordered checklist attached to every claim
//!
//! Each step is independently markable complete with a date and remark.
//! The step list is fixed; the workflow completes entries as the claim
//! advances through its states.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical timeline steps, in workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelineStep {
    ClaimReported,
    CustomerVerification,
    SurveyorAssignment,
    SurveyInProgress,
    SurveyReport,
    MedicalReview,
    ApprovalDecision,
    PaymentProcessing,
}

impl TimelineStep {
    /// All steps in workflow order
    pub const ALL: [TimelineStep; 8] = [
        TimelineStep::ClaimReported,
        TimelineStep::CustomerVerification,
        TimelineStep::SurveyorAssignment,
        TimelineStep::SurveyInProgress,
        TimelineStep::SurveyReport,
        TimelineStep::MedicalReview,
        TimelineStep::ApprovalDecision,
        TimelineStep::PaymentProcessing,
    ];
}

impl fmt::Display for TimelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimelineStep::ClaimReported => "Claim Reported",
            TimelineStep::CustomerVerification => "Customer Verification",
            TimelineStep::SurveyorAssignment => "Surveyor Assignment",
            TimelineStep::SurveyInProgress => "Survey In Progress",
            TimelineStep::SurveyReport => "Survey Report",
            TimelineStep::MedicalReview => "Medical Review",
            TimelineStep::ApprovalDecision => "Approval Decision",
            TimelineStep::PaymentProcessing => "Payment Processing",
        };
        write!(f, "{label}")
    }
}

/// One entry in a claim's timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Which step this entry tracks
    pub step: TimelineStep,
    /// Completion date, if completed
    pub date: Option<NaiveDate>,
    /// Whether the step has been completed
    pub completed: bool,
    /// Free-text remark shown to the claimant
    pub remarks: String,
}

impl TimelineEntry {
    /// Pending entry with a placeholder remark
    #[inline]
    #[must_use]
    pub fn pending(step: TimelineStep, remarks: impl Into<String>) -> Self {
        Self {
            step,
            date: None,
            completed: false,
            remarks: remarks.into(),
        }
    }

    /// Completed entry dated today-equivalent `date`
    #[inline]
    #[must_use]
    pub fn completed(step: TimelineStep, date: NaiveDate, remarks: impl Into<String>) -> Self {
        Self {
            step,
            date: Some(date),
            completed: true,
            remarks: remarks.into(),
        }
    }
}

/// Build the initial timeline for a freshly submitted claim.
///
/// The first three steps (reporting, customer verification, surveyor
/// assignment) complete during submission itself; the rest start pending.
#[must_use]
pub fn initial_timeline(today: NaiveDate, surveyor_name: &str) -> Vec<TimelineEntry> {
    vec![
        TimelineEntry::completed(
            TimelineStep::ClaimReported,
            today,
            "Claim submitted successfully",
        ),
        TimelineEntry::completed(
            TimelineStep::CustomerVerification,
            today,
            "Policy and customer details verified",
        ),
        TimelineEntry::completed(
            TimelineStep::SurveyorAssignment,
            today,
            format!("{surveyor_name} assigned for survey"),
        ),
        TimelineEntry::pending(TimelineStep::SurveyInProgress, "Field survey pending"),
        TimelineEntry::pending(TimelineStep::SurveyReport, "Survey report pending"),
        TimelineEntry::pending(TimelineStep::MedicalReview, "Review board pending"),
        TimelineEntry::pending(TimelineStep::ApprovalDecision, "Final approval pending"),
        TimelineEntry::pending(TimelineStep::PaymentProcessing, "Settlement processing"),
    ]
}

/// Mark a step complete in place. Unknown steps are ignored; the step list
/// is fixed at claim creation.
pub fn complete_step(
    timeline: &mut [TimelineEntry],
    step: TimelineStep,
    date: NaiveDate,
    remarks: impl Into<String>,
) {
    if let Some(entry) = timeline.iter_mut().find(|e| e.step == step) {
        entry.completed = true;
        entry.date = Some(date);
        entry.remarks = remarks.into();
    }
}
