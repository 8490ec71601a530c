//! Error types for the claim workflow
//!
//! Every failure maps to a machine-checkable kind so the API surface can
//! return a structured `{success, message, error}` response without
//! inspecting error internals.

use claimflow_model::ClaimStatus;
use claimflow_store::StoreError;
use std::fmt;

/// A single failed field check, reported to the caller verbatim
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    /// Field name as submitted
    pub field: String,
    /// What was wrong with it
    pub message: String,
}

impl FieldError {
    /// Shorthand constructor
    #[inline]
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Main workflow error type
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Missing or malformed required fields
    #[error("validation failed: {}", format_fields(.0))]
    Validation(Vec<FieldError>),

    /// Referenced record is absent
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "policy"
        entity: String,
        /// Id or secondary key used in the lookup
        id: String,
    },

    /// Every eligible surveyor is at capacity
    #[error("no surveyor available for this claim type")]
    NoSurveyorAvailable,

    /// Submitting surveyor is not the one assigned to the claim
    #[error("surveyor {surveyor_id} is not assigned to claim {claim_id}")]
    Forbidden {
        claim_id: String,
        surveyor_id: String,
    },

    /// Transition attempted out of workflow order
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// Payment requested while the claim is not approved
    #[error("claim is {actual}, expected {expected}")]
    InvalidState {
        expected: ClaimStatus,
        actual: ClaimStatus,
    },

    /// Store read/write failure, surfaced as an internal error
    #[error("persistence failure: {0}")]
    Persistence(StoreError),
}

fn format_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Machine-checkable error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    NoSurveyorAvailable,
    Forbidden,
    PreconditionFailed,
    InvalidState,
    Persistence,
}

impl WorkflowError {
    /// Classify this error for the response envelope
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkflowError::Validation(_) => ErrorKind::Validation,
            WorkflowError::NotFound { .. } => ErrorKind::NotFound,
            WorkflowError::NoSurveyorAvailable => ErrorKind::NoSurveyorAvailable,
            WorkflowError::Forbidden { .. } => ErrorKind::Forbidden,
            WorkflowError::PreconditionFailed(_) => ErrorKind::PreconditionFailed,
            WorkflowError::InvalidState { .. } => ErrorKind::InvalidState,
            WorkflowError::Persistence(_) => ErrorKind::Persistence,
        }
    }

    /// Whether the same call may succeed later without changes.
    /// Capacity exhaustion clears as surveyors file reports; the rest
    /// need a different request or operator attention.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, WorkflowError::NoSurveyorAvailable)
    }

    /// Single-field validation error
    #[inline]
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(vec![FieldError::new(field, "is required")])
    }
}

impl From<StoreError> for WorkflowError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound { kind, id } => WorkflowError::NotFound {
                entity: kind.to_string(),
                id,
            },
            StoreError::NoEligibleSurveyor => WorkflowError::NoSurveyorAvailable,
            other => WorkflowError::Persistence(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimflow_store::EntityKind;

    #[test]
    fn store_not_found_maps_to_workflow_not_found() {
        let err: WorkflowError = StoreError::not_found(EntityKind::Policy, "HLT/2024/1").into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("policy"));
    }

    #[test]
    fn no_eligible_surveyor_maps_to_no_surveyor_available() {
        let err: WorkflowError = StoreError::NoEligibleSurveyor.into();
        assert_eq!(err.kind(), ErrorKind::NoSurveyorAvailable);
        assert!(err.is_retryable());
    }

    #[test]
    fn validation_display_lists_fields() {
        let err = WorkflowError::Validation(vec![
            FieldError::new("policy_number", "is required"),
            FieldError::new("estimated_amount", "must be a number"),
        ]);
        let text = err.to_string();
        assert!(text.contains("policy_number: is required"));
        assert!(text.contains("estimated_amount"));
    }

    #[test]
    fn forbidden_is_not_retryable() {
        let err = WorkflowError::Forbidden {
            claim_id: "CLM001".to_string(),
            surveyor_id: "SUR_x".to_string(),
        };
        assert!(!err.is_retryable());
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }
}
