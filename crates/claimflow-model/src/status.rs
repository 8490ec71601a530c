//! Claim status state machine
//!
//! A claim moves through a fixed sequence of review states. Out-of-order
//! transitions are rejected here rather than silently accepted, which is
//! what keeps the workflow's ordering guarantee.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Submitted, policy and customer verified
    UnderReview,
    /// Surveyor assigned, field survey pending
    UnderSurvey,
    /// Survey report filed, awaiting the review board
    UnderMedicalReview,
    /// Decision taken in the claimant's favour
    Approved,
    /// Decision taken against the claimant (terminal)
    Rejected,
    /// Settlement payment in flight
    PaymentProcessing,
    /// Paid out (terminal)
    Settled,
}

impl ClaimStatus {
    /// States reachable from this one
    #[must_use]
    pub fn allowed_transitions(self) -> Vec<ClaimStatus> {
        use ClaimStatus::*;
        match self {
            UnderReview => vec![UnderSurvey, Rejected],
            UnderSurvey => vec![UnderMedicalReview, Rejected],
            UnderMedicalReview => vec![Approved, Rejected],
            Approved => vec![PaymentProcessing],
            PaymentProcessing => vec![Settled],
            Rejected | Settled => vec![],
        }
    }

    /// Whether this state admits no further transitions
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, ClaimStatus::Rejected | ClaimStatus::Settled)
    }

    /// Validate a transition, returning the target state on success
    pub fn transition_to(self, to: ClaimStatus) -> Result<ClaimStatus, TransitionError> {
        if self.allowed_transitions().contains(&to) {
            Ok(to)
        } else {
            Err(TransitionError { from: self, to })
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ClaimStatus::UnderReview => "Under Review",
            ClaimStatus::UnderSurvey => "Under Survey",
            ClaimStatus::UnderMedicalReview => "Under Medical Review",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::PaymentProcessing => "Payment Processing",
            ClaimStatus::Settled => "Settled",
        };
        write!(f, "{label}")
    }
}

/// Illegal state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal claim transition: {from} -> {to}")]
pub struct TransitionError {
    /// State the claim was in
    pub from: ClaimStatus,
    /// State the caller asked for
    pub to: ClaimStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ClaimStatus::*;

    #[test]
    fn happy_path_transitions_are_allowed() {
        assert_eq!(UnderReview.transition_to(UnderSurvey), Ok(UnderSurvey));
        assert_eq!(
            UnderSurvey.transition_to(UnderMedicalReview),
            Ok(UnderMedicalReview)
        );
        assert_eq!(UnderMedicalReview.transition_to(Approved), Ok(Approved));
        assert_eq!(
            Approved.transition_to(PaymentProcessing),
            Ok(PaymentProcessing)
        );
        assert_eq!(PaymentProcessing.transition_to(Settled), Ok(Settled));
    }

    #[test]
    fn out_of_order_transitions_are_rejected() {
        assert!(UnderSurvey.transition_to(Approved).is_err());
        assert!(UnderReview.transition_to(PaymentProcessing).is_err());
        assert!(UnderMedicalReview.transition_to(Settled).is_err());
    }

    #[test]
    fn terminal_states_admit_nothing() {
        assert!(Rejected.is_terminal());
        assert!(Settled.is_terminal());
        assert!(Rejected.allowed_transitions().is_empty());
        assert!(Settled.allowed_transitions().is_empty());
    }

    #[test]
    fn rejection_is_reachable_before_approval_only() {
        assert!(UnderMedicalReview.transition_to(Rejected).is_ok());
        assert!(Approved.transition_to(Rejected).is_err());
        assert!(PaymentProcessing.transition_to(Rejected).is_err());
    }
}
