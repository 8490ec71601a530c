//! Surveyor records
//!
//! A surveyor carries a bounded case load. The invariant
//! `0 <= current_cases <= max_cases` must hold at all times; the store
//! enforces it by running capacity checks and increments under one lock.

use crate::ids::SurveyorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Claim category a surveyor is qualified for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialization {
    HealthClaims,
    MotorClaims,
    PropertyClaims,
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Specialization::HealthClaims => "Health Claims",
            Specialization::MotorClaims => "Motor Claims",
            Specialization::PropertyClaims => "Property Claims",
        };
        write!(f, "{label}")
    }
}

/// Whether a surveyor accepts new assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Busy,
}

/// A field assessor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surveyor {
    pub id: SurveyorId,
    pub name: String,
    pub phone: String,
    pub specialization: Specialization,
    pub location: String,
    /// Claims currently assigned
    pub current_cases: u32,
    /// Assignment capacity
    pub max_cases: u32,
    /// Performance rating, 0.0 to 5.0
    pub rating: f32,
    pub status: Availability,
}

impl Surveyor {
    /// Eligible for a new assignment?
    #[inline]
    #[must_use]
    pub fn has_capacity(&self) -> bool {
        self.status == Availability::Available && self.current_cases < self.max_cases
    }
}
