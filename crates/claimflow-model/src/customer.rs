//! Customer records
//!
//! Created on policy registration; a registration that reuses a known
//! email reuses the existing record. Immutable afterwards except for
//! contact-field edits, which the core workflow does not exercise.

use crate::ids::{CustomerId, PolicyId};
use serde::{Deserialize, Serialize};

/// Medical profile carried for health-claim verification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalProfile {
    /// Blood group, e.g. "O+"
    pub blood_group: Option<String>,
    /// Reported allergies
    pub allergies: Option<String>,
    /// Reported chronic conditions
    pub chronic_conditions: Option<String>,
}

/// A policy-holding customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub medical: MedicalProfile,
    /// Policies held by this customer
    pub policy_ids: Vec<PolicyId>,
}

impl Customer {
    /// New customer with a generated id and no policies yet
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: CustomerId::generate(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
            medical: MedicalProfile::default(),
            policy_ids: Vec::new(),
        }
    }

    /// Attach a medical profile
    #[inline]
    #[must_use]
    pub fn with_medical(mut self, medical: MedicalProfile) -> Self {
        self.medical = medical;
        self
    }
}
