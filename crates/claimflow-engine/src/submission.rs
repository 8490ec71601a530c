//! Claim submission input and validation
//!
//! The submission mirrors the flat request body a portal sends: every
//! field optional at the edge, checked here with field-level errors so
//! the caller learns everything wrong in one round trip.

use crate::error::{FieldError, WorkflowError};
use claimflow_model::{ClaimDetails, ClaimKind};
use chrono::NaiveDate;
use serde::Deserialize;

/// Raw claim submission, one flat bag of optional fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClaimSubmission {
    pub policy_number: Option<String>,
    /// Subtype within the domain, e.g. "Hospitalization"
    pub claim_type: Option<String>,
    pub incident_date: Option<NaiveDate>,
    pub estimated_amount: Option<u64>,
    pub description: Option<String>,
    /// Incident location, used to prefer local surveyors
    pub location: Option<String>,

    // Health
    pub hospital_name: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub discharge_date: Option<NaiveDate>,

    // Motor
    pub vehicle_registration: Option<String>,
    pub accident_location: Option<String>,
    pub garage_name: Option<String>,

    // Property
    pub property_address: Option<String>,
    pub damage_type: Option<String>,

    // Travel
    pub destination: Option<String>,
    pub travel_dates: Option<String>,
}

/// A submission that passed validation
#[derive(Debug, Clone)]
pub struct ValidSubmission {
    pub policy_number: String,
    pub claim_type: String,
    pub incident_date: NaiveDate,
    pub estimated_amount: u64,
    pub description: String,
    pub location: Option<String>,
    pub details: ClaimDetails,
}

impl ClaimSubmission {
    /// Validate the submission for a claim domain.
    ///
    /// # Errors
    /// `WorkflowError::Validation` listing every missing or malformed
    /// field, never just the first one.
    pub fn validate(self, kind: ClaimKind) -> Result<ValidSubmission, WorkflowError> {
        let mut errors = Vec::new();

        // Domain fields first; this borrows the submission before the
        // shared fields are moved out below.
        let details = self.build_details(kind, &mut errors);

        let policy_number = require_text(&mut errors, "policy_number", self.policy_number);
        let incident_date = require(&mut errors, "incident_date", self.incident_date);
        let description = require_text(&mut errors, "description", self.description);
        let estimated_amount = match self.estimated_amount {
            Some(amount) if amount > 0 => Some(amount),
            Some(_) => {
                errors.push(FieldError::new(
                    "estimated_amount",
                    "must be greater than zero",
                ));
                None
            }
            None => {
                errors.push(FieldError::new("estimated_amount", "is required"));
                None
            }
        };

        let claim_type = self
            .claim_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| default_claim_type(kind).to_string());
        let location = self.location.filter(|l| !l.trim().is_empty());

        match (policy_number, incident_date, estimated_amount, description, details) {
            (
                Some(policy_number),
                Some(incident_date),
                Some(estimated_amount),
                Some(description),
                Some(details),
            ) if errors.is_empty() => Ok(ValidSubmission {
                policy_number,
                claim_type,
                incident_date,
                estimated_amount,
                description,
                location,
                details,
            }),
            _ => Err(WorkflowError::Validation(errors)),
        }
    }

    fn build_details(
        &self,
        kind: ClaimKind,
        errors: &mut Vec<FieldError>,
    ) -> Option<ClaimDetails> {
        match kind {
            ClaimKind::Health => {
                let hospital_name =
                    require_text(errors, "hospital_name", self.hospital_name.clone());
                let diagnosis = require_text(errors, "diagnosis", self.diagnosis.clone());
                Some(ClaimDetails::Health {
                    hospital_name: hospital_name?,
                    diagnosis: diagnosis?,
                    treatment: self.treatment.clone(),
                    admission_date: self.admission_date,
                    discharge_date: self.discharge_date,
                })
            }
            ClaimKind::Motor => {
                let vehicle_registration = require_text(
                    errors,
                    "vehicle_registration",
                    self.vehicle_registration.clone(),
                );
                Some(ClaimDetails::Motor {
                    vehicle_registration: vehicle_registration?,
                    accident_location: self.accident_location.clone(),
                    garage_name: self.garage_name.clone(),
                })
            }
            ClaimKind::Property => {
                let property_address =
                    require_text(errors, "property_address", self.property_address.clone());
                Some(ClaimDetails::Property {
                    property_address: property_address?,
                    damage_type: self.damage_type.clone(),
                })
            }
            ClaimKind::Travel => {
                let destination = require_text(errors, "destination", self.destination.clone());
                Some(ClaimDetails::Travel {
                    destination: destination?,
                    travel_dates: self.travel_dates.clone(),
                })
            }
        }
    }
}

fn default_claim_type(kind: ClaimKind) -> &'static str {
    match kind {
        ClaimKind::Health => "Hospitalization",
        ClaimKind::Motor => "Accident Damage",
        ClaimKind::Property => "Property Damage",
        ClaimKind::Travel => "Trip Interruption",
    }
}

fn require<T>(errors: &mut Vec<FieldError>, field: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.push(FieldError::new(field, "is required"));
    }
    value
}

fn require_text(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<String>,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn health_submission() -> ClaimSubmission {
        ClaimSubmission {
            policy_number: Some("HLT/2024/1234".to_string()),
            incident_date: NaiveDate::from_ymd_opt(2024, 2, 10),
            estimated_amount: Some(150_000),
            description: Some("Emergency appendectomy".to_string()),
            hospital_name: Some("City Care".to_string()),
            diagnosis: Some("Acute appendicitis".to_string()),
            ..ClaimSubmission::default()
        }
    }

    #[test]
    fn valid_health_submission_passes() {
        let valid = health_submission().validate(ClaimKind::Health).unwrap();
        assert_eq!(valid.policy_number, "HLT/2024/1234");
        assert_eq!(valid.claim_type, "Hospitalization");
        assert!(matches!(valid.details, ClaimDetails::Health { .. }));
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let result = ClaimSubmission::default().validate(ClaimKind::Health);
        let Err(WorkflowError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"policy_number"));
        assert!(fields.contains(&"incident_date"));
        assert!(fields.contains(&"estimated_amount"));
        assert!(fields.contains(&"description"));
        assert!(fields.contains(&"hospital_name"));
        assert!(fields.contains(&"diagnosis"));
    }

    #[test]
    fn health_claim_requires_hospital_and_diagnosis() {
        let mut submission = health_submission();
        submission.hospital_name = None;
        submission.diagnosis = Some("   ".to_string());

        let Err(WorkflowError::Validation(errors)) = submission.validate(ClaimKind::Health) else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["hospital_name", "diagnosis"]);
    }

    #[test]
    fn zero_estimate_is_rejected() {
        let mut submission = health_submission();
        submission.estimated_amount = Some(0);
        let Err(WorkflowError::Validation(errors)) = submission.validate(ClaimKind::Health) else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "estimated_amount");
    }

    #[test]
    fn motor_claim_requires_registration() {
        let submission = ClaimSubmission {
            policy_number: Some("MOT/2024/8800".to_string()),
            incident_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            estimated_amount: Some(30_000),
            description: Some("Front bumper damage".to_string()),
            ..ClaimSubmission::default()
        };
        let Err(WorkflowError::Validation(errors)) = submission.validate(ClaimKind::Motor) else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "vehicle_registration");
    }

    #[test]
    fn explicit_claim_type_is_kept() {
        let mut submission = health_submission();
        submission.claim_type = Some("Day Care Procedure".to_string());
        let valid = submission.validate(ClaimKind::Health).unwrap();
        assert_eq!(valid.claim_type, "Day Care Procedure");
    }

    #[test]
    fn deserializes_from_flat_json() {
        let submission: ClaimSubmission = serde_json::from_str(
            r#"{
                "policy_number": "HLT/2024/1234",
                "incident_date": "2024-02-10",
                "estimated_amount": 80000,
                "description": "test",
                "hospital_name": "City Care",
                "diagnosis": "test"
            }"#,
        )
        .unwrap();
        assert!(submission.validate(ClaimKind::Health).is_ok());
    }
}
