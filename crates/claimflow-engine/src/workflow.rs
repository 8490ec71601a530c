//! Claim workflow engine
//!
//! Orchestrates the full claim lifecycle over the record store:
//! submission (verify policy, reserve a surveyor, build the timeline),
//! survey report intake, the review board decision, payment initiation
//! with deferred settlement, and the policy registration path.
//!
//! Every state transition goes through `ClaimStatus::transition_to`, so
//! out-of-order requests fail loudly instead of corrupting a claim.
//! Notifications are best effort and never fail an operation; their
//! outcome rides along on the operation's receipt.

use crate::config::WorkflowConfig;
use crate::error::{FieldError, WorkflowError};
use crate::matcher;
use crate::notify::{LogNotifier, NotificationKind, NotificationPayload, NotificationStatus, Notifier};
use crate::settlement::SettlementScheduler;
use crate::submission::ClaimSubmission;
use claimflow_model::{
    complete_step, initial_timeline, AssignedSurveyor, Claim, ClaimId, ClaimKind, ClaimStatus,
    Customer, Decision, DocumentRef, MedicalProfile, Policy, PolicyId, PolicyNumber, PolicyStatus,
    PolicyType, Priority, SurveyReport, Surveyor, SurveyorId, TimelineEntry, TimelineStep,
};
use claimflow_store::{RecordStore, StoreError};
use chrono::{Datelike, Months, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of a successful claim submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub claim: Claim,
    /// Outcome of the best-effort confirmation notification
    pub notification: NotificationStatus,
}

/// Result of a review board decision
#[derive(Debug, Clone, Serialize)]
pub struct DecisionReceipt {
    pub claim: Claim,
    /// Absent for a `pending` decision, which sends nothing
    pub notification: Option<NotificationStatus>,
}

/// Result of payment initiation
#[derive(Debug, Clone, Serialize)]
pub struct PaymentReceipt {
    pub claim: Claim,
    /// Reference quoted on the settlement advice
    pub payment_reference: String,
    /// Seconds until the scheduled settlement fires
    pub settles_in_secs: u64,
}

/// Per-user claim summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClaimStats {
    pub total: usize,
    pub under_review: usize,
    pub under_survey: usize,
    pub under_medical_review: usize,
    pub approved: usize,
    pub rejected: usize,
    pub payment_processing: usize,
    pub settled: usize,
    /// Sum of settled claim amounts, in whole rupees
    pub settled_amount: u64,
}

/// Survey report as filed by the assigned surveyor
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyReportInput {
    pub surveyor_id: SurveyorId,
    pub findings: String,
    pub recommendation: String,
    /// Settlement the surveyor estimates, in whole rupees
    pub estimated_settlement: u64,
    pub medical_validation: bool,
    pub documents_verified: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub documents_reviewed: Vec<String>,
}

/// Raw policy registration request, every field optional at the edge
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PolicyRegistration {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Line of business, lowercase: "motor", "health", "home", "travel", "life"
    pub policy_type: Option<String>,
    /// Sum insured in whole rupees
    pub coverage_amount: Option<u64>,
    pub blood_group: Option<String>,
    pub allergies: Option<String>,
    pub chronic_conditions: Option<String>,
}

/// Result of a policy registration
#[derive(Debug, Clone, Serialize)]
pub struct PolicyReceipt {
    pub policy: Policy,
    pub customer: Customer,
    pub notification: NotificationStatus,
}

/// Policy resolved together with its holder
#[derive(Debug, Clone, Serialize)]
pub struct PolicyWithCustomer {
    pub policy: Policy,
    pub customer: Customer,
}

/// The claim workflow engine. Hold it in an `Arc` and share that.
pub struct ClaimWorkflow {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    scheduler: SettlementScheduler,
    config: WorkflowConfig,
}

impl ClaimWorkflow {
    /// New workflow over a store, notifying through the tracing log
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, config: WorkflowConfig) -> Self {
        Self {
            store,
            notifier: Arc::new(LogNotifier),
            scheduler: SettlementScheduler::new(),
            config,
        }
    }

    /// Swap the notifier
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    // Claims

    /// Submit a claim in the given domain on behalf of `user_id`.
    ///
    /// Verifies the policy and its holder, reserves the best-ranked
    /// surveyor, derives priority from the estimate, and persists the
    /// claim with its eight-step timeline. Nothing is written when
    /// validation, policy lookup, or surveyor reservation fails.
    ///
    /// # Errors
    /// - `Validation` with field-level detail
    /// - `NotFound` for an unknown policy number
    /// - `PreconditionFailed` for a policy that is not claimable
    /// - `NoSurveyorAvailable` when every eligible surveyor is at capacity
    pub async fn submit_claim(
        &self,
        user_id: &str,
        kind: ClaimKind,
        submission: ClaimSubmission,
    ) -> Result<SubmissionReceipt, WorkflowError> {
        let valid = submission.validate(kind)?;

        let policy_number = PolicyNumber::from(valid.policy_number.as_str());
        let policy = self.store.find_policy_by_number(&policy_number).await?;
        if !policy.is_claimable() {
            return Err(WorkflowError::PreconditionFailed(format!(
                "policy {policy_number} is not active"
            )));
        }
        let customer = self.store.find_customer_by_policy(&policy.id).await?;

        let surveyor = self
            .store
            .reserve_surveyor(matcher::selector(kind, valid.location.clone()))
            .await?;

        let today = Utc::now().date_naive();
        let priority = Priority::from_estimate(valid.estimated_amount);
        let assigned = AssignedSurveyor {
            id: surveyor.id.clone(),
            name: surveyor.name.clone(),
            phone: surveyor.phone.clone(),
            assigned_date: today,
        };
        let timeline = initial_timeline(today, &surveyor.name);

        let user = user_id.to_string();
        let customer_id = customer.id.clone();
        let policy_id = policy.id.clone();
        let claim_number = policy_number.clone();
        let created = self
            .store
            .create_claim(Box::new(move |id| {
                let now = Utc::now();
                Claim {
                    id,
                    user_id: user,
                    customer_id,
                    policy_id,
                    policy_number: claim_number,
                    kind,
                    claim_type: valid.claim_type,
                    incident_date: valid.incident_date,
                    reported_date: today,
                    status: ClaimStatus::UnderSurvey,
                    priority,
                    estimated_amount: valid.estimated_amount,
                    approved_amount: 0,
                    claim_amount: 0,
                    description: valid.description,
                    details: valid.details,
                    assigned_surveyor: Some(assigned),
                    documents: Vec::new(),
                    timeline,
                    survey_report: None,
                    created_at: now,
                    updated_at: now,
                }
            }))
            .await;

        let claim = match created {
            Ok(claim) => claim,
            Err(err) => {
                // Give the reservation back; the claim never materialized.
                if let Err(release_err) = self.store.release_surveyor(&surveyor.id).await {
                    tracing::error!(
                        surveyor = %surveyor.id,
                        error = %release_err,
                        "failed to release surveyor after aborted submission"
                    );
                }
                return Err(err.into());
            }
        };

        tracing::info!(
            claim = %claim.id,
            policy = %claim.policy_number,
            surveyor = %surveyor.id,
            ?priority,
            "claim submitted"
        );

        let notification = self
            .notifier
            .send(
                NotificationKind::ClaimConfirmation,
                &NotificationPayload {
                    reference: claim.id.to_string(),
                    policy_number: Some(claim.policy_number.to_string()),
                    claim_type: Some(claim.claim_type.clone()),
                    amount: Some(claim.estimated_amount),
                    surveyor_name: Some(surveyor.name),
                },
                &customer.email,
            )
            .await;

        Ok(SubmissionReceipt {
            claim,
            notification,
        })
    }

    /// Ranked list of surveyors able to take a new claim
    pub async fn available_surveyors(
        &self,
        kind: Option<ClaimKind>,
        location: Option<&str>,
    ) -> Result<Vec<Surveyor>, WorkflowError> {
        let roster = self.store.list_surveyors().await?;
        Ok(matcher::rank(&roster, kind, location))
    }

    /// File the survey report and move the claim to medical review.
    ///
    /// # Errors
    /// - `Forbidden` when the submitting surveyor is not the assigned one
    /// - `PreconditionFailed` when a report was already filed or the claim
    ///   is out of order
    /// - `Validation` for empty findings or recommendation
    pub async fn submit_survey_report(
        &self,
        claim_id: &ClaimId,
        input: SurveyReportInput,
    ) -> Result<Claim, WorkflowError> {
        let mut errors = Vec::new();
        if input.findings.trim().is_empty() {
            errors.push(FieldError::new("findings", "is required"));
        }
        if input.recommendation.trim().is_empty() {
            errors.push(FieldError::new("recommendation", "is required"));
        }
        if input.estimated_settlement == 0 {
            errors.push(FieldError::new(
                "estimated_settlement",
                "must be greater than zero",
            ));
        }
        if !errors.is_empty() {
            return Err(WorkflowError::Validation(errors));
        }

        let claim = self.store.get_claim(claim_id).await?;
        let Some(assigned) = claim.assigned_surveyor.clone() else {
            return Err(WorkflowError::PreconditionFailed(format!(
                "claim {claim_id} has no assigned surveyor"
            )));
        };
        if assigned.id != input.surveyor_id {
            return Err(WorkflowError::Forbidden {
                claim_id: claim_id.to_string(),
                surveyor_id: input.surveyor_id.to_string(),
            });
        }
        if claim.has_survey_report() {
            return Err(WorkflowError::PreconditionFailed(format!(
                "claim {claim_id} already has a survey report"
            )));
        }
        let next = claim
            .status
            .transition_to(ClaimStatus::UnderMedicalReview)
            .map_err(|e| WorkflowError::PreconditionFailed(e.to_string()))?;

        let today = Utc::now().date_naive();
        let report = SurveyReport {
            surveyor_id: input.surveyor_id,
            surveyor_name: assigned.name.clone(),
            submitted_date: today,
            findings: input.findings,
            recommendation: input.recommendation,
            estimated_settlement: input.estimated_settlement,
            medical_validation: input.medical_validation,
            documents_verified: input.documents_verified,
            notes: input.notes.unwrap_or_default(),
            documents_reviewed: input.documents_reviewed,
        };

        let updated = self
            .store
            .update_claim(
                claim_id,
                Box::new(move |claim| {
                    claim.survey_report = Some(report);
                    claim.status = next;
                    complete_step(
                        &mut claim.timeline,
                        TimelineStep::SurveyInProgress,
                        today,
                        "Field survey completed",
                    );
                    complete_step(
                        &mut claim.timeline,
                        TimelineStep::SurveyReport,
                        today,
                        "Survey report submitted",
                    );
                    claim.updated_at = Utc::now();
                }),
            )
            .await?;

        // The report is already filed; a failed release must not undo that.
        // The slot is reclaimed out of band rather than by failing the call.
        if let Err(release_err) = self.store.release_surveyor(&assigned.id).await {
            tracing::error!(
                claim = %claim_id,
                surveyor = %assigned.id,
                error = %release_err,
                "failed to release surveyor after survey report"
            );
        }
        tracing::info!(claim = %claim_id, surveyor = %assigned.id, "survey report filed");
        Ok(updated)
    }

    /// Apply the review board decision.
    ///
    /// `Pending` is a validated no-op: the claim must be decidable, but
    /// nothing changes and no notice goes out.
    ///
    /// # Errors
    /// `PreconditionFailed` without a filed survey report or when the
    /// claim is not under medical review.
    pub async fn process_decision(
        &self,
        claim_id: &ClaimId,
        decision: Decision,
        approved_amount: Option<u64>,
        remarks: Option<String>,
    ) -> Result<DecisionReceipt, WorkflowError> {
        let claim = self.store.get_claim(claim_id).await?;
        if !claim.has_survey_report() {
            return Err(WorkflowError::PreconditionFailed(format!(
                "claim {claim_id} has no survey report on file"
            )));
        }

        let target = match decision {
            Decision::Approved => ClaimStatus::Approved,
            Decision::Rejected => ClaimStatus::Rejected,
            Decision::Pending => {
                return Ok(DecisionReceipt {
                    claim,
                    notification: None,
                })
            }
        };
        let next = claim
            .status
            .transition_to(target)
            .map_err(|e| WorkflowError::PreconditionFailed(e.to_string()))?;

        let amount = match decision {
            Decision::Approved => approved_amount.unwrap_or(claim.estimated_amount),
            _ => 0,
        };
        let today = Utc::now().date_naive();
        let note = remarks.unwrap_or_else(|| match decision {
            Decision::Approved => "Claim approved for settlement".to_string(),
            _ => "Claim rejected after review".to_string(),
        });

        let step_note = note.clone();
        let updated = self
            .store
            .update_claim(
                claim_id,
                Box::new(move |claim| {
                    claim.status = next;
                    claim.approved_amount = amount;
                    complete_step(
                        &mut claim.timeline,
                        TimelineStep::MedicalReview,
                        today,
                        "Review board assessment completed",
                    );
                    complete_step(
                        &mut claim.timeline,
                        TimelineStep::ApprovalDecision,
                        today,
                        step_note,
                    );
                    claim.updated_at = Utc::now();
                }),
            )
            .await?;

        tracing::info!(claim = %claim_id, status = %updated.status, amount, "decision recorded");

        let notification = self.notify_decision(&updated).await;
        Ok(DecisionReceipt {
            claim: updated,
            notification: Some(notification),
        })
    }

    /// Initiate settlement payment for an approved claim.
    ///
    /// Sets `PaymentProcessing`, locks the claim amount to the approved
    /// amount, and schedules the deferred settlement.
    ///
    /// # Errors
    /// `InvalidState` when the claim is not `Approved`.
    pub async fn initiate_payment(
        &self,
        claim_id: &ClaimId,
    ) -> Result<PaymentReceipt, WorkflowError> {
        let current = self.store.get_claim(claim_id).await?;
        if current.status != ClaimStatus::Approved {
            return Err(WorkflowError::InvalidState {
                expected: ClaimStatus::Approved,
                actual: current.status,
            });
        }

        let payment_reference = format!("PAY-{}", uuid::Uuid::new_v4().simple());
        let today = Utc::now().date_naive();

        let reference = payment_reference.clone();
        let updated = self
            .store
            .update_claim(
                claim_id,
                Box::new(move |claim| {
                    // Guarded inside the lock so two payment requests
                    // cannot both pass an outside status check.
                    if claim.status == ClaimStatus::Approved {
                        claim.status = ClaimStatus::PaymentProcessing;
                        claim.claim_amount = claim.approved_amount;
                        complete_step(
                            &mut claim.timeline,
                            TimelineStep::PaymentProcessing,
                            today,
                            format!("Settlement initiated, reference {reference}"),
                        );
                        claim.updated_at = Utc::now();
                    }
                }),
            )
            .await?;

        if updated.status != ClaimStatus::PaymentProcessing {
            return Err(WorkflowError::InvalidState {
                expected: ClaimStatus::Approved,
                actual: updated.status,
            });
        }

        self.scheduler.schedule(
            Arc::clone(&self.store),
            claim_id.clone(),
            self.config.settlement_delay,
        );
        tracing::info!(
            claim = %claim_id,
            amount = updated.claim_amount,
            reference = %payment_reference,
            "payment initiated"
        );

        Ok(PaymentReceipt {
            claim: updated,
            payment_reference,
            settles_in_secs: self.config.settlement_delay.as_secs(),
        })
    }

    /// Attach a document descriptor to a claim
    pub async fn add_document(
        &self,
        claim_id: &ClaimId,
        name: &str,
        content_type: &str,
        url: &str,
    ) -> Result<Claim, WorkflowError> {
        if name.trim().is_empty() {
            return Err(WorkflowError::missing_field("name"));
        }
        let document = DocumentRef {
            id: format!("DOC_{}", uuid::Uuid::new_v4().simple()),
            name: name.to_string(),
            content_type: content_type.to_string(),
            url: url.to_string(),
            uploaded_at: Utc::now(),
        };
        let updated = self
            .store
            .update_claim(
                claim_id,
                Box::new(move |claim| {
                    claim.documents.push(document);
                    claim.updated_at = Utc::now();
                }),
            )
            .await?;
        Ok(updated)
    }

    // Queries

    /// Fetch one claim
    pub async fn get_claim(&self, claim_id: &ClaimId) -> Result<Claim, WorkflowError> {
        Ok(self.store.get_claim(claim_id).await?)
    }

    /// Fetch a claim's timeline
    pub async fn get_timeline(
        &self,
        claim_id: &ClaimId,
    ) -> Result<Vec<TimelineEntry>, WorkflowError> {
        Ok(self.store.get_claim(claim_id).await?.timeline)
    }

    /// Claims raised by one user
    pub async fn list_claims_by_user(&self, user_id: &str) -> Result<Vec<Claim>, WorkflowError> {
        Ok(self.store.list_claims_by_user(user_id).await?)
    }

    /// Claims raised against one policy
    pub async fn list_claims_by_policy_number(
        &self,
        number: &PolicyNumber,
    ) -> Result<Vec<Claim>, WorkflowError> {
        Ok(self.store.list_claims_by_policy_number(number).await?)
    }

    /// Per-status summary of one user's claims
    pub async fn claim_stats(&self, user_id: &str) -> Result<ClaimStats, WorkflowError> {
        let claims = self.store.list_claims_by_user(user_id).await?;
        let mut stats = ClaimStats {
            total: claims.len(),
            ..ClaimStats::default()
        };
        for claim in &claims {
            match claim.status {
                ClaimStatus::UnderReview => stats.under_review += 1,
                ClaimStatus::UnderSurvey => stats.under_survey += 1,
                ClaimStatus::UnderMedicalReview => stats.under_medical_review += 1,
                ClaimStatus::Approved => stats.approved += 1,
                ClaimStatus::Rejected => stats.rejected += 1,
                ClaimStatus::PaymentProcessing => stats.payment_processing += 1,
                ClaimStatus::Settled => {
                    stats.settled += 1;
                    stats.settled_amount += claim.claim_amount;
                }
            }
        }
        Ok(stats)
    }

    // Policies

    /// Register a policy, creating or reusing the customer by email.
    ///
    /// Policy numbers follow `{TYPE}/{YEAR}/{RAND4}`; on a collision a new
    /// number is drawn, up to the configured attempt budget.
    ///
    /// # Errors
    /// `Validation` with field-level detail for missing or unknown fields.
    pub async fn register_policy(
        &self,
        registration: PolicyRegistration,
    ) -> Result<PolicyReceipt, WorkflowError> {
        let (valid, medical) = validate_registration(registration)?;

        let customer = match self.store.find_customer_by_email(&valid.email).await? {
            Some(existing) => existing,
            None => {
                let fresh =
                    Customer::new(valid.name, valid.email.clone(), valid.phone, valid.address)
                        .with_medical(medical);
                self.store.create_customer(fresh).await?
            }
        };

        let today = Utc::now().date_naive();
        let year = today.year();
        let status = if self.config.auto_approve_policies {
            PolicyStatus::Active
        } else {
            PolicyStatus::Pending
        };

        // The store enforces number uniqueness under its lock; on a
        // collision we draw a fresh number, up to the attempt budget.
        let mut policy = None;
        for _ in 0..self.config.policy_number_attempts {
            let rand4: u16 = rand::thread_rng().gen_range(1000..=9999);
            let now = Utc::now();
            let candidate = Policy {
                id: PolicyId::generate(),
                policy_number: PolicyNumber::format(valid.policy_type, year, rand4),
                customer_id: customer.id.clone(),
                policy_type: valid.policy_type,
                premium: valid.policy_type.base_premium(),
                coverage_amount: valid.coverage_amount,
                start_date: today,
                end_date: today.checked_add_months(Months::new(12)).unwrap_or(today),
                status,
                created_at: now,
                updated_at: now,
            };
            match self.store.create_policy(candidate).await {
                Ok(created) => {
                    policy = Some(created);
                    break;
                }
                Err(StoreError::PolicyNumberTaken { .. }) => continue,
                Err(other) => return Err(other.into()),
            }
        }
        let Some(policy) = policy else {
            return Err(WorkflowError::Persistence(
                StoreError::PolicyNumberExhausted {
                    attempts: self.config.policy_number_attempts,
                },
            ));
        };
        self.store
            .attach_policy(&customer.id, policy.id.clone())
            .await?;

        tracing::info!(
            policy = %policy.policy_number,
            customer = %customer.id,
            ?status,
            "policy registered"
        );

        let notification = self
            .notifier
            .send(
                NotificationKind::PolicyConfirmation,
                &NotificationPayload {
                    reference: policy.policy_number.to_string(),
                    policy_number: Some(policy.policy_number.to_string()),
                    amount: Some(policy.premium),
                    ..NotificationPayload::default()
                },
                &customer.email,
            )
            .await;

        Ok(PolicyReceipt {
            policy,
            customer,
            notification,
        })
    }

    /// Move a pending policy to `Approved`. Used when auto-approval is off.
    pub async fn approve_policy(&self, policy_id: &PolicyId) -> Result<Policy, WorkflowError> {
        let updated = self
            .store
            .update_policy(
                policy_id,
                Box::new(|policy| {
                    if policy.status == PolicyStatus::Pending {
                        policy.status = PolicyStatus::Approved;
                        policy.updated_at = Utc::now();
                    }
                }),
            )
            .await?;
        Ok(updated)
    }

    /// Resolve a policy and its holder by policy number
    pub async fn find_policy(
        &self,
        number: &PolicyNumber,
    ) -> Result<PolicyWithCustomer, WorkflowError> {
        let policy = self.store.find_policy_by_number(number).await?;
        let customer = self.store.find_customer_by_policy(&policy.id).await?;
        Ok(PolicyWithCustomer { policy, customer })
    }

    // Lifecycle

    /// Settlements still pending
    #[inline]
    #[must_use]
    pub fn pending_settlements(&self) -> usize {
        self.scheduler.pending()
    }

    /// Drain pending settlements and stop. Safe to call once at shutdown.
    pub async fn shutdown(&self) {
        self.scheduler.shutdown().await;
    }

    async fn notify_decision(&self, claim: &Claim) -> NotificationStatus {
        let recipient = match self.store.find_customer_by_policy(&claim.policy_id).await {
            Ok(customer) => customer.email,
            Err(err) => {
                tracing::warn!(claim = %claim.id, error = %err, "decision notice skipped");
                return NotificationStatus::skipped("unresolved-recipient");
            }
        };
        self.notifier
            .send(
                NotificationKind::DecisionNotice,
                &NotificationPayload {
                    reference: claim.id.to_string(),
                    policy_number: Some(claim.policy_number.to_string()),
                    claim_type: Some(claim.claim_type.clone()),
                    amount: Some(claim.approved_amount),
                    surveyor_name: None,
                },
                &recipient,
            )
            .await
    }

}

struct ValidRegistration {
    name: String,
    email: String,
    phone: String,
    address: String,
    policy_type: PolicyType,
    coverage_amount: u64,
}

fn validate_registration(
    registration: PolicyRegistration,
) -> Result<(ValidRegistration, MedicalProfile), WorkflowError> {
    let mut errors = Vec::new();

    let name = require_text(&mut errors, "name", registration.name);
    let email = require_text(&mut errors, "email", registration.email);
    let phone = require_text(&mut errors, "phone", registration.phone);
    let address = require_text(&mut errors, "address", registration.address);
    let policy_type = match registration.policy_type.as_deref() {
        Some(raw) => match PolicyType::parse(raw) {
            Some(t) => Some(t),
            None => {
                errors.push(FieldError::new("policy_type", "is not a known policy type"));
                None
            }
        },
        None => {
            errors.push(FieldError::new("policy_type", "is required"));
            None
        }
    };
    let coverage_amount = match registration.coverage_amount {
        Some(amount) if amount > 0 => Some(amount),
        Some(_) => {
            errors.push(FieldError::new(
                "coverage_amount",
                "must be greater than zero",
            ));
            None
        }
        None => {
            errors.push(FieldError::new("coverage_amount", "is required"));
            None
        }
    };

    match (name, email, phone, address, policy_type, coverage_amount) {
        (Some(name), Some(email), Some(phone), Some(address), Some(policy_type), Some(coverage))
            if errors.is_empty() =>
        {
            Ok((
                ValidRegistration {
                    name,
                    email,
                    phone,
                    address,
                    policy_type,
                    coverage_amount: coverage,
                },
                MedicalProfile {
                    blood_group: registration.blood_group,
                    allergies: registration.allergies,
                    chronic_conditions: registration.chronic_conditions,
                },
            ))
        }
        _ => Err(WorkflowError::Validation(errors)),
    }
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
