//! Shared fixtures for claimflow tests
//!
//! Seeded stores, a canned surveyor roster, and a notifier that records
//! what it was asked to send. Test-only; not shipped with the service.

use async_trait::async_trait;
use claimflow_engine::{
    ClaimSubmission, ClaimWorkflow, NotificationKind, NotificationPayload, NotificationStatus,
    Notifier, SurveyReportInput, WorkflowConfig,
};
use claimflow_model::{
    Availability, Customer, Policy, PolicyId, PolicyNumber, PolicyStatus, PolicyType,
    Specialization, Surveyor, SurveyorId,
};
use claimflow_store::{JsonStore, RecordStore};
use chrono::{NaiveDate, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Policy number every seeded fixture claims against
pub const SEED_POLICY_NUMBER: &str = "HLT/2024/1234";

/// Email of the seeded policyholder
pub const SEED_CUSTOMER_EMAIL: &str = "asha@example.com";

/// One recorded notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub kind: NotificationKind,
    pub reference: String,
    pub recipient: String,
}

/// Notifier that records every send and always reports delivery
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentNotification>>,
}

impl RecordingNotifier {
    /// Everything sent so far, in order
    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        kind: NotificationKind,
        payload: &NotificationPayload,
        recipient: &str,
    ) -> NotificationStatus {
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(SentNotification {
                kind,
                reference: payload.reference.clone(),
                recipient: recipient.to_string(),
            });
        NotificationStatus::delivered("recording")
    }
}

/// Build a surveyor with sensible defaults
#[must_use]
pub fn surveyor(
    id: &str,
    name: &str,
    specialization: Specialization,
    rating: f32,
    max_cases: u32,
) -> Surveyor {
    Surveyor {
        id: SurveyorId::from(id),
        name: name.to_string(),
        phone: "+91-9800000000".to_string(),
        specialization,
        location: "Mumbai".to_string(),
        current_cases: 0,
        max_cases,
        rating,
        status: Availability::Available,
    }
}

/// The standard three-surveyor roster used across tests
#[must_use]
pub fn default_roster() -> Vec<Surveyor> {
    vec![
        surveyor("SUR_priya", "Priya Sharma", Specialization::HealthClaims, 4.8, 5),
        surveyor("SUR_arun", "Arun Iyer", Specialization::HealthClaims, 4.2, 5),
        surveyor("SUR_vikram", "Vikram Singh", Specialization::MotorClaims, 4.5, 5),
    ]
}

/// Seed a customer holding one active health policy. Returns the policy.
pub async fn seed_policyholder(store: &dyn RecordStore) -> Policy {
    let customer = store
        .create_customer(Customer::new(
            "Asha Rao",
            SEED_CUSTOMER_EMAIL,
            "+91-9001112222",
            "12 Hill Road, Mumbai",
        ))
        .await
        .expect("seed customer");
    let now = Utc::now();
    let policy = store
        .create_policy(Policy {
            id: PolicyId::generate(),
            policy_number: PolicyNumber::from(SEED_POLICY_NUMBER),
            customer_id: customer.id.clone(),
            policy_type: PolicyType::Health,
            premium: 5_000,
            coverage_amount: 500_000,
            start_date: now.date_naive(),
            end_date: now.date_naive(),
            status: PolicyStatus::Active,
            created_at: now,
            updated_at: now,
        })
        .await
        .expect("seed policy");
    store
        .attach_policy(&customer.id, policy.id.clone())
        .await
        .expect("attach policy");
    policy
}

/// A valid health claim submission against the seeded policy
#[must_use]
pub fn health_submission(estimate: u64) -> ClaimSubmission {
    ClaimSubmission {
        policy_number: Some(SEED_POLICY_NUMBER.to_string()),
        incident_date: NaiveDate::from_ymd_opt(2024, 2, 10),
        estimated_amount: Some(estimate),
        description: Some("Emergency appendectomy".to_string()),
        hospital_name: Some("City Care Hospital".to_string()),
        diagnosis: Some("Acute appendicitis".to_string()),
        ..ClaimSubmission::default()
    }
}

/// A complete survey report from the given surveyor
#[must_use]
pub fn survey_report(surveyor_id: &str, settlement: u64) -> SurveyReportInput {
    SurveyReportInput {
        surveyor_id: SurveyorId::from(surveyor_id),
        findings: "Hospitalization and procedure verified".to_string(),
        recommendation: "Approve".to_string(),
        estimated_settlement: settlement,
        medical_validation: true,
        documents_verified: true,
        notes: None,
        documents_reviewed: vec!["Discharge Summary".to_string()],
    }
}

/// Fully seeded workflow plus handles to its store and notifier
pub struct TestWorkflow {
    pub workflow: Arc<ClaimWorkflow>,
    pub store: Arc<dyn RecordStore>,
    pub notifier: Arc<RecordingNotifier>,
}

/// Ephemeral store with the default roster and policyholder, wrapped in a
/// workflow whose settlements fire almost immediately.
pub async fn seeded_workflow() -> TestWorkflow {
    let store: Arc<dyn RecordStore> = Arc::new(JsonStore::ephemeral());
    seed_policyholder(store.as_ref()).await;
    for s in default_roster() {
        store.insert_surveyor(s).await.expect("seed surveyor");
    }

    let notifier = Arc::new(RecordingNotifier::default());
    let workflow = ClaimWorkflow::new(
        Arc::clone(&store),
        WorkflowConfig::new().with_settlement_delay(Duration::from_millis(10)),
    )
    .with_notifier(Arc::clone(&notifier) as Arc<dyn Notifier>);

    TestWorkflow {
        workflow: Arc::new(workflow),
        store,
        notifier,
    }
}
