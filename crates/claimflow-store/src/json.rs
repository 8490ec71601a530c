//! JSON-backed record store
//!
//! Each entity type lives in one collection guarded by its own
//! `tokio::sync::Mutex`; a mutation reads, updates, and (when a data
//! directory is configured) rewrites the collection's JSON array while
//! the lock is held. Holding the lock across the whole read-modify-write
//! cycle is what rules out lost updates between concurrent mutations.
//!
//! Files are written to a temp path and renamed so a crash mid-write
//! cannot truncate a collection.

use crate::error::{EntityKind, StoreError};
use crate::store::{
    ClaimFactory, ClaimMutator, PolicyMutator, RecordStore, SurveyorSelector,
};
use async_trait::async_trait;
use claimflow_model::{
    Claim, ClaimId, Customer, CustomerId, Policy, PolicyId, PolicyNumber, Surveyor, SurveyorId,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

const CUSTOMERS_FILE: &str = "customers.json";
const POLICIES_FILE: &str = "policies.json";
const SURVEYORS_FILE: &str = "surveyors.json";
const CLAIMS_FILE: &str = "claims.json";

/// Record store over in-memory collections with optional JSON persistence.
#[derive(Debug)]
pub struct JsonStore {
    customers: Mutex<Vec<Customer>>,
    policies: Mutex<Vec<Policy>>,
    surveyors: Mutex<Vec<Surveyor>>,
    claims: Mutex<Vec<Claim>>,
    /// Monotonic claim sequence, independent of collection size
    claim_seq: AtomicU64,
    data_dir: Option<PathBuf>,
}

impl JsonStore {
    /// Purely in-memory store, nothing written to disk
    #[must_use]
    pub fn ephemeral() -> Self {
        Self {
            customers: Mutex::new(Vec::new()),
            policies: Mutex::new(Vec::new()),
            surveyors: Mutex::new(Vec::new()),
            claims: Mutex::new(Vec::new()),
            claim_seq: AtomicU64::new(0),
            data_dir: None,
        }
    }

    /// Open (or initialize) a store at `dir`, loading any existing
    /// collections and seeding the claim counter from the highest
    /// persisted id.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        let customers: Vec<Customer> = load_collection(&dir.join(CUSTOMERS_FILE)).await?;
        let policies: Vec<Policy> = load_collection(&dir.join(POLICIES_FILE)).await?;
        let surveyors: Vec<Surveyor> = load_collection(&dir.join(SURVEYORS_FILE)).await?;
        let claims: Vec<Claim> = load_collection(&dir.join(CLAIMS_FILE)).await?;

        let claim_seq = claims
            .iter()
            .filter_map(|c| c.id.seq())
            .max()
            .unwrap_or(0);

        tracing::info!(
            dir = %dir.display(),
            customers = customers.len(),
            policies = policies.len(),
            surveyors = surveyors.len(),
            claims = claims.len(),
            "record store opened"
        );

        Ok(Self {
            customers: Mutex::new(customers),
            policies: Mutex::new(policies),
            surveyors: Mutex::new(surveyors),
            claims: Mutex::new(claims),
            claim_seq: AtomicU64::new(claim_seq),
            data_dir: Some(dir),
        })
    }

    /// Rewrite one collection file. Callers hold the collection's lock.
    async fn flush<T: Serialize>(&self, file: &str, records: &[T]) -> Result<(), StoreError> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };
        let path = dir.join(file);
        let tmp = dir.join(format!("{file}.tmp"));
        let bytes = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

async fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl RecordStore for JsonStore {
    async fn create_customer(&self, customer: Customer) -> Result<Customer, StoreError> {
        let mut customers = self.customers.lock().await;
        customers.push(customer.clone());
        self.flush(CUSTOMERS_FILE, &customers).await?;
        Ok(customer)
    }

    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>, StoreError> {
        let customers = self.customers.lock().await;
        Ok(customers
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_customer_by_policy(&self, policy_id: &PolicyId) -> Result<Customer, StoreError> {
        let customer_id = {
            let policies = self.policies.lock().await;
            policies
                .iter()
                .find(|p| &p.id == policy_id)
                .map(|p| p.customer_id.clone())
                .ok_or_else(|| StoreError::not_found(EntityKind::Policy, policy_id.as_str()))?
        };

        let customers = self.customers.lock().await;
        customers
            .iter()
            .find(|c| c.id == customer_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Customer, customer_id.as_str()))
    }

    async fn attach_policy(
        &self,
        customer_id: &CustomerId,
        policy_id: PolicyId,
    ) -> Result<(), StoreError> {
        let mut customers = self.customers.lock().await;
        let customer = customers
            .iter_mut()
            .find(|c| &c.id == customer_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Customer, customer_id.as_str()))?;
        if !customer.policy_ids.contains(&policy_id) {
            customer.policy_ids.push(policy_id);
        }
        self.flush(CUSTOMERS_FILE, &customers).await?;
        Ok(())
    }

    async fn create_policy(&self, policy: Policy) -> Result<Policy, StoreError> {
        let mut policies = self.policies.lock().await;
        // Uniqueness check and insert under the same lock
        if policies
            .iter()
            .any(|p| p.policy_number == policy.policy_number)
        {
            return Err(StoreError::PolicyNumberTaken {
                number: policy.policy_number.to_string(),
            });
        }
        policies.push(policy.clone());
        self.flush(POLICIES_FILE, &policies).await?;
        Ok(policy)
    }

    async fn policy_number_exists(&self, number: &PolicyNumber) -> Result<bool, StoreError> {
        let policies = self.policies.lock().await;
        Ok(policies.iter().any(|p| &p.policy_number == number))
    }

    async fn find_policy_by_number(&self, number: &PolicyNumber) -> Result<Policy, StoreError> {
        let policies = self.policies.lock().await;
        policies
            .iter()
            .find(|p| &p.policy_number == number)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Policy, number.as_str()))
    }

    async fn update_policy(
        &self,
        id: &PolicyId,
        mutate: PolicyMutator,
    ) -> Result<Policy, StoreError> {
        let mut policies = self.policies.lock().await;
        let policy = policies
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Policy, id.as_str()))?;
        mutate(policy);
        let updated = policy.clone();
        self.flush(POLICIES_FILE, &policies).await?;
        Ok(updated)
    }

    async fn insert_surveyor(&self, surveyor: Surveyor) -> Result<(), StoreError> {
        let mut surveyors = self.surveyors.lock().await;
        surveyors.push(surveyor);
        self.flush(SURVEYORS_FILE, &surveyors).await?;
        Ok(())
    }

    async fn list_surveyors(&self) -> Result<Vec<Surveyor>, StoreError> {
        let surveyors = self.surveyors.lock().await;
        Ok(surveyors.clone())
    }

    async fn reserve_surveyor(&self, select: SurveyorSelector) -> Result<Surveyor, StoreError> {
        let mut surveyors = self.surveyors.lock().await;

        let chosen = select(&surveyors).ok_or(StoreError::NoEligibleSurveyor)?;
        let surveyor = surveyors
            .iter_mut()
            .find(|s| s.id == chosen)
            .ok_or_else(|| StoreError::not_found(EntityKind::Surveyor, chosen.as_str()))?;

        // The selector sees a snapshot taken under this same lock, so this
        // second check only guards against a selector picking an
        // ineligible candidate.
        if !surveyor.has_capacity() {
            return Err(StoreError::NoEligibleSurveyor);
        }

        surveyor.current_cases += 1;
        let reserved = surveyor.clone();
        self.flush(SURVEYORS_FILE, &surveyors).await?;
        Ok(reserved)
    }

    async fn release_surveyor(&self, id: &SurveyorId) -> Result<Surveyor, StoreError> {
        let mut surveyors = self.surveyors.lock().await;
        let surveyor = surveyors
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Surveyor, id.as_str()))?;
        surveyor.current_cases = surveyor.current_cases.saturating_sub(1);
        let released = surveyor.clone();
        self.flush(SURVEYORS_FILE, &surveyors).await?;
        Ok(released)
    }

    async fn create_claim(&self, make: ClaimFactory) -> Result<Claim, StoreError> {
        let mut claims = self.claims.lock().await;
        // Counter allocation happens under the claims lock so ids are
        // dense as well as unique.
        let seq = self.claim_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let claim = make(ClaimId::from_seq(seq));
        claims.push(claim.clone());
        self.flush(CLAIMS_FILE, &claims).await?;
        Ok(claim)
    }

    async fn get_claim(&self, id: &ClaimId) -> Result<Claim, StoreError> {
        let claims = self.claims.lock().await;
        claims
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Claim, id.as_str()))
    }

    async fn update_claim(&self, id: &ClaimId, mutate: ClaimMutator) -> Result<Claim, StoreError> {
        let mut claims = self.claims.lock().await;
        let claim = claims
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Claim, id.as_str()))?;
        mutate(claim);
        let updated = claim.clone();
        self.flush(CLAIMS_FILE, &claims).await?;
        Ok(updated)
    }

    async fn list_claims_by_user(&self, user_id: &str) -> Result<Vec<Claim>, StoreError> {
        let claims = self.claims.lock().await;
        Ok(claims.iter().filter(|c| c.user_id == user_id).cloned().collect())
    }

    async fn list_claims_by_policy_number(
        &self,
        number: &PolicyNumber,
    ) -> Result<Vec<Claim>, StoreError> {
        let claims = self.claims.lock().await;
        Ok(claims
            .iter()
            .filter(|c| &c.policy_number == number)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimflow_model::{Availability, Specialization};

    fn surveyor(id: &str, current: u32, max: u32) -> Surveyor {
        Surveyor {
            id: SurveyorId::from(id),
            name: format!("Surveyor {id}"),
            phone: "+91-98".to_string(),
            specialization: Specialization::HealthClaims,
            location: "Mumbai".to_string(),
            current_cases: current,
            max_cases: max,
            rating: 4.0,
            status: Availability::Available,
        }
    }

    #[tokio::test]
    async fn reserve_increments_case_load() {
        let store = JsonStore::ephemeral();
        store.insert_surveyor(surveyor("SUR_a", 0, 2)).await.unwrap();

        let reserved = store
            .reserve_surveyor(Box::new(|roster| Some(roster[0].id.clone())))
            .await
            .unwrap();
        assert_eq!(reserved.current_cases, 1);
    }

    #[tokio::test]
    async fn reserve_rejects_full_surveyor() {
        let store = JsonStore::ephemeral();
        store.insert_surveyor(surveyor("SUR_a", 2, 2)).await.unwrap();

        let result = store
            .reserve_surveyor(Box::new(|roster| Some(roster[0].id.clone())))
            .await;
        assert!(matches!(result, Err(StoreError::NoEligibleSurveyor)));
    }

    #[tokio::test]
    async fn reserve_with_empty_selection_is_an_error() {
        let store = JsonStore::ephemeral();
        let result = store.reserve_surveyor(Box::new(|_| None)).await;
        assert!(matches!(result, Err(StoreError::NoEligibleSurveyor)));
    }

    #[tokio::test]
    async fn release_floors_at_zero() {
        let store = JsonStore::ephemeral();
        store.insert_surveyor(surveyor("SUR_a", 0, 2)).await.unwrap();

        let released = store
            .release_surveyor(&SurveyorId::from("SUR_a"))
            .await
            .unwrap();
        assert_eq!(released.current_cases, 0);
    }

    #[tokio::test]
    async fn claim_ids_are_sequential() {
        let store = JsonStore::ephemeral();
        let first = store
            .create_claim(Box::new(|id| test_claim(id)))
            .await
            .unwrap();
        let second = store
            .create_claim(Box::new(|id| test_claim(id)))
            .await
            .unwrap();
        assert_eq!(first.id.as_str(), "CLM001");
        assert_eq!(second.id.as_str(), "CLM002");
    }

    #[tokio::test]
    async fn missing_claim_is_not_found() {
        let store = JsonStore::ephemeral();
        let result = store.get_claim(&ClaimId::from("CLM999")).await;
        assert!(matches!(
            result,
            Err(StoreError::NotFound {
                kind: EntityKind::Claim,
                ..
            })
        ));
    }

    fn test_claim(id: ClaimId) -> Claim {
        use chrono::{NaiveDate, Utc};
        use claimflow_model::{ClaimDetails, ClaimKind, ClaimStatus, Priority};
        Claim {
            id,
            user_id: "user1".to_string(),
            customer_id: CustomerId::from("CUST_x"),
            policy_id: PolicyId::from("POL_x"),
            policy_number: PolicyNumber::from("HLT/2024/1111"),
            kind: ClaimKind::Health,
            claim_type: "Hospitalization".to_string(),
            incident_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            reported_date: NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
            status: ClaimStatus::UnderSurvey,
            priority: Priority::Low,
            estimated_amount: 10_000,
            approved_amount: 0,
            claim_amount: 0,
            description: "test".to_string(),
            details: ClaimDetails::Health {
                hospital_name: "City Care".to_string(),
                diagnosis: "test".to_string(),
                treatment: None,
                admission_date: None,
                discharge_date: None,
            },
            assigned_surveyor: None,
            documents: Vec::new(),
            timeline: Vec::new(),
            survey_report: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
