//! The `RecordStore` seam
//!
//! All shared mutable state goes through this trait; no component caches
//! and independently mutates a copy of a record. Mutations take closures
//! so the store can run them while holding the collection's lock, which
//! gives at-most-one-concurrent-mutator-per-collection semantics.

use crate::error::StoreError;
use async_trait::async_trait;
use claimflow_model::{
    Claim, ClaimId, Customer, CustomerId, Policy, PolicyId, PolicyNumber, Surveyor, SurveyorId,
};

/// In-place claim mutation, run under the claims lock
pub type ClaimMutator = Box<dyn FnOnce(&mut Claim) + Send>;

/// In-place policy mutation, run under the policies lock
pub type PolicyMutator = Box<dyn FnOnce(&mut Policy) + Send>;

/// Builds a claim once the store has allocated its id
pub type ClaimFactory = Box<dyn FnOnce(ClaimId) -> Claim + Send>;

/// Picks a surveyor from a snapshot of the roster. Runs under the
/// surveyors lock so the pick and the case-load increment are one logical
/// operation.
pub type SurveyorSelector = Box<dyn FnOnce(&[Surveyor]) -> Option<SurveyorId> + Send>;

/// CRUD over the Customer, Policy, Surveyor, and Claim collections.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // Customers

    /// Insert a new customer record
    async fn create_customer(&self, customer: Customer) -> Result<Customer, StoreError>;

    /// Secondary lookup by email, used to reuse first-seen customers
    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>, StoreError>;

    /// Resolve the owner of a policy
    async fn find_customer_by_policy(&self, policy_id: &PolicyId) -> Result<Customer, StoreError>;

    /// Record that a customer holds a policy
    async fn attach_policy(
        &self,
        customer_id: &CustomerId,
        policy_id: PolicyId,
    ) -> Result<(), StoreError>;

    // Policies

    /// Insert a new policy.
    ///
    /// # Errors
    /// `StoreError::PolicyNumberTaken` when the number is already in use;
    /// the check and the insert run under the policies lock.
    async fn create_policy(&self, policy: Policy) -> Result<Policy, StoreError>;

    /// Whether a policy number is already taken
    async fn policy_number_exists(&self, number: &PolicyNumber) -> Result<bool, StoreError>;

    /// Secondary lookup by the human-facing policy number
    async fn find_policy_by_number(&self, number: &PolicyNumber) -> Result<Policy, StoreError>;

    /// Mutate a policy in place
    async fn update_policy(
        &self,
        id: &PolicyId,
        mutate: PolicyMutator,
    ) -> Result<Policy, StoreError>;

    // Surveyors

    /// Insert a surveyor into the roster
    async fn insert_surveyor(&self, surveyor: Surveyor) -> Result<(), StoreError>;

    /// Snapshot of the full roster
    async fn list_surveyors(&self) -> Result<Vec<Surveyor>, StoreError>;

    /// Select a surveyor and increment their case load atomically.
    ///
    /// # Errors
    /// - `StoreError::NoEligibleSurveyor` if the selector picks nobody or
    ///   picks a surveyor without capacity
    async fn reserve_surveyor(&self, select: SurveyorSelector) -> Result<Surveyor, StoreError>;

    /// Decrement a surveyor's case load, flooring at zero
    async fn release_surveyor(&self, id: &SurveyorId) -> Result<Surveyor, StoreError>;

    // Claims

    /// Allocate the next claim id and insert the built claim
    async fn create_claim(&self, make: ClaimFactory) -> Result<Claim, StoreError>;

    /// Fetch a claim by id
    async fn get_claim(&self, id: &ClaimId) -> Result<Claim, StoreError>;

    /// Mutate a claim in place
    async fn update_claim(&self, id: &ClaimId, mutate: ClaimMutator) -> Result<Claim, StoreError>;

    /// Claims raised by one user
    async fn list_claims_by_user(&self, user_id: &str) -> Result<Vec<Claim>, StoreError>;

    /// Claims raised against one policy
    async fn list_claims_by_policy_number(
        &self,
        number: &PolicyNumber,
    ) -> Result<Vec<Claim>, StoreError>;
}
