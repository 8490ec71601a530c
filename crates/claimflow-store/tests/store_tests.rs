//! Integration tests for the JSON store: persistence round trips, claim
//! counter durability, and the case-load invariant under concurrency.

use chrono::{NaiveDate, Utc};
use claimflow_model::{
    Availability, Claim, ClaimDetails, ClaimId, ClaimKind, ClaimStatus, CustomerId, Policy,
    PolicyId, PolicyNumber, PolicyStatus, PolicyType, Priority, Specialization, Surveyor,
    SurveyorId,
};
use claimflow_store::{JsonStore, RecordStore, StoreError};
use std::sync::Arc;

fn surveyor(id: &str, max_cases: u32) -> Surveyor {
    Surveyor {
        id: SurveyorId::from(id),
        name: format!("Surveyor {id}"),
        phone: "+91-9876543300".to_string(),
        specialization: Specialization::HealthClaims,
        location: "Mumbai".to_string(),
        current_cases: 0,
        max_cases,
        rating: 4.5,
        status: Availability::Available,
    }
}

fn claim(id: ClaimId) -> Claim {
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
        description: "integration fixture".to_string(),
        details: ClaimDetails::Health {
            hospital_name: "City Care".to_string(),
            diagnosis: "fixture".to_string(),
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

#[tokio::test]
async fn collections_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = JsonStore::open(dir.path()).await.unwrap();
        store.insert_surveyor(surveyor("SUR_a", 3)).await.unwrap();
        store.create_claim(Box::new(claim)).await.unwrap();
        store.create_claim(Box::new(claim)).await.unwrap();
    }

    let reopened = JsonStore::open(dir.path()).await.unwrap();
    let roster = reopened.list_surveyors().await.unwrap();
    assert_eq!(roster.len(), 1);

    let claims = reopened.list_claims_by_user("user1").await.unwrap();
    assert_eq!(claims.len(), 2);
}

#[tokio::test]
async fn claim_counter_continues_after_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = JsonStore::open(dir.path()).await.unwrap();
        store.create_claim(Box::new(claim)).await.unwrap();
        store.create_claim(Box::new(claim)).await.unwrap();
    }

    let reopened = JsonStore::open(dir.path()).await.unwrap();
    let third = reopened.create_claim(Box::new(claim)).await.unwrap();
    assert_eq!(third.id.as_str(), "CLM003");
}

#[tokio::test]
async fn update_claim_persists_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let created = {
        let store = JsonStore::open(dir.path()).await.unwrap();
        let created = store.create_claim(Box::new(claim)).await.unwrap();
        store
            .update_claim(
                &created.id,
                Box::new(|c| {
                    c.approved_amount = 42_000;
                    c.status = ClaimStatus::UnderMedicalReview;
                }),
            )
            .await
            .unwrap();
        created
    };

    let reopened = JsonStore::open(dir.path()).await.unwrap();
    let fetched = reopened.get_claim(&created.id).await.unwrap();
    assert_eq!(fetched.approved_amount, 42_000);
    assert_eq!(fetched.status, ClaimStatus::UnderMedicalReview);
}

/// Concurrent reservations must never push a surveyor past `max_cases`.
#[tokio::test]
async fn concurrent_reservations_respect_capacity() {
    let store = Arc::new(JsonStore::ephemeral());
    store.insert_surveyor(surveyor("SUR_a", 5)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .reserve_surveyor(Box::new(|roster| {
                    roster.iter().find(|s| s.has_capacity()).map(|s| s.id.clone())
                }))
                .await
        }));
    }

    let mut granted = 0;
    let mut refused = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => granted += 1,
            Err(StoreError::NoEligibleSurveyor) => refused += 1,
            Err(other) => panic!("unexpected store error: {other}"),
        }
    }

    assert_eq!(granted, 5);
    assert_eq!(refused, 11);

    let roster = store.list_surveyors().await.unwrap();
    assert_eq!(roster[0].current_cases, 5);
    assert!(roster[0].current_cases <= roster[0].max_cases);
}

fn policy(number: &str) -> Policy {
    let now = Utc::now();
    Policy {
        id: PolicyId::generate(),
        policy_number: PolicyNumber::from(number),
        customer_id: CustomerId::from("CUST_x"),
        policy_type: PolicyType::Health,
        premium: 5_000,
        coverage_amount: 500_000,
        start_date: now.date_naive(),
        end_date: now.date_naive(),
        status: PolicyStatus::Active,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn duplicate_policy_numbers_are_rejected() {
    let store = JsonStore::ephemeral();
    store.create_policy(policy("HLT/2024/4242")).await.unwrap();
    assert!(store
        .policy_number_exists(&PolicyNumber::from("HLT/2024/4242"))
        .await
        .unwrap());

    let result = store.create_policy(policy("HLT/2024/4242")).await;
    assert!(matches!(result, Err(StoreError::PolicyNumberTaken { .. })));

    // The collision left a single record behind
    let found = store
        .find_policy_by_number(&PolicyNumber::from("HLT/2024/4242"))
        .await
        .unwrap();
    assert_eq!(found.policy_number.as_str(), "HLT/2024/4242");

    store.create_policy(policy("HLT/2024/4243")).await.unwrap();
}

#[tokio::test]
async fn customer_reuse_by_email_is_case_insensitive() {
    let store = JsonStore::ephemeral();
    let customer = claimflow_model::Customer::new("Asha Rao", "asha@example.com", "+91-9", "Pune");
    store.create_customer(customer.clone()).await.unwrap();

    let found = store
        .find_customer_by_email("ASHA@example.com")
        .await
        .unwrap();
    assert_eq!(found.map(|c| c.id), Some(customer.id));
}
