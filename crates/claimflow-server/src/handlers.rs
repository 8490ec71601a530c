//! Request handlers
//!
//! Thin adapters between HTTP and the workflow engine: extract and parse
//! inputs, call exactly one engine operation, wrap the result in the
//! response envelope. Business rules live in `claimflow-engine`.

use crate::response::{created, ok, ApiError};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use claimflow_engine::{
    ClaimSubmission, FieldError, PolicyRegistration, SurveyReportInput, WorkflowError,
};
use claimflow_model::{ClaimId, ClaimKind, Decision, PolicyNumber};
use serde::Deserialize;
use serde_json::json;

/// Authenticated user id, supplied by the identity collaborator upstream
fn user_id(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| WorkflowError::missing_field("x-user-id").into())
}

pub(crate) async fn health(State(state): State<AppState>) -> Response {
    ok(
        "service up",
        json!({
            "version": claimflow_engine::VERSION,
            "pending_settlements": state.workflow.pending_settlements(),
        }),
    )
}

// Claims

/// `POST /api/claims/:id` - the path segment is the claim domain here
/// ("health", "motor", "property", "travel"); on GET it is the claim id.
pub(crate) async fn submit_claim(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    headers: HeaderMap,
    Json(submission): Json<ClaimSubmission>,
) -> Result<Response, ApiError> {
    let user = user_id(&headers)?;
    let kind = ClaimKind::parse(&domain).ok_or_else(|| {
        WorkflowError::Validation(vec![FieldError::new(
            "domain",
            "must be one of health, motor, property, travel",
        )])
    })?;
    let receipt = state.workflow.submit_claim(&user, kind, submission).await?;
    Ok(created("claim submitted", receipt))
}

pub(crate) async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let claim = state.workflow.get_claim(&ClaimId::from(id.as_str())).await?;
    Ok(ok("claim", claim))
}

pub(crate) async fn get_timeline(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let timeline = state
        .workflow
        .get_timeline(&ClaimId::from(id.as_str()))
        .await?;
    Ok(ok("claim timeline", timeline))
}

pub(crate) async fn claims_by_user(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Response, ApiError> {
    let claims = state.workflow.list_claims_by_user(&user).await?;
    Ok(ok("claims", claims))
}

pub(crate) async fn claims_by_policy(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Response, ApiError> {
    let claims = state
        .workflow
        .list_claims_by_policy_number(&PolicyNumber::from(number.as_str()))
        .await?;
    Ok(ok("claims", claims))
}

pub(crate) async fn claim_stats(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Response, ApiError> {
    let stats = state.workflow.claim_stats(&user).await?;
    Ok(ok("claim statistics", stats))
}

pub(crate) async fn surveyor_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SurveyReportInput>,
) -> Result<Response, ApiError> {
    let claim = state
        .workflow
        .submit_survey_report(&ClaimId::from(id.as_str()), input)
        .await?;
    Ok(ok("survey report filed", claim))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProcessRequest {
    decision: String,
    #[serde(default)]
    approved_amount: Option<u64>,
    #[serde(default)]
    remarks: Option<String>,
}

pub(crate) async fn process_decision(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ProcessRequest>,
) -> Result<Response, ApiError> {
    let decision = Decision::parse(&request.decision).ok_or_else(|| {
        WorkflowError::Validation(vec![FieldError::new(
            "decision",
            "must be approved, rejected, or pending",
        )])
    })?;
    let receipt = state
        .workflow
        .process_decision(
            &ClaimId::from(id.as_str()),
            decision,
            request.approved_amount,
            request.remarks,
        )
        .await?;
    Ok(ok("decision recorded", receipt))
}

pub(crate) async fn initiate_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let receipt = state
        .workflow
        .initiate_payment(&ClaimId::from(id.as_str()))
        .await?;
    Ok(ok("payment initiated", receipt))
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentUpload {
    name: String,
    #[serde(default = "default_content_type")]
    content_type: String,
    url: String,
}

fn default_content_type() -> String {
    "application/octet-stream".to_string()
}

pub(crate) async fn add_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(upload): Json<DocumentUpload>,
) -> Result<Response, ApiError> {
    let claim = state
        .workflow
        .add_document(
            &ClaimId::from(id.as_str()),
            &upload.name,
            &upload.content_type,
            &upload.url,
        )
        .await?;
    Ok(created("document attached", claim))
}

// Surveyors

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AvailableQuery {
    #[serde(default)]
    claim_type: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

pub(crate) async fn available_surveyors(
    State(state): State<AppState>,
    Query(query): Query<AvailableQuery>,
) -> Result<Response, ApiError> {
    let kind = query.claim_type.as_deref().and_then(ClaimKind::parse);
    let ranked = state
        .workflow
        .available_surveyors(kind, query.location.as_deref())
        .await?;
    Ok(ok("available surveyors", ranked))
}

// Policies

pub(crate) async fn register_policy(
    State(state): State<AppState>,
    Json(registration): Json<PolicyRegistration>,
) -> Result<Response, ApiError> {
    let receipt = state.workflow.register_policy(registration).await?;
    Ok(created("policy registered", receipt))
}

pub(crate) async fn policy_by_number(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Response, ApiError> {
    let found = state
        .workflow
        .find_policy(&PolicyNumber::from(number.as_str()))
        .await?;
    Ok(ok("policy", found))
}
