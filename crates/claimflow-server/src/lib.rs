//! Claimflow Server - REST surface over the claim workflow
//!
//! Routing and the response envelope only; every business rule lives in
//! `claimflow-engine`. Construct an [`AppState`] around a workflow and
//! hand [`router`] to axum.

#![warn(unreachable_pub)]

mod handlers;
mod response;

use axum::routing::{get, post, put};
use axum::Router;
use claimflow_engine::ClaimWorkflow;
use std::sync::Arc;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<ClaimWorkflow>,
}

impl AppState {
    #[inline]
    #[must_use]
    pub fn new(workflow: Arc<ClaimWorkflow>) -> Self {
        Self { workflow }
    }
}

/// Build the full route table.
///
/// Policy numbers contain slashes (`HLT/2024/1234`), so the routes keyed
/// by policy number take the remainder of the path.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/surveyors/available", get(handlers::available_surveyors))
        .route("/api/claims/user/:user_id", get(handlers::claims_by_user))
        .route("/api/claims/stats/:user_id", get(handlers::claim_stats))
        .route(
            "/api/claims/policy/*policy_number",
            get(handlers::claims_by_policy),
        )
        .route(
            "/api/claims/:id",
            get(handlers::get_claim).post(handlers::submit_claim),
        )
        .route("/api/claims/:id/timeline", get(handlers::get_timeline))
        .route(
            "/api/claims/:id/surveyor-report",
            post(handlers::surveyor_report),
        )
        .route("/api/claims/:id/process", put(handlers::process_decision))
        .route("/api/claims/:id/payment", post(handlers::initiate_payment))
        .route("/api/claims/:id/documents", post(handlers::add_document))
        .route("/api/policies/register", post(handlers::register_policy))
        .route(
            "/api/policies/number/*policy_number",
            get(handlers::policy_by_number),
        )
        .with_state(state)
}

/// Crate version, quoted in logs at startup
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
