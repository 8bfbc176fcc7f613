use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, claims, documents, health, policies};
use crate::state::AppState;

/// Every route under `/v1`
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        // Health
        .route("/health", get(health::health_check))
        .route("/health/session", get(health::session_status))
        // Auth
        .route("/auth/magic-link", post(auth::send_magic_link))
        .route("/auth/set-password", post(auth::set_password))
        .route("/auth/register", post(auth::register))
        .route("/auth/validate-email", post(auth::validate_email))
        .route("/auth/verify-otp", post(auth::verify_otp))
        .route("/auth/login", post(auth::login))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/auth/me", get(auth::me))
        // Claims
        .route("/claims", get(claims::list_claims).post(claims::create_claim))
        .route("/claims/{id}", get(claims::get_claim))
        // Policies
        .route("/policies", get(policies::list_policies))
        .route("/policies/{id}", get(policies::get_policy))
        // Documents
        .route("/documents", get(documents::list_documents))
        .route("/documents/{id}", get(documents::get_document));

    Router::new().nest("/v1", api).with_state(state)
}
