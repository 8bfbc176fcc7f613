// ============================================================================
// Portal API - Auth Handlers
// File: crates/portal-api/src/handlers/auth.rs
// ============================================================================
//! Portal user authentication, delegated to the identity provider

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;
use validator::Validate;

use portal_core::{AuthUser, NewAccount, OtpVerification};

use crate::dto::{
    LoginRequest, LoginResponse, MagicLinkRequest, MessageResponse, RegisterRequest, RegisterResponse,
    ResetPasswordRequest, SetPasswordRequest, ValidateEmailRequest, ValidateEmailResponse, VerifyOtpRequest,
    VerifyOtpResponse,
};
use crate::error::ApiError;
use crate::extract::AuthenticatedUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /v1/auth/magic-link
pub async fn send_magic_link(
    State(state): State<AppState>,
    Json(payload): Json<MagicLinkRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    payload.validate()?;
    state.identity.send_magic_link(&payload.email).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Magic link sent to email."))))
}

/// POST /v1/auth/set-password
///
/// Redeems the emailed token, then sets the password on the session it yields.
pub async fn set_password(
    State(state): State<AppState>,
    Json(payload): Json<SetPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    payload.validate()?;
    let session = state
        .identity
        .verify_otp(&OtpVerification::TokenHash(payload.token))
        .await?;
    state
        .identity
        .update_password(&session.access_token, &payload.password)
        .await?;
    info!("User {} set a new password", session.user.id);

    Ok(Json(ApiResponse::success(MessageResponse::new("Password set successfully."))))
}

/// POST /v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    payload.validate()?;
    let user = state.identity.sign_up(&NewAccount::from(payload)).await?;
    info!("User {} registered", user.id);

    Ok((StatusCode::CREATED, Json(ApiResponse::success(RegisterResponse::from(user)))))
}

/// POST /v1/auth/validate-email
pub async fn validate_email(
    State(state): State<AppState>,
    Json(payload): Json<ValidateEmailRequest>,
) -> Result<Json<ApiResponse<ValidateEmailResponse>>, ApiError> {
    payload.validate()?;
    state.identity.send_email_otp(&payload.email).await?;
    Ok(Json(ApiResponse::success(ValidateEmailResponse {
        message: "OTP code sent to email.".to_string(),
        otp_sent: true,
    })))
}

/// POST /v1/auth/verify-otp
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> Result<Json<ApiResponse<VerifyOtpResponse>>, ApiError> {
    payload.validate()?;
    let session = state
        .identity
        .verify_otp(&OtpVerification::EmailCode {
            email: payload.email,
            token: payload.token,
        })
        .await?;

    Ok(Json(ApiResponse::success(VerifyOtpResponse {
        message: "OTP verified successfully.".to_string(),
        access_token: session.access_token,
        token_type: "bearer".to_string(),
        user: session.user,
    })))
}

/// POST /v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    payload.validate()?;
    let session = state
        .identity
        .sign_in_with_password(&payload.email, &payload.password)
        .await?;
    info!("User {} signed in", session.user.id);

    Ok(Json(ApiResponse::success(LoginResponse {
        access_token: session.access_token,
        token_type: "bearer".to_string(),
        user: session.user,
    })))
}

/// POST /v1/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    payload.validate()?;
    state.identity.send_password_reset(&payload.email).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Password reset email sent."))))
}

/// GET /v1/auth/me
pub async fn me(AuthenticatedUser(user): AuthenticatedUser) -> Json<ApiResponse<AuthUser>> {
    Json(ApiResponse::success(user))
}
