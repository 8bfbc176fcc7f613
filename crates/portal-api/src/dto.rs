//! Request and response bodies

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use portal_core::{AuthUser, NewAccount, NewClaim};

const MIN_PASSWORD_LEN: u64 = 6;

#[derive(Debug, Deserialize, Validate)]
pub struct MagicLinkRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetPasswordRequest {
    /// Hashed token from the emailed link
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    #[validate(length(min = MIN_PASSWORD_LEN))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub birth_date: String,
    /// National id or passport number
    #[validate(length(min = 1))]
    pub document_id: String,
    #[validate(email)]
    pub email: String,
    pub address: String,
    pub user_id: String,
    #[validate(length(min = 1))]
    pub username: String,
    pub phone: String,
    #[validate(length(min = MIN_PASSWORD_LEN))]
    pub password: String,
}

impl From<RegisterRequest> for NewAccount {
    fn from(request: RegisterRequest) -> Self {
        let profile: Map<String, Value> = [
            ("first_name", request.first_name),
            ("last_name", request.last_name),
            ("birth_date", request.birth_date),
            ("document_id", request.document_id),
            ("address", request.address),
            ("user_id", request.user_id),
            ("username", request.username),
            ("phone", request.phone),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value)))
        .collect();

        NewAccount {
            email: request.email,
            password: request.password,
            profile,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: String,
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<AuthUser> for RegisterResponse {
    fn from(user: AuthUser) -> Self {
        let field = |key: &str| user.metadata_str(key).map(str::to_string);
        Self {
            username: field("username"),
            first_name: field("first_name"),
            last_name: field("last_name"),
            email: user.email.clone(),
            id: user.id.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ValidateEmailRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateEmailResponse {
    pub message: String,
    pub otp_sent: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "Code is required"))]
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub message: String,
    pub access_token: String,
    pub token_type: String,
    pub user: AuthUser,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: AuthUser,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClaimRequest {
    #[validate(length(min = 1, message = "Policy id is required"))]
    pub policy_id: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    pub open_date: Option<String>,
}

impl From<CreateClaimRequest> for NewClaim {
    fn from(request: CreateClaimRequest) -> Self {
        NewClaim {
            policy_id: request.policy_id,
            description: request.description,
            open_date: request.open_date,
        }
    }
}
