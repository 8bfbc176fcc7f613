//! Hosted identity provider (port)

use async_trait::async_trait;

use crate::domain::{AuthSession, AuthUser, NewAccount, OtpVerification};
use crate::error::IdentityError;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn send_magic_link(&self, email: &str) -> Result<(), IdentityError>;
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError>;
    async fn send_password_reset(&self, email: &str) -> Result<(), IdentityError>;
    /// Resolve the user behind a bearer access token
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, IdentityError>;
    /// Email a one-time code to an existing account; never creates one
    async fn send_email_otp(&self, email: &str) -> Result<(), IdentityError>;
    async fn verify_otp(&self, proof: &OtpVerification) -> Result<AuthSession, IdentityError>;
    async fn update_password(&self, access_token: &str, password: &str) -> Result<AuthUser, IdentityError>;
    async fn sign_up(&self, account: &NewAccount) -> Result<AuthUser, IdentityError>;
}
