// ============================================================================
// Portal Infrastructure - GoTrue Identity Provider
// File: crates/portal-infrastructure/src/identity/gotrue.rs
// ============================================================================
//! `IdentityProvider` over the hosted GoTrue REST API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use portal_core::error::IdentityError;
use portal_core::ports::IdentityProvider;
use portal_core::{AuthSession, AuthUser, NewAccount, OtpVerification};
use portal_shared::config::IdentitySettings;

#[derive(Clone)]
pub struct GoTrueIdentityProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoTrueIdentityProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let base_url: String = base_url.into();
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_settings(settings: &IdentitySettings) -> Result<Self, reqwest::Error> {
        Self::new(
            settings.url.clone(),
            settings.api_key.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    fn url(&self, route: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, route)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, IdentityError> {
        let response = request
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                warn!("Identity provider unreachable: {}", e);
                IdentityError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = error_message(&body).unwrap_or_else(|| status.to_string());
        debug!("Identity provider answered {}: {}", status, message);

        Err(match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => IdentityError::Rejected(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => IdentityError::Unauthorized(message),
            _ => IdentityError::Unavailable(message),
        })
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, IdentityError> {
        response
            .json()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("unexpected identity reply: {}", e)))
    }
}

/// GoTrue error bodies use several field names depending on the endpoint
fn error_message(body: &Value) -> Option<String> {
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|field| body.get(field).and_then(Value::as_str))
        .map(str::to_string)
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn send_magic_link(&self, email: &str) -> Result<(), IdentityError> {
        let request = self
            .client
            .post(self.url("otp"))
            .json(&json!({ "email": email, "create_user": true }));
        self.send(request).await.map(|_| ())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError> {
        let request = self
            .client
            .post(self.url("token?grant_type=password"))
            .json(&json!({ "email": email, "password": password }));

        // GoTrue reports bad credentials as 400 invalid_grant
        let response = self.send(request).await.map_err(|e| match e {
            IdentityError::Rejected(message) => IdentityError::Unauthorized(message),
            other => other,
        })?;
        Self::read(response).await
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), IdentityError> {
        let request = self
            .client
            .post(self.url("recover"))
            .json(&json!({ "email": email }));
        self.send(request).await.map(|_| ())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, IdentityError> {
        let request = self.client.get(self.url("user")).bearer_auth(access_token);
        let response = self.send(request).await?;
        Self::read(response).await
    }

    async fn send_email_otp(&self, email: &str) -> Result<(), IdentityError> {
        let request = self
            .client
            .post(self.url("otp"))
            .json(&json!({ "email": email, "create_user": false }));
        self.send(request).await.map(|_| ())
    }

    async fn verify_otp(&self, proof: &OtpVerification) -> Result<AuthSession, IdentityError> {
        let body = match proof {
            OtpVerification::EmailCode { email, token } => {
                json!({ "type": "email", "email": email, "token": token })
            }
            OtpVerification::TokenHash(token_hash) => json!({ "type": "email", "token_hash": token_hash }),
        };
        let response = self.send(self.client.post(self.url("verify")).json(&body)).await?;
        Self::read(response).await
    }

    async fn update_password(&self, access_token: &str, password: &str) -> Result<AuthUser, IdentityError> {
        let request = self
            .client
            .put(self.url("user"))
            .bearer_auth(access_token)
            .json(&json!({ "password": password }));
        let response = self.send(request).await?;
        Self::read(response).await
    }

    async fn sign_up(&self, account: &NewAccount) -> Result<AuthUser, IdentityError> {
        let request = self.client.post(self.url("signup")).json(&json!({
            "email": account.email,
            "password": account.password,
            "data": account.profile,
        }));
        let response = self.send(request).await?;

        // With email confirmation off the reply is a session wrapping the user.
        let mut body: Value = Self::read(response).await?;
        let user = if body.get("user").is_some_and(Value::is_object) {
            body["user"].take()
        } else {
            body
        };
        serde_json::from_value(user)
            .map_err(|e| IdentityError::Unavailable(format!("unexpected sign-up reply: {}", e)))
    }
}
