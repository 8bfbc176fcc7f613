//! Identity provider user and session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
    /// Profile fields stored at sign-up
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
}

impl AuthUser {
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.user_metadata.get(key).and_then(Value::as_str)
    }
}

/// Password sign-in result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

/// Proof offered for a one-time code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpVerification {
    /// Code typed by the user for `email`
    EmailCode { email: String, token: String },
    /// Hashed token carried by an emailed link
    TokenHash(String),
}

/// Account created on the identity provider
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub profile: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_metadata_defaults_to_empty() {
        let user: AuthUser = serde_json::from_value(json!({"id": "u1", "email": "ana@example.com"})).unwrap();
        assert!(user.user_metadata.is_empty());
        assert_eq!(user.metadata_str("username"), None);
    }

    #[test]
    fn test_metadata_str_reads_profile_field() {
        let user: AuthUser = serde_json::from_value(json!({
            "id": "u1",
            "user_metadata": {"username": "ana", "age": 40}
        }))
        .unwrap();
        assert_eq!(user.metadata_str("username"), Some("ana"));
        assert_eq!(user.metadata_str("age"), None);
    }
}
