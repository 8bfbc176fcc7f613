//! Remote service credentials

use std::fmt;

use portal_shared::config::RemoteSettings;

/// Principal and secret presented once to open a remote session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    principal: String,
    secret: String,
}

impl Credentials {
    pub fn new(principal: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            secret: secret.into(),
        }
    }

    pub fn principal(&self) -> &str {
        &self.principal
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl From<&RemoteSettings> for Credentials {
    fn from(settings: &RemoteSettings) -> Self {
        Self::new(settings.principal.clone(), settings.secret.clone())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("principal", &self.principal)
            .field("secret", &"***")
            .finish()
    }
}
