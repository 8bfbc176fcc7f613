//! Configuration management

use config::{Config, ConfigBuilder, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::fmt;

use crate::constants::{
    DEFAULT_IDENTITY_TIMEOUT_SECS, DEFAULT_LIVENESS_INTERVAL_SECS, DEFAULT_REMOTE_TIMEOUT_SECS,
    DEFAULT_SESSION_TTL_SECS,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub remote: RemoteSettings,
    pub session: SessionSettings,
    pub identity: IdentitySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

/// Legacy session-based RPC service
#[derive(Deserialize, Clone)]
pub struct RemoteSettings {
    pub endpoint: String,
    pub namespace: String,
    pub principal: String,
    pub secret: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for RemoteSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSettings")
            .field("endpoint", &self.endpoint)
            .field("namespace", &self.namespace)
            .field("principal", &self.principal)
            .field("secret", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub ttl_secs: u64,
    /// 0 disables the liveness check.
    pub liveness_interval_secs: u64,
}

/// Hosted identity provider (GoTrue REST API)
#[derive(Deserialize, Clone)]
pub struct IdentitySettings {
    pub url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for IdentitySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentitySettings")
            .field("url", &self.url)
            .field("api_key", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        Self::from_config(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, AppError> {
        Ok(Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "portal-server")?
            .set_default("remote.namespace", "http://tempuri.org/")?
            .set_default("remote.timeout_secs", DEFAULT_REMOTE_TIMEOUT_SECS as i64)?
            .set_default("session.ttl_secs", DEFAULT_SESSION_TTL_SECS as i64)?
            .set_default("session.liveness_interval_secs", DEFAULT_LIVENESS_INTERVAL_SECS as i64)?
            .set_default("identity.timeout_secs", DEFAULT_IDENTITY_TIMEOUT_SECS as i64)?)
    }

    fn from_config(config: Config) -> Result<Self, AppError> {
        let parsed: AppConfig = config.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.session.ttl_secs == 0 {
            return Err(AppError::InvalidConfig("session.ttl_secs must be greater than zero".into()));
        }
        if self.session.liveness_interval_secs >= self.session.ttl_secs {
            return Err(AppError::InvalidConfig(format!(
                "session.liveness_interval_secs ({}) must be shorter than session.ttl_secs ({})",
                self.session.liveness_interval_secs, self.session.ttl_secs
            )));
        }
        if self.remote.endpoint.trim().is_empty() {
            return Err(AppError::InvalidConfig("remote.endpoint is required".into()));
        }
        if self.remote.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("remote.timeout_secs must be greater than zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn load_from(toml: &str) -> Result<AppConfig, AppError> {
        let config = AppConfig::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        AppConfig::from_config(config)
    }

    const BASE: &str = r#"
        [remote]
        endpoint = "https://legacy.example.com/Service.svc"
        principal = "portal"
        secret = "s3cret"

        [identity]
        url = "https://id.example.com"
        api_key = "anon-key"
    "#;

    #[test]
    fn test_defaults_fill_session_policy() {
        let config = load_from(BASE).unwrap();
        assert_eq!(config.session.ttl_secs, 1500);
        assert_eq!(config.session.liveness_interval_secs, 750);
        assert_eq!(config.remote.timeout_secs, 30);
        assert_eq!(config.app.port, 8080);
    }

    #[test]
    fn test_rejects_liveness_interval_not_shorter_than_ttl() {
        let toml = format!("{}\n[session]\nttl_secs = 60\nliveness_interval_secs = 60\n", BASE);
        let err = load_from(&toml).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_ttl() {
        let toml = format!("{}\n[session]\nttl_secs = 0\nliveness_interval_secs = 0\n", BASE);
        assert!(matches!(load_from(&toml), Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_credentials_is_config_error() {
        let err = load_from("[identity]\nurl = \"x\"\napi_key = \"y\"\n").unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = load_from(BASE).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("s3cret"));
        assert!(!printed.contains("anon-key"));
    }
}
