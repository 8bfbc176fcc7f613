// ============================================================================
// Portal Core - Remote Session Entity
// File: crates/portal-core/src/domain/session.rs
// Description: Remote session, its security context, and renewal policy
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

use portal_shared::config::SessionSettings;
use portal_shared::constants::{DEFAULT_LIVENESS_INTERVAL_SECS, DEFAULT_SESSION_TTL_SECS};

/// Opaque session token issued by the remote service
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix safe to put in logs
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(6).collect();
        format!("{}…", prefix)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.redacted())
    }
}

/// Credential bundle attached to every remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityContext {
    pub session_id: SessionId,
    pub authenticated: bool,
}

/// A server-acknowledged session. Renewal replaces the whole value.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub acquired_at: Instant,
    pub ttl: Duration,
    pub opened_at: DateTime<Utc>,
}

impl Session {
    pub fn open(id: SessionId, ttl: Duration) -> Self {
        Self {
            id,
            acquired_at: Instant::now(),
            ttl,
            opened_at: Utc::now(),
        }
    }

    pub fn expires_at(&self) -> Instant {
        self.acquired_at + self.ttl
    }

    /// Stale once `now` is strictly past `acquired_at + ttl`
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now > self.expires_at()
    }

    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.acquired_at)
    }

    pub fn context(&self) -> SecurityContext {
        SecurityContext {
            session_id: self.id.clone(),
            authenticated: true,
        }
    }
}

/// When to trust the cached session and when to ask the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Local, conservative estimate of the server-side session lifetime
    pub ttl: Duration,
    /// Age after which a session is checked with `check_session`, once per session
    pub liveness_interval: Option<Duration>,
}

impl SessionPolicy {
    pub fn new(ttl: Duration, liveness_interval: Option<Duration>) -> Self {
        Self { ttl, liveness_interval }
    }

    pub fn without_liveness_check(ttl: Duration) -> Self {
        Self { ttl, liveness_interval: None }
    }

    pub fn check_due(&self, session: &Session, now: Instant) -> bool {
        match self.liveness_interval {
            Some(interval) => session.age_at(now) >= interval,
            None => false,
        }
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            liveness_interval: Some(Duration::from_secs(DEFAULT_LIVENESS_INTERVAL_SECS)),
        }
    }
}

impl From<&SessionSettings> for SessionPolicy {
    fn from(settings: &SessionSettings) -> Self {
        let liveness_interval = match settings.liveness_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        Self::new(Duration::from_secs(settings.ttl_secs), liveness_interval)
    }
}

/// Lifecycle of the broker's session slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Absent,
    Acquiring,
    Active,
    Stale,
    InvalidatedExternally,
    Closed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Absent => "absent",
            SessionState::Acquiring => "acquiring",
            SessionState::Active => "active",
            SessionState::Stale => "stale",
            SessionState::InvalidatedExternally => "invalidated_externally",
            SessionState::Closed => "closed",
        }
    }
}

/// Point-in-time view of the broker for health reporting
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub state: SessionState,
    pub opened_at: Option<DateTime<Utc>>,
    pub age_secs: Option<u64>,
    pub ttl_secs: u64,
    pub renewals: u64,
}
