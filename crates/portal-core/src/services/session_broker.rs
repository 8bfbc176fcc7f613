// ============================================================================
// Portal Core - Session Broker
// File: crates/portal-core/src/services/session_broker.rs
// ============================================================================
//! Owns the single remote session and hands out security contexts.
//!
//! Hot path: a short read of the session slot, no await. Renewal: serialized
//! behind one async mutex with a double check, so concurrent callers that find
//! the session absent or stale share one `open_session` call and its outcome.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::domain::{Credentials, SecurityContext, Session, SessionPolicy, SessionState, SessionStatus};
use crate::error::SessionAcquisitionError;
use crate::ports::RemoteClient;

type RenewalOutcome = Result<SecurityContext, SessionAcquisitionError>;

#[derive(Default)]
struct SessionSlot {
    session: Option<Session>,
    invalidated: bool,
    check_claimed: bool,
    closed: bool,
}

impl SessionSlot {
    fn active(session: Session) -> Self {
        Self {
            session: Some(session),
            ..Default::default()
        }
    }

    fn usable(&self, now: Instant) -> Option<&Session> {
        self.session
            .as_ref()
            .filter(|session| !self.invalidated && !session.is_expired_at(now))
    }

    fn holds(&self, context: &SecurityContext) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.id == context.session_id)
    }
}

struct BrokerInner {
    client: Arc<dyn RemoteClient>,
    credentials: Credentials,
    policy: SessionPolicy,
    slot: RwLock<SessionSlot>,
    /// Held for the whole renewal; stores the outcome of the last one.
    renewal: Mutex<Option<RenewalOutcome>>,
    /// Bumped when a renewal completes, under `renewal`.
    generation: AtomicU64,
    renewals: AtomicU64,
}

/// Shared handle; clones refer to the same session.
#[derive(Clone)]
pub struct SessionBroker {
    inner: Arc<BrokerInner>,
}

impl SessionBroker {
    pub fn new(client: Arc<dyn RemoteClient>, credentials: Credentials, policy: SessionPolicy) -> Self {
        Self {
            inner: Arc::new(BrokerInner {
                client,
                credentials,
                policy,
                slot: RwLock::new(SessionSlot::default()),
                renewal: Mutex::new(None),
                generation: AtomicU64::new(0),
                renewals: AtomicU64::new(0),
            }),
        }
    }

    pub fn policy(&self) -> SessionPolicy {
        self.inner.policy
    }

    /// A context for the current session, renewing first when it is absent,
    /// past its TTL, or flagged invalid.
    pub async fn current_context(&self) -> Result<SecurityContext, SessionAcquisitionError> {
        if let Some(context) = self.cached_context() {
            return Ok(context);
        }
        self.renew().await
    }

    /// Stop trusting the cached session. The next `current_context` renews.
    pub fn invalidate(&self) {
        let mut slot = self.inner.slot.write();
        if slot.invalidated {
            return;
        }
        if let Some(id) = slot.session.as_ref().map(|s| s.id.redacted()) {
            warn!("Remote session {} invalidated", id);
            slot.invalidated = true;
        }
    }

    /// Invalidate only if `context` still names the current session.
    ///
    /// Returns false when another caller already replaced it.
    pub fn invalidate_context(&self, context: &SecurityContext) -> bool {
        let mut slot = self.inner.slot.write();
        if !slot.holds(context) {
            debug!(
                "Session {} already replaced, skipping invalidation",
                context.session_id.redacted()
            );
            return false;
        }
        if !slot.invalidated {
            warn!("Remote session {} invalidated", context.session_id.redacted());
            slot.invalidated = true;
        }
        true
    }

    /// Release the session on shutdown. Waits for an in-flight renewal; a failing
    /// `close_session` is logged and ignored.
    pub async fn close(&self) {
        let _renewal = self.inner.renewal.lock().await;
        let session = {
            let mut slot = self.inner.slot.write();
            let session = slot.session.take();
            *slot = SessionSlot {
                closed: true,
                ..Default::default()
            };
            session
        };

        let Some(session) = session else {
            debug!("No remote session to close");
            return;
        };

        match self.inner.client.close_session(&session.context()).await {
            Ok(()) => info!("Remote session {} closed", session.id.redacted()),
            Err(fault) => warn!(
                "Failed to close remote session {}: {}",
                session.id.redacted(),
                fault
            ),
        }
    }

    pub fn status(&self) -> SessionStatus {
        let acquiring = self.inner.renewal.try_lock().is_err();
        let now = Instant::now();
        let slot = self.inner.slot.read();

        let state = match &slot.session {
            _ if acquiring => SessionState::Acquiring,
            None if slot.closed => SessionState::Closed,
            None => SessionState::Absent,
            Some(_) if slot.invalidated => SessionState::InvalidatedExternally,
            Some(session) if session.is_expired_at(now) => SessionState::Stale,
            Some(_) => SessionState::Active,
        };

        SessionStatus {
            state,
            opened_at: slot.session.as_ref().map(|s| s.opened_at),
            age_secs: slot.session.as_ref().map(|s| s.age_at(now).as_secs()),
            ttl_secs: self.inner.policy.ttl.as_secs(),
            renewals: self.inner.renewals.load(Ordering::Relaxed),
        }
    }

    fn cached_context(&self) -> Option<SecurityContext> {
        let now = Instant::now();
        let (context, check_due) = {
            let slot = self.inner.slot.read();
            let session = slot.usable(now)?;
            let check_due = !slot.check_claimed && self.inner.policy.check_due(session, now);
            (session.context(), check_due)
        };

        if check_due {
            self.spawn_liveness_check(&context);
        }
        Some(context)
    }

    /// Liveness check off the hot path, at most once per session. A negative
    /// answer flags the session for renewal on next access.
    fn spawn_liveness_check(&self, context: &SecurityContext) {
        {
            let mut slot = self.inner.slot.write();
            if slot.check_claimed || !slot.holds(context) {
                return;
            }
            slot.check_claimed = true;
        }

        let broker = self.clone();
        let context = context.clone();
        tokio::spawn(async move {
            match broker.inner.client.check_session(&context).await {
                Ok(true) => debug!("Remote session {} still valid", context.session_id.redacted()),
                Ok(false) => {
                    warn!(
                        "Liveness check rejected remote session {}",
                        context.session_id.redacted()
                    );
                    broker.invalidate_context(&context);
                }
                // A check that cannot reach the server proves nothing about the session.
                Err(fault) => debug!("Liveness check inconclusive: {}", fault),
            }
        });
    }

    async fn renew(&self) -> RenewalOutcome {
        let observed = self.inner.generation.load(Ordering::Acquire);
        let mut last = self.inner.renewal.lock().await;

        // Someone renewed while we waited: share their failure, or their session if
        // it is still usable.
        if self.inner.generation.load(Ordering::Acquire) != observed {
            if let Some(Err(err)) = last.as_ref() {
                return Err(err.clone());
            }
        }
        if let Some(session) = self.inner.slot.read().usable(Instant::now()) {
            return Ok(session.context());
        }

        debug!("Opening remote session for {}", self.inner.credentials.principal());
        let outcome = match self.inner.client.open_session(&self.inner.credentials).await {
            Ok(id) => {
                let session = Session::open(id, self.inner.policy.ttl);
                let context = session.context();
                let renewals = self.inner.renewals.fetch_add(1, Ordering::Relaxed) + 1;
                info!(
                    "Remote session {} opened (renewal #{}, ttl {}s)",
                    session.id.redacted(),
                    renewals,
                    session.ttl.as_secs()
                );
                *self.inner.slot.write() = SessionSlot::active(session);
                Ok(context)
            }
            Err(cause) => {
                error!("Failed to open remote session: {}", cause);
                *self.inner.slot.write() = SessionSlot::default();
                Err(SessionAcquisitionError { cause })
            }
        };

        *last = Some(outcome.clone());
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        outcome
    }
}
