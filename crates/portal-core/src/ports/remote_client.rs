//! Remote session-based RPC service (port)

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::{Credentials, SecurityContext, SessionId};
use crate::error::RemoteFault;

/// Named parameters of a remote operation
pub type ActionParams = Map<String, Value>;

/// Opaque call primitive of the legacy service. Each call carries its own timeout,
/// reported as `RemoteFault::Transport`.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait RemoteClient: Send + Sync {
    async fn open_session(&self, credentials: &Credentials) -> Result<SessionId, RemoteFault>;

    /// `Ok(false)` means the server no longer recognises the session.
    async fn check_session(&self, context: &SecurityContext) -> Result<bool, RemoteFault>;

    async fn invoke(
        &self,
        operation: &str,
        context: &SecurityContext,
        params: &ActionParams,
    ) -> Result<Value, RemoteFault>;

    async fn close_session(&self, context: &SecurityContext) -> Result<(), RemoteFault>;
}
