// ============================================================================
// Portal Core - Action Dispatcher
// File: crates/portal-core/src/services/action_dispatcher.rs
// ============================================================================
//! Runs one named remote operation with at most one re-authentication retry

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{DispatchError, RemoteFault};
use crate::ports::{ActionParams, RemoteClient};
use crate::services::SessionBroker;

#[derive(Clone)]
pub struct ActionDispatcher {
    broker: SessionBroker,
    client: Arc<dyn RemoteClient>,
}

impl ActionDispatcher {
    pub fn new(broker: SessionBroker, client: Arc<dyn RemoteClient>) -> Self {
        Self { broker, client }
    }

    pub fn broker(&self) -> &SessionBroker {
        &self.broker
    }

    /// Invoke `operation` with the current session.
    ///
    /// An authentication fault invalidates the session and retries once with a
    /// fresh one; business and transport faults surface on first occurrence.
    pub async fn run(&self, operation: &str, params: ActionParams) -> Result<Value, DispatchError> {
        let context = self.broker.current_context().await?;

        let message = match self.client.invoke(operation, &context, &params).await {
            Ok(result) => return Ok(result),
            Err(RemoteFault::Authentication { message }) => message,
            Err(fault) => return Err(Self::classify(operation, fault)),
        };

        warn!(
            "{} rejected session {} ({}), renewing and retrying once",
            operation,
            context.session_id.redacted(),
            message
        );
        self.broker.invalidate_context(&context);
        let fresh = self.broker.current_context().await?;

        match self.client.invoke(operation, &fresh, &params).await {
            Ok(result) => Ok(result),
            Err(RemoteFault::Authentication { message }) => {
                error!(
                    "{} rejected renewed session {}: {}",
                    operation,
                    fresh.session_id.redacted(),
                    message
                );
                self.broker.invalidate_context(&fresh);
                Err(DispatchError::RemoteAuthentication {
                    operation: operation.to_string(),
                    message,
                })
            }
            Err(fault) => Err(Self::classify(operation, fault)),
        }
    }

    fn classify(operation: &str, fault: RemoteFault) -> DispatchError {
        match fault {
            RemoteFault::Business { code, message, detail } => {
                debug!("{} failed with business fault {}: {}", operation, code, message);
                DispatchError::RemoteOperation {
                    operation: operation.to_string(),
                    code,
                    message,
                    detail,
                }
            }
            RemoteFault::Transport { message } => {
                warn!("{} could not reach remote service: {}", operation, message);
                DispatchError::RemoteUnavailable {
                    operation: operation.to_string(),
                    message,
                }
            }
            RemoteFault::Authentication { message } => DispatchError::RemoteAuthentication {
                operation: operation.to_string(),
                message,
            },
        }
    }
}
