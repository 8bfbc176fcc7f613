//! Domain errors

use serde_json::Value;
use thiserror::Error;

/// Fault raised by a call to the remote session-based service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteFault {
    /// The remote side refused the security context (session invalid or expired)
    /// or rejected the credentials presented to open a session.
    #[error("Remote authentication fault: {message}")]
    Authentication { message: String },

    /// Operation-specific rejection unrelated to the session.
    #[error("Remote business fault {code}: {message}")]
    Business {
        code: String,
        message: String,
        detail: Option<Value>,
    },

    /// Network failure, timeout, or an unreadable reply.
    #[error("Remote transport fault: {message}")]
    Transport { message: String },
}

impl RemoteFault {
    pub fn authentication(message: impl Into<String>) -> Self {
        RemoteFault::Authentication { message: message.into() }
    }

    pub fn business(code: impl Into<String>, message: impl Into<String>) -> Self {
        RemoteFault::Business {
            code: code.into(),
            message: message.into(),
            detail: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        RemoteFault::Transport { message: message.into() }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, RemoteFault::Authentication { .. })
    }
}

/// No session could be established with the remote service.
///
/// Cloneable so every caller waiting on the same renewal receives the same failure.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unable to acquire remote session: {cause}")]
pub struct SessionAcquisitionError {
    #[source]
    pub cause: RemoteFault,
}

/// Every failure a caller of `ActionDispatcher::run` can observe.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error(transparent)]
    SessionAcquisition(#[from] SessionAcquisitionError),

    #[error("Remote session rejected for {operation} even after renewal: {message}")]
    RemoteAuthentication { operation: String, message: String },

    #[error("Remote operation {operation} failed ({code}): {message}")]
    RemoteOperation {
        operation: String,
        code: String,
        message: String,
        detail: Option<Value>,
    },

    #[error("Remote service unavailable during {operation}: {message}")]
    RemoteUnavailable { operation: String, message: String },
}

impl DispatchError {
    /// Result of `operation` could not be decoded into the expected record.
    pub fn decode(operation: &str, message: impl Into<String>) -> Self {
        DispatchError::RemoteOperation {
            operation: operation.to_string(),
            code: "DecodeError".to_string(),
            message: message.into(),
            detail: None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::SessionAcquisition(_) => "SESSION_ACQUISITION",
            DispatchError::RemoteAuthentication { .. } => "REMOTE_AUTHENTICATION",
            DispatchError::RemoteOperation { .. } => "REMOTE_OPERATION",
            DispatchError::RemoteUnavailable { .. } => "REMOTE_UNAVAILABLE",
        }
    }
}

/// Failure reported by the hosted identity provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IdentityError {
    #[error("Identity request rejected: {0}")]
    Rejected(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}
