//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use portal_core::{DispatchError, IdentityError};

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Missing or malformed bearer token")]
    MissingToken,
}

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Dispatch(err) => {
                let status = match err {
                    DispatchError::SessionAcquisition(_) | DispatchError::RemoteUnavailable { .. } => {
                        StatusCode::SERVICE_UNAVAILABLE
                    }
                    DispatchError::RemoteAuthentication { .. } => StatusCode::BAD_GATEWAY,
                    DispatchError::RemoteOperation { code, .. } if code == "NotFound" => StatusCode::NOT_FOUND,
                    DispatchError::RemoteOperation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, err.kind())
            }
            ApiError::Identity(IdentityError::Rejected(_)) => (StatusCode::BAD_REQUEST, "IDENTITY_REJECTED"),
            ApiError::Identity(IdentityError::Unauthorized(_)) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Identity(IdentityError::Unavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "IDENTITY_UNAVAILABLE")
            }
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::MissingToken => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!("{}: {}", code, self);
        } else {
            tracing::warn!("{}: {}", code, self);
        }

        let body = Json(ApiResponse::<()>::error(code, &self.to_string()));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::{RemoteFault, SessionAcquisitionError};

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().status_and_code().0
    }

    #[test]
    fn test_dispatch_errors_map_to_gateway_statuses() {
        let acquisition = DispatchError::SessionAcquisition(SessionAcquisitionError {
            cause: RemoteFault::transport("connection refused"),
        });
        let rejected = DispatchError::RemoteAuthentication {
            operation: "GetClaims".into(),
            message: "session invalid".into(),
        };
        let missing = DispatchError::RemoteOperation {
            operation: "GetClaim".into(),
            code: "NotFound".into(),
            message: "no such claim".into(),
            detail: None,
        };
        let invalid = DispatchError::decode("GetClaim", "missing field `Id`");

        assert_eq!(status_of(acquisition), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_of(rejected), StatusCode::BAD_GATEWAY);
        assert_eq!(status_of(missing), StatusCode::NOT_FOUND);
        assert_eq!(status_of(invalid), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_identity_errors_map_to_client_statuses() {
        assert_eq!(status_of(IdentityError::Rejected("bad email".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(IdentityError::Unauthorized("expired".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(IdentityError::Unavailable("timeout".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
