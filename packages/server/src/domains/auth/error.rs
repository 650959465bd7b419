use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Authentication and authorization errors.
///
/// Each variant maps to exactly one client-visible response; none are
/// logged and swallowed. 401s are authentication failures, 403s are
/// authorization failures, 500s indicate server-side faults.
#[derive(Error, Debug)]
pub enum AuthError {
    /// `Authorization` header absent or not a Bearer scheme.
    #[error("Auth Error")]
    AuthHeaderMissing,

    /// Bearer scheme present but the token segment is empty.
    #[error("Unauthorized")]
    TokenMissing,

    #[error("Invalid Token")]
    TokenMalformed,

    #[error("Invalid Token")]
    TokenExpired,

    #[error("Invalid Token")]
    TokenInvalidSignature,

    /// Token claims reference a user no longer in the store.
    #[error("Unauthorized")]
    UserNotFound,

    #[error("Role not found")]
    RoleNotFound,

    /// A role-based gate rejected the request.
    #[error("Access denied")]
    RoleDenied,

    /// A permission-based gate rejected the request.
    #[error("Access Forbidden")]
    PermissionDenied,

    /// The store is missing required seed data (e.g. the default role).
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::AuthHeaderMissing
            | AuthError::TokenMissing
            | AuthError::TokenMalformed
            | AuthError::TokenExpired
            | AuthError::TokenInvalidSignature
            | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
            AuthError::RoleNotFound => StatusCode::NOT_FOUND,
            AuthError::RoleDenied | AuthError::PermissionDenied => StatusCode::FORBIDDEN,
            AuthError::ConfigurationError(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side faults get a generic body; the detail goes to the log.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
