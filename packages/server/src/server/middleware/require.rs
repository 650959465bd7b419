//! Per-route authorization gates (stage 2).
//!
//! Composed after [`auth_middleware`](super::auth_middleware) via
//! `route_layer`; each route is configured with exactly one strategy,
//! either a role gate or a permission gate. Both re-fetch the user's
//! grants from the store on every request, so the decision never
//! trusts the token's role snapshot.

use crate::domains::auth::{AuthError, RbacResolver};
use crate::server::middleware::AuthUser;
use axum::{middleware::Next, response::Response};
use std::sync::Arc;

/// Role-based authorization middleware
///
/// Grants access when the user holds any one of the required role
/// names (logical OR).
pub async fn require_role(
    rbac: Arc<RbacResolver>,
    required: Arc<Vec<String>>,
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let user = current_user(&request)?;

    if !rbac.has_role(user.user_id, &required).await? {
        return Err(AuthError::RoleDenied);
    }

    Ok(next.run(request).await)
}

/// Permission-based authorization middleware
pub async fn require_permission(
    rbac: Arc<RbacResolver>,
    required: &'static str,
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let user = current_user(&request)?;

    if !rbac.has_permission(user.user_id, required).await? {
        return Err(AuthError::PermissionDenied);
    }

    Ok(next.run(request).await)
}

/// The authenticated user attached by stage 1. Gates are unreachable
/// without it; a missing entry is an authentication failure.
fn current_user(
    request: &axum::http::Request<axum::body::Body>,
) -> Result<AuthUser, AuthError> {
    request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or(AuthError::TokenMissing)
}
