use crate::domains::auth::{AuthError, JwtService};
use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// Authenticated user information from JWT
///
/// Typed per-request context attached by the authentication
/// middleware. `roles` is the issuance-time snapshot from the token,
/// for coarse display only; authorization gates re-resolve from the
/// store.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
    pub roles: Vec<String>,
}

/// JWT authentication middleware (stage 1, strict)
///
/// Requires a `Bearer` token in the Authorization header, verifies it,
/// and adds [`AuthUser`] to request extensions. Requests without a
/// verifiable token are rejected before any handler runs.
pub async fn auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let user = authenticate(&request, &jwt_service)?;
    debug!(user_id = user.user_id, "authenticated request");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// JWT authentication middleware (lenient)
///
/// Used on public endpoints that still want to know who is calling:
/// attaches [`AuthUser`] when a valid token is present, otherwise the
/// request continues anonymously.
pub async fn optional_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match authenticate(&request, &jwt_service) {
        Ok(user) => {
            debug!(user_id = user.user_id, "authenticated request");
            request.extensions_mut().insert(user);
        }
        Err(_) => {
            debug!("no valid authentication token");
        }
    }

    next.run(request).await
}

/// Extract and verify the bearer token from a request
fn authenticate(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Result<AuthUser, AuthError> {
    // Get Authorization header; anything but a Bearer scheme is rejected
    let header = request
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::AuthHeaderMissing)?;

    let token = header
        .strip_prefix("Bearer")
        .ok_or(AuthError::AuthHeaderMissing)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::TokenMissing);
    }

    let claims = jwt_service.verify(token)?;

    Ok(AuthUser {
        user_id: claims.id,
        email: claims.email,
        roles: claims.role.unwrap_or_default(),
    })
}
