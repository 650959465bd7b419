//! Permission administration handlers.

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::domains::auth::AuthError;
use crate::domains::role::data::{CreateNamedRequest, PermissionData};
use crate::server::app::AppState;

/// `POST /permissions`
pub async fn create_permission(
    Extension(state): Extension<AppState>,
    Json(body): Json<CreateNamedRequest>,
) -> Result<Response, AuthError> {
    let Some(name) = body.name.filter(|name| !name.trim().is_empty()) else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "Permission name is required" })),
        )
            .into_response());
    };

    let permission = state.store.insert_permission(&name).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Permission created successfully",
            "permission": PermissionData::from(permission)
        })),
    )
        .into_response())
}
