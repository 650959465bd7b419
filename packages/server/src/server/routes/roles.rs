//! Role administration handlers.

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::domains::auth::AuthError;
use crate::domains::role::data::{AddPermissionsRequest, CreateNamedRequest, RoleData};
use crate::server::app::AppState;

/// `POST /roles`
pub async fn create_role(
    Extension(state): Extension<AppState>,
    Json(body): Json<CreateNamedRequest>,
) -> Result<Response, AuthError> {
    let Some(name) = body.name.filter(|name| !name.trim().is_empty()) else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "Role name is required" })),
        )
            .into_response());
    };

    if state.store.find_role_by_name(&name).await?.is_some() {
        return Ok((
            StatusCode::CONFLICT,
            Json(json!({ "status": "Role already exists." })),
        )
            .into_response());
    }

    let role = state.store.insert_role(&name).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Role created successfully",
            "role": RoleData::from(role)
        })),
    )
        .into_response())
}

/// `POST /roles/:roleId/permissions`
///
/// Replaces the role's permission set with the given permission ids.
pub async fn add_permissions_to_role(
    Extension(state): Extension<AppState>,
    Path(role_id): Path<String>,
    Json(body): Json<AddPermissionsRequest>,
) -> Result<Response, AuthError> {
    let Ok(role_id) = role_id.parse::<i64>() else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "Invalid role id" })),
        )
            .into_response());
    };

    let Some(permission_ids) = body.permission_ids.filter(|ids| !ids.is_empty()) else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "Invalid permissions list" })),
        )
            .into_response());
    };

    if state.store.find_role_by_id(role_id).await?.is_none() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "status": "Role not found" })),
        )
            .into_response());
    }

    let found = state
        .store
        .find_permissions_by_ids(&permission_ids)
        .await?;
    if found.len() != permission_ids.len() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "status": "Permission not found" })),
        )
            .into_response());
    }

    state
        .store
        .set_role_permissions(role_id, &permission_ids)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Permissions updated successfully" })),
    )
        .into_response())
}
