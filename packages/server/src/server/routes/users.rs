//! User CRUD and login handlers.

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::common::password;
use crate::domains::auth::AuthError;
use crate::domains::user::data::{
    CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest, UserData,
};
use crate::domains::user::models::{NewUser, UserChanges};
use crate::domains::user::validation;
use crate::server::app::AppState;

/// `GET /users`
pub async fn list_users(Extension(state): Extension<AppState>) -> Result<Response, AuthError> {
    let users = state.store.list_users().await?;
    let users: Vec<UserData> = users.into_iter().map(Into::into).collect();

    Ok(Json(users).into_response())
}

/// `GET /users/:id`
pub async fn get_user(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AuthError> {
    match state.store.find_user_by_id(id).await? {
        Some(user) => Ok(Json(UserData::from(user)).into_response()),
        None => Ok(user_not_found()),
    }
}

/// `POST /users`
///
/// Public registration. Validates the body, hashes the password, and
/// applies the default-role policy: explicit role ids are kept when
/// they resolve, otherwise the "User" role is assigned.
pub async fn create_user(
    Extension(state): Extension<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Response, AuthError> {
    if let Err(message) = validation::validate_create(&body) {
        return Ok((StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response());
    }

    // Check for duplicate email / username
    let email = body.email.clone().unwrap_or_default();
    if state.store.find_user_by_email(&email).await?.is_some() {
        return Ok((
            StatusCode::CONFLICT,
            Json(json!({ "status": "Email already exists." })),
        )
            .into_response());
    }
    let username = body.username.clone().unwrap_or_default();
    if state
        .store
        .find_user_by_username(&username)
        .await?
        .is_some()
    {
        return Ok((
            StatusCode::CONFLICT,
            Json(json!({ "status": "Username already exists." })),
        )
            .into_response());
    }

    // Resolve roles before touching the users table; a store without
    // the default role must not accept registrations.
    let requested = body.role.clone().unwrap_or_default();
    let roles = state.rbac.roles_for_new_user(&requested).await?;

    let new_user = NewUser {
        first_name: body.first_name.unwrap_or_default(),
        last_name: body.last_name.unwrap_or_default(),
        username,
        mobile_number: body.mobile_number.unwrap_or_default(),
        email,
        password: password::hash_password(&body.password.unwrap_or_default()),
    };

    let user = match state.store.insert_user(new_user).await {
        Ok(user) => user,
        Err(e) => {
            error!("Failed to add user: {}", e);
            return Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "Failed to add user." })),
            )
                .into_response());
        }
    };

    let role_ids: Vec<i64> = roles.iter().map(|role| role.id).collect();
    state.store.assign_roles(user.id, &role_ids).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "User added successfully", "id": user.id })),
    )
        .into_response())
}

/// `POST /users/login`
///
/// Verifies credentials and issues a token carrying the user's current
/// role names as a display-only snapshot.
pub async fn login(
    Extension(state): Extension<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, AuthError> {
    let Some(user) = state.store.find_user_by_email(&body.email).await? else {
        return Ok(invalid_credentials());
    };

    if !password::verify_password(&body.password, &user.password) {
        return Ok(invalid_credentials());
    }

    let roles = state.rbac.resolve_roles(user.id).await?;
    let role_names: Vec<String> = roles.into_iter().map(|role| role.name).collect();

    let token = state
        .jwt_service
        .issue(user.id, user.email, Some(role_names))?;

    Ok(Json(LoginResponse { token }).into_response())
}

/// `PATCH /users/:id`
pub async fn update_user(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Response, AuthError> {
    if let Err(message) = validation::validate_update(&body) {
        return Ok((StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response());
    }

    // Check for duplicate email if email is being updated
    if let Some(email) = body.email.as_deref() {
        if let Some(existing) = state.store.find_user_by_email(email).await? {
            if existing.id != id {
                return Ok((
                    StatusCode::CONFLICT,
                    Json(json!({ "status": "Email already exists." })),
                )
                    .into_response());
            }
        }
    }

    let changes = UserChanges {
        first_name: body.first_name,
        last_name: body.last_name,
        username: body.username,
        mobile_number: body.mobile_number,
        email: body.email,
        password: body.password.as_deref().map(password::hash_password),
    };

    match state.store.update_user(id, changes).await {
        Ok(Some(_)) => Ok((
            StatusCode::OK,
            Json(json!({
                "status": format!("User with id {} updated successfully.", id)
            })),
        )
            .into_response()),
        Ok(None) => Ok(user_not_found()),
        Err(e) => {
            error!("Failed to update user: {}", e);
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "Failed to update user." })),
            )
                .into_response())
        }
    }
}

/// `DELETE /users/:id`
pub async fn delete_user(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AuthError> {
    if state.store.delete_user(id).await? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Ok(user_not_found())
    }
}

fn user_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "404 User not found" })),
    )
        .into_response()
}

fn invalid_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid credentials" })),
    )
        .into_response()
}
