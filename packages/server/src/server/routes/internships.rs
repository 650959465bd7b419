//! Internship record handlers.

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::domains::auth::AuthError;
use crate::domains::internship::data::{CreateInternshipRequest, InternshipData};
use crate::domains::internship::models::NewInternship;
use crate::server::app::AppState;

/// `POST /users/:id/internships`
pub async fn create_internship(
    Extension(state): Extension<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<CreateInternshipRequest>,
) -> Result<Response, AuthError> {
    if state.store.find_user_by_id(user_id).await?.is_none() {
        return Ok(user_not_found());
    }

    let new = NewInternship {
        joined_date: body.joined_date,
        completion_date: body.completion_date,
        is_certified: body.is_certified,
        mentor_name: body.mentor_name,
        user_id,
    };

    match state.store.insert_internship(new).await {
        Ok(internship) => Ok((
            StatusCode::CREATED,
            Json(InternshipData::from(internship)),
        )
            .into_response()),
        Err(e) => {
            error!("Error creating internship: {}", e);
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Failed to create internship." })),
            )
                .into_response())
        }
    }
}

/// `GET /users/:id/internships`
pub async fn list_internships(
    Extension(state): Extension<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Response, AuthError> {
    if state.store.find_user_by_id(user_id).await?.is_none() {
        return Ok(user_not_found());
    }

    let internships = state.store.list_internships_for_user(user_id).await?;
    let internships: Vec<InternshipData> = internships.into_iter().map(Into::into).collect();

    Ok(Json(internships).into_response())
}

fn user_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "User not found" })),
    )
        .into_response()
}
