use chrono::{DateTime, Utc};
use juniper::GraphQLObject;
use serde::{Deserialize, Serialize};

use crate::common::pagination::PageInfo;
use crate::domains::user::models::User;

/// User API data type
///
/// Public representation of a user for REST and GraphQL responses.
/// The password hash never leaves the store layer.
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[serde(rename_all = "camelCase")]
#[graphql(description = "A registered user")]
pub struct UserData {
    /// Unique identifier
    pub id: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Unique login name
    pub username: String,

    /// Contact number
    pub mobile_number: String,

    /// Unique email address
    pub email: String,

    /// When the user registered
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            mobile_number: user.mobile_number,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Body of `POST /users`.
///
/// All fields are optional at the serde layer so validation can answer
/// with a 400 and a field-level message instead of a deserialize error.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub mobile_number: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Explicit role assignment by role id; falls back to the default
    /// role when empty or unresolvable.
    pub role: Option<Vec<i64>>,
}

/// Body of `PATCH /users/:id`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub mobile_number: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of `POST /users/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST /users/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// One edge of the user connection.
#[derive(Debug, Clone, GraphQLObject)]
#[graphql(description = "A user in a paginated connection")]
pub struct UserEdge {
    pub cursor: String,
    pub node: UserData,
}

/// Paginated user list (cursor-based).
#[derive(Debug, Clone, GraphQLObject)]
#[graphql(description = "A page of users")]
pub struct UserConnection {
    pub edges: Vec<UserEdge>,
    pub page_info: PageInfo,
}
