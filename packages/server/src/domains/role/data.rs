use serde::{Deserialize, Serialize};

use crate::domains::role::models::{Permission, Role};

/// Role API data type
#[derive(Debug, Clone, Serialize)]
pub struct RoleData {
    pub id: String,
    pub name: String,
}

impl From<Role> for RoleData {
    fn from(role: Role) -> Self {
        Self {
            id: role.id.to_string(),
            name: role.name,
        }
    }
}

/// Permission API data type
#[derive(Debug, Clone, Serialize)]
pub struct PermissionData {
    pub id: String,
    pub name: String,
}

impl From<Permission> for PermissionData {
    fn from(permission: Permission) -> Self {
        Self {
            id: permission.id.to_string(),
            name: permission.name,
        }
    }
}

/// Body of `POST /roles` and `POST /permissions`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CreateNamedRequest {
    pub name: Option<String>,
}

/// Body of `POST /roles/:roleId/permissions`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddPermissionsRequest {
    pub permission_ids: Option<Vec<i64>>,
}
