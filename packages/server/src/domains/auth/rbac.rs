//! RBAC resolution: answers "is this action allowed" against live
//! store state.
//!
//! Every check re-fetches the user's roles with their permission sets,
//! so a role or grant change is visible on the very next request.
//! Token-embedded role claims are never consulted here.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::error::AuthError;
use crate::domains::role::models::{Role, RoleWithPermissions};
use crate::store::Store;

/// Name of the role assigned when registration carries no usable role
/// list. Must exist in the store for registration to work at all.
pub const DEFAULT_ROLE: &str = "User";

pub struct RbacResolver {
    store: Arc<dyn Store>,
}

impl RbacResolver {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Current roles of a user, permission sets included.
    pub async fn resolve_roles(&self, user_id: i64) -> Result<Vec<RoleWithPermissions>, AuthError> {
        let user = self
            .store
            .find_user_with_roles(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user.roles)
    }

    /// Union of permission names across all of the user's roles.
    pub async fn resolve_permissions(&self, user_id: i64) -> Result<BTreeSet<String>, AuthError> {
        let roles = self.resolve_roles(user_id).await?;

        Ok(roles
            .into_iter()
            .flat_map(|role| role.permissions)
            .map(|permission| permission.name)
            .collect())
    }

    /// True iff the user holds at least one of the required role names.
    ///
    /// Matching is exact and case-sensitive; roles carry no hierarchy.
    pub async fn has_role(&self, user_id: i64, required: &[String]) -> Result<bool, AuthError> {
        let roles = self.resolve_roles(user_id).await?;

        Ok(roles
            .iter()
            .any(|role| required.iter().any(|name| *name == role.name)))
    }

    /// True iff any of the user's roles lists the required permission,
    /// by exact case-sensitive name.
    pub async fn has_permission(&self, user_id: i64, required: &str) -> Result<bool, AuthError> {
        let roles = self.resolve_roles(user_id).await?;

        Ok(roles
            .iter()
            .any(|role| role.permissions.iter().any(|p| p.name == required)))
    }

    /// Resolve the role set for a user being created.
    ///
    /// Requested ids that do not exist are dropped; when nothing
    /// resolves, the default role is assigned instead. A store without
    /// the default role cannot register users.
    pub async fn roles_for_new_user(&self, requested: &[i64]) -> Result<Vec<Role>, AuthError> {
        let mut roles = Vec::new();
        for id in requested {
            if let Some(role) = self.store.find_role_by_id(*id).await? {
                roles.push(role);
            }
        }

        if roles.is_empty() {
            let default = self
                .store
                .find_role_by_name(DEFAULT_ROLE)
                .await?
                .ok_or_else(|| {
                    AuthError::ConfigurationError(format!(
                        "default role \"{}\" is missing from the store",
                        DEFAULT_ROLE
                    ))
                })?;
            roles.push(default);
        }

        Ok(roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::pagination::ValidatedPaginationArgs;
    use crate::domains::internship::models::{Internship, NewInternship};
    use crate::domains::role::models::Permission;
    use crate::domains::user::models::{NewUser, User, UserChanges, UserWithRoles};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Store stub: one user whose role set can be swapped mid-test.
    struct StubStore {
        user_roles: Mutex<Option<Vec<RoleWithPermissions>>>,
        roles: Vec<Role>,
    }

    impl StubStore {
        fn new(roles: Vec<RoleWithPermissions>) -> Self {
            Self {
                user_roles: Mutex::new(Some(roles)),
                roles: Vec::new(),
            }
        }

        fn with_role_table(roles: Vec<Role>) -> Self {
            Self {
                user_roles: Mutex::new(None),
                roles,
            }
        }

        fn set_user_roles(&self, roles: Option<Vec<RoleWithPermissions>>) {
            *self.user_roles.lock().unwrap() = roles;
        }
    }

    fn test_user(id: i64) -> User {
        User {
            id,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            username: "johndoe".to_string(),
            mobile_number: "5551234567".to_string(),
            email: "john.doe@example.com".to_string(),
            password: "x$y".to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    fn role(id: i64, name: &str, permissions: &[(i64, &str)]) -> RoleWithPermissions {
        RoleWithPermissions {
            id,
            name: name.to_string(),
            permissions: permissions
                .iter()
                .map(|(id, name)| Permission {
                    id: *id,
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    #[async_trait]
    impl Store for StubStore {
        async fn find_user_with_roles(&self, id: i64) -> Result<Option<UserWithRoles>> {
            Ok(self
                .user_roles
                .lock()
                .unwrap()
                .clone()
                .map(|roles| UserWithRoles {
                    user: test_user(id),
                    roles,
                }))
        }

        async fn find_role_by_id(&self, id: i64) -> Result<Option<Role>> {
            Ok(self.roles.iter().find(|r| r.id == id).cloned())
        }

        async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>> {
            Ok(self.roles.iter().find(|r| r.name == name).cloned())
        }

        // The resolver only touches the three lookups above.
        async fn list_users(&self) -> Result<Vec<User>> {
            unimplemented!()
        }
        async fn find_user_by_id(&self, _id: i64) -> Result<Option<User>> {
            unimplemented!()
        }
        async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>> {
            unimplemented!()
        }
        async fn find_user_by_username(&self, _username: &str) -> Result<Option<User>> {
            unimplemented!()
        }
        async fn insert_user(&self, _new: NewUser) -> Result<User> {
            unimplemented!()
        }
        async fn update_user(&self, _id: i64, _changes: UserChanges) -> Result<Option<User>> {
            unimplemented!()
        }
        async fn delete_user(&self, _id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn search_users(
            &self,
            _search: &str,
            _page: &ValidatedPaginationArgs,
        ) -> Result<(Vec<User>, bool)> {
            unimplemented!()
        }
        async fn assign_roles(&self, _user_id: i64, _role_ids: &[i64]) -> Result<()> {
            unimplemented!()
        }
        async fn insert_role(&self, _name: &str) -> Result<Role> {
            unimplemented!()
        }
        async fn set_role_permissions(
            &self,
            _role_id: i64,
            _permission_ids: &[i64],
        ) -> Result<()> {
            unimplemented!()
        }
        async fn insert_permission(&self, _name: &str) -> Result<Permission> {
            unimplemented!()
        }
        async fn find_permissions_by_ids(&self, _ids: &[i64]) -> Result<Vec<Permission>> {
            unimplemented!()
        }
        async fn insert_internship(&self, _new: NewInternship) -> Result<Internship> {
            unimplemented!()
        }
        async fn list_internships_for_user(&self, _user_id: i64) -> Result<Vec<Internship>> {
            unimplemented!()
        }
        async fn ping(&self) -> Result<()> {
            Ok(())
        }
    }

    fn resolver(store: StubStore) -> RbacResolver {
        RbacResolver::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_permissions_are_the_union_over_roles() {
        let rbac = resolver(StubStore::new(vec![
            role(1, "User", &[(1, "get_users")]),
            role(2, "Admin", &[(1, "get_users"), (2, "delete_users")]),
        ]));

        let permissions = rbac.resolve_permissions(7).await.unwrap();
        let expected: BTreeSet<String> = ["get_users", "delete_users"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(permissions, expected);
    }

    #[tokio::test]
    async fn test_has_role_is_logical_or() {
        let rbac = resolver(StubStore::new(vec![role(1, "User", &[])]));

        let required = vec!["Admin".to_string(), "User".to_string()];
        assert!(rbac.has_role(7, &required).await.unwrap());

        let required = vec!["Admin".to_string(), "Moderator".to_string()];
        assert!(!rbac.has_role(7, &required).await.unwrap());
    }

    #[tokio::test]
    async fn test_role_match_is_case_sensitive() {
        let rbac = resolver(StubStore::new(vec![role(1, "Admin", &[])]));

        assert!(rbac.has_role(7, &["Admin".to_string()]).await.unwrap());
        assert!(!rbac.has_role(7, &["admin".to_string()]).await.unwrap());
    }

    #[tokio::test]
    async fn test_permission_match_is_exact() {
        let rbac = resolver(StubStore::new(vec![role(
            1,
            "Admin",
            &[(1, "delete_users")],
        )]));

        assert!(rbac.has_permission(7, "delete_users").await.unwrap());
        assert!(!rbac.has_permission(7, "delete_user").await.unwrap());
        assert!(!rbac.has_permission(7, "Delete_Users").await.unwrap());
    }

    #[tokio::test]
    async fn test_no_role_hierarchy() {
        // "Admin" does not implicitly include "User"'s permissions.
        let rbac = resolver(StubStore::new(vec![role(2, "Admin", &[])]));

        assert!(!rbac.has_permission(7, "get_users").await.unwrap());
        assert!(!rbac.has_role(7, &["User".to_string()]).await.unwrap());
    }

    #[tokio::test]
    async fn test_checks_see_live_state() {
        let store = Arc::new(StubStore::new(vec![role(1, "User", &[])]));
        let rbac = RbacResolver::new(store.clone());

        assert!(!rbac.has_permission(7, "get_users").await.unwrap());

        // Grant the permission; the next check must observe it.
        store.set_user_roles(Some(vec![role(1, "User", &[(1, "get_users")])]));
        assert!(rbac.has_permission(7, "get_users").await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let store = StubStore::new(vec![]);
        store.set_user_roles(None);
        let rbac = resolver(store);

        let result = rbac.resolve_roles(7).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_new_user_keeps_requested_roles() {
        let rbac = resolver(StubStore::with_role_table(vec![
            Role {
                id: 1,
                name: "User".to_string(),
            },
            Role {
                id: 2,
                name: "Admin".to_string(),
            },
        ]));

        let roles = rbac.roles_for_new_user(&[2]).await.unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name, "Admin");
    }

    #[tokio::test]
    async fn test_new_user_falls_back_to_default_role() {
        let rbac = resolver(StubStore::with_role_table(vec![Role {
            id: 1,
            name: "User".to_string(),
        }]));

        // No roles requested
        let roles = rbac.roles_for_new_user(&[]).await.unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name, "User");

        // Requested ids that don't exist
        let roles = rbac.roles_for_new_user(&[99]).await.unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name, "User");
    }

    #[tokio::test]
    async fn test_missing_default_role_is_a_configuration_error() {
        let rbac = resolver(StubStore::with_role_table(vec![]));

        let result = rbac.roles_for_new_user(&[]).await;
        assert!(matches!(result, Err(AuthError::ConfigurationError(_))));
    }
}
