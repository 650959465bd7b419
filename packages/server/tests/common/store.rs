//! In-memory store used by the integration tests.
//!
//! Implements [`Store`] with the same observable behavior as the
//! Postgres implementation, including unique constraints and cascading
//! deletes.

use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;

use server_core::common::pagination::ValidatedPaginationArgs;
use server_core::domains::internship::models::{Internship, NewInternship};
use server_core::domains::role::models::{Permission, Role, RoleWithPermissions};
use server_core::domains::user::models::{NewUser, User, UserChanges, UserWithRoles};
use server_core::store::Store;

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    roles: Vec<Role>,
    permissions: Vec<Permission>,
    user_roles: Vec<(i64, i64)>,
    role_permissions: Vec<(i64, i64)>,
    internships: Vec<Internship>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        let inner = self.inner.lock().unwrap();
        let mut users = inner.users.clone();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|user| user.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|user| user.email == email).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_user_with_roles(&self, id: i64) -> Result<Option<UserWithRoles>> {
        let inner = self.inner.lock().unwrap();

        let Some(user) = inner.users.iter().find(|user| user.id == id).cloned() else {
            return Ok(None);
        };

        let mut roles = Vec::new();
        for (user_id, role_id) in &inner.user_roles {
            if *user_id != id {
                continue;
            }
            if let Some(role) = inner.roles.iter().find(|role| role.id == *role_id) {
                let permissions = inner
                    .role_permissions
                    .iter()
                    .filter(|(rid, _)| rid == role_id)
                    .filter_map(|(_, pid)| {
                        inner.permissions.iter().find(|p| p.id == *pid).cloned()
                    })
                    .collect();

                roles.push(RoleWithPermissions {
                    id: role.id,
                    name: role.name.clone(),
                    permissions,
                });
            }
        }

        Ok(Some(UserWithRoles { user, roles }))
    }

    async fn insert_user(&self, new: NewUser) -> Result<User> {
        let mut inner = self.inner.lock().unwrap();

        if inner.users.iter().any(|user| user.email == new.email) {
            bail!("duplicate key value violates unique constraint \"users_email_key\"");
        }
        if inner.users.iter().any(|user| user.username == new.username) {
            bail!("duplicate key value violates unique constraint \"users_username_key\"");
        }

        let user = User {
            id: inner.next_id(),
            first_name: new.first_name,
            last_name: new.last_name,
            username: new.username,
            mobile_number: new.mobile_number,
            email: new.email,
            password: new.password,
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());

        Ok(user)
    }

    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>> {
        let mut inner = self.inner.lock().unwrap();

        let Some(user) = inner.users.iter_mut().find(|user| user.id == id) else {
            return Ok(None);
        };

        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        if let Some(username) = changes.username {
            user.username = username;
        }
        if let Some(mobile_number) = changes.mobile_number {
            user.mobile_number = mobile_number;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password) = changes.password {
            user.password = password;
        }

        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();

        let before = inner.users.len();
        inner.users.retain(|user| user.id != id);
        if inner.users.len() == before {
            return Ok(false);
        }

        // Cascades
        inner.user_roles.retain(|(user_id, _)| *user_id != id);
        inner.internships.retain(|i| i.user_id != id);

        Ok(true)
    }

    async fn search_users(
        &self,
        search: &str,
        page: &ValidatedPaginationArgs,
    ) -> Result<(Vec<User>, bool)> {
        let inner = self.inner.lock().unwrap();

        let needle = search.to_lowercase();
        let mut matched: Vec<User> = inner
            .users
            .iter()
            .filter(|user| {
                user.first_name.to_lowercase().contains(&needle)
                    || user.last_name.to_lowercase().contains(&needle)
                    || user.email.to_lowercase().contains(&needle)
            })
            .filter(|user| page.after.map_or(true, |after| user.id > after))
            .cloned()
            .collect();
        matched.sort_by_key(|user| user.id);

        let has_more = matched.len() > page.limit as usize;
        matched.truncate(page.limit as usize);

        Ok((matched, has_more))
    }

    async fn assign_roles(&self, user_id: i64, role_ids: &[i64]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();

        inner.user_roles.retain(|(uid, _)| *uid != user_id);
        for role_id in role_ids {
            inner.user_roles.push((user_id, *role_id));
        }

        Ok(())
    }

    async fn insert_role(&self, name: &str) -> Result<Role> {
        let mut inner = self.inner.lock().unwrap();

        if inner.roles.iter().any(|role| role.name == name) {
            bail!("duplicate key value violates unique constraint \"roles_name_key\"");
        }

        let role = Role {
            id: inner.next_id(),
            name: name.to_string(),
        };
        inner.roles.push(role.clone());

        Ok(role)
    }

    async fn find_role_by_id(&self, id: i64) -> Result<Option<Role>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.roles.iter().find(|role| role.id == id).cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.roles.iter().find(|role| role.name == name).cloned())
    }

    async fn set_role_permissions(&self, role_id: i64, permission_ids: &[i64]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();

        inner.role_permissions.retain(|(rid, _)| *rid != role_id);
        for permission_id in permission_ids {
            inner.role_permissions.push((role_id, *permission_id));
        }

        Ok(())
    }

    async fn insert_permission(&self, name: &str) -> Result<Permission> {
        let mut inner = self.inner.lock().unwrap();

        if inner.permissions.iter().any(|p| p.name == name) {
            bail!("duplicate key value violates unique constraint \"permissions_name_key\"");
        }

        let permission = Permission {
            id: inner.next_id(),
            name: name.to_string(),
        };
        inner.permissions.push(permission.clone());

        Ok(permission)
    }

    async fn find_permissions_by_ids(&self, ids: &[i64]) -> Result<Vec<Permission>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .permissions
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn insert_internship(&self, new: NewInternship) -> Result<Internship> {
        let mut inner = self.inner.lock().unwrap();

        let internship = Internship {
            id: inner.next_id(),
            joined_date: new.joined_date,
            completion_date: new.completion_date,
            is_certified: new.is_certified,
            mentor_name: new.mentor_name,
            user_id: new.user_id,
        };
        inner.internships.push(internship.clone());

        Ok(internship)
    }

    async fn list_internships_for_user(&self, user_id: i64) -> Result<Vec<Internship>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .internships
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
