//! Postgres-backed store implementation over the domain model queries.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use super::Store;
use crate::common::pagination::ValidatedPaginationArgs;
use crate::domains::internship::models::{Internship, NewInternship};
use crate::domains::role::models::{Permission, Role};
use crate::domains::user::models::{NewUser, User, UserChanges, UserWithRoles};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        User::find_all(&self.pool).await
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        User::find_by_id(id, &self.pool).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        User::find_by_email(email, &self.pool).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        User::find_by_username(username, &self.pool).await
    }

    async fn find_user_with_roles(&self, id: i64) -> Result<Option<UserWithRoles>> {
        User::find_with_roles(id, &self.pool).await
    }

    async fn insert_user(&self, new: NewUser) -> Result<User> {
        User::insert(new, &self.pool).await
    }

    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>> {
        User::update(id, changes, &self.pool).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        User::delete(id, &self.pool).await
    }

    async fn search_users(
        &self,
        search: &str,
        page: &ValidatedPaginationArgs,
    ) -> Result<(Vec<User>, bool)> {
        let mut users =
            User::search_page(search, page.after, page.fetch_limit(), &self.pool).await?;
        let has_more = users.len() > page.limit as usize;
        users.truncate(page.limit as usize);
        Ok((users, has_more))
    }

    async fn assign_roles(&self, user_id: i64, role_ids: &[i64]) -> Result<()> {
        User::assign_roles(user_id, role_ids, &self.pool).await
    }

    async fn insert_role(&self, name: &str) -> Result<Role> {
        Role::insert(name, &self.pool).await
    }

    async fn find_role_by_id(&self, id: i64) -> Result<Option<Role>> {
        Role::find_by_id(id, &self.pool).await
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>> {
        Role::find_by_name(name, &self.pool).await
    }

    async fn set_role_permissions(&self, role_id: i64, permission_ids: &[i64]) -> Result<()> {
        Role::set_permissions(role_id, permission_ids, &self.pool).await
    }

    async fn insert_permission(&self, name: &str) -> Result<Permission> {
        Permission::insert(name, &self.pool).await
    }

    async fn find_permissions_by_ids(&self, ids: &[i64]) -> Result<Vec<Permission>> {
        Permission::find_by_ids(ids, &self.pool).await
    }

    async fn insert_internship(&self, new: NewInternship) -> Result<Internship> {
        Internship::insert(new, &self.pool).await
    }

    async fn list_internships_for_user(&self, user_id: i64) -> Result<Vec<Internship>> {
        Internship::find_by_user(user_id, &self.pool).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
