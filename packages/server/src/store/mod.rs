//! Store collaborator interface.
//!
//! The relational database sits behind this trait so request handlers
//! and the RBAC resolver depend on plain lookup/find/save operations
//! rather than on the pool directly. [`PgStore`] is the production
//! implementation; tests substitute an in-memory one.

use anyhow::Result;
use async_trait::async_trait;

use crate::common::pagination::ValidatedPaginationArgs;
use crate::domains::internship::models::{Internship, NewInternship};
use crate::domains::role::models::{Permission, Role};
use crate::domains::user::models::{NewUser, User, UserChanges, UserWithRoles};

pub mod postgres;

pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    // Users
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Fetch a user together with roles and their permission sets in
    /// one load. Authorization checks go through here and nowhere else.
    async fn find_user_with_roles(&self, id: i64) -> Result<Option<UserWithRoles>>;

    async fn insert_user(&self, new: NewUser) -> Result<User>;
    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;

    /// One page of users matching a case-insensitive substring search
    /// over first name, last name, and email. Returns the page and
    /// whether more rows remain beyond it.
    async fn search_users(
        &self,
        search: &str,
        page: &ValidatedPaginationArgs,
    ) -> Result<(Vec<User>, bool)>;

    /// Replace a user's role assignments.
    async fn assign_roles(&self, user_id: i64, role_ids: &[i64]) -> Result<()>;

    // Roles & permissions
    async fn insert_role(&self, name: &str) -> Result<Role>;
    async fn find_role_by_id(&self, id: i64) -> Result<Option<Role>>;
    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>>;
    async fn set_role_permissions(&self, role_id: i64, permission_ids: &[i64]) -> Result<()>;
    async fn insert_permission(&self, name: &str) -> Result<Permission>;
    async fn find_permissions_by_ids(&self, ids: &[i64]) -> Result<Vec<Permission>>;

    // Internships
    async fn insert_internship(&self, new: NewInternship) -> Result<Internship>;
    async fn list_internships_for_user(&self, user_id: i64) -> Result<Vec<Internship>>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<()>;
}
