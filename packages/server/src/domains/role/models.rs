use anyhow::Result;
use sqlx::PgPool;

/// Role model - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

/// Permission model - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Permission {
    pub id: i64,
    pub name: String,
}

/// A role with its permission set.
///
/// Permissions always travel with the role; there is no lazy loading,
/// so a role loaded through here is never missing grants.
#[derive(Debug, Clone)]
pub struct RoleWithPermissions {
    pub id: i64,
    pub name: String,
    pub permissions: Vec<Permission>,
}

impl Role {
    /// Insert new role
    pub async fn insert(name: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("INSERT INTO roles (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Find role by ID
    pub async fn find_by_id(id: i64, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find role by its exact name (case-sensitive)
    pub async fn find_by_name(name: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Replace the role's permission set
    pub async fn set_permissions(role_id: i64, permission_ids: &[i64], pool: &PgPool) -> Result<()> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM role_permission WHERE role_id = $1")
            .bind(role_id)
            .execute(&mut *tx)
            .await?;

        for permission_id in permission_ids {
            sqlx::query("INSERT INTO role_permission (role_id, permission_id) VALUES ($1, $2)")
                .bind(role_id)
                .bind(permission_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

impl Permission {
    /// Insert new permission
    pub async fn insert(name: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("INSERT INTO permissions (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Find permissions by a list of ids
    pub async fn find_by_ids(ids: &[i64], pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM permissions WHERE id = ANY($1) ORDER BY id")
            .bind(ids)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}

impl RoleWithPermissions {
    /// Fetch the roles assigned to a user, each with its permission set.
    pub async fn find_for_user(user_id: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT r.id, r.name
             FROM roles r
             JOIN user_roles ur ON ur.role_id = r.id
             WHERE ur.user_id = $1
             ORDER BY r.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let mut loaded = Vec::with_capacity(roles.len());
        for role in roles {
            let permissions = sqlx::query_as::<_, Permission>(
                "SELECT p.id, p.name
                 FROM permissions p
                 JOIN role_permission rp ON rp.permission_id = p.id
                 WHERE rp.role_id = $1
                 ORDER BY p.id",
            )
            .bind(role.id)
            .fetch_all(pool)
            .await?;

            loaded.push(RoleWithPermissions {
                id: role.id,
                name: role.name,
                permissions,
            });
        }

        Ok(loaded)
    }
}
