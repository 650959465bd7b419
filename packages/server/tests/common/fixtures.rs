//! Store seeding helpers shared by the integration tests.

use server_core::common::password;
use server_core::domains::user::models::NewUser;
use server_core::store::Store;

use super::store::MemStore;

pub const TEST_PASSWORD: &str = "Secret#123";

/// Ids of the seeded roles and permissions.
pub struct Seed {
    pub user_role_id: i64,
    pub admin_role_id: i64,
    pub get_users_id: i64,
    pub update_users_id: i64,
    pub delete_users_id: i64,
}

/// Seed the default roles and stock permissions: "User" with no
/// grants, "Admin" with the full permission set.
pub async fn seed_roles(store: &MemStore) -> Seed {
    let user_role = store.insert_role("User").await.unwrap();
    let admin_role = store.insert_role("Admin").await.unwrap();

    let get_users = store.insert_permission("get_users").await.unwrap();
    let update_users = store.insert_permission("update_users").await.unwrap();
    let delete_users = store.insert_permission("delete_users").await.unwrap();

    store
        .set_role_permissions(
            admin_role.id,
            &[get_users.id, update_users.id, delete_users.id],
        )
        .await
        .unwrap();

    Seed {
        user_role_id: user_role.id,
        admin_role_id: admin_role.id,
        get_users_id: get_users.id,
        update_users_id: update_users.id,
        delete_users_id: delete_users.id,
    }
}

/// Create a user with [`TEST_PASSWORD`] and the given roles (by name).
pub async fn create_test_user(
    store: &MemStore,
    username: &str,
    email: &str,
    roles: &[&str],
) -> i64 {
    let user = store
        .insert_user(NewUser {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            username: username.to_string(),
            mobile_number: "5550000000".to_string(),
            email: email.to_string(),
            password: password::hash_password(TEST_PASSWORD),
        })
        .await
        .unwrap();

    let mut role_ids = Vec::new();
    for name in roles {
        let role = store.find_role_by_name(name).await.unwrap().unwrap();
        role_ids.push(role.id);
    }
    store.assign_roles(user.id, &role_ids).await.unwrap();

    user.id
}

/// Issue a token for a user the way the login endpoint would.
pub fn token_for(user_id: i64, email: &str, roles: &[&str]) -> String {
    super::jwt_service()
        .issue(
            user_id,
            email.to_string(),
            Some(roles.iter().map(|r| r.to_string()).collect()),
        )
        .unwrap()
}
