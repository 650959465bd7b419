// Role and permission domain

pub mod data;
pub mod models;

pub use models::{Permission, Role, RoleWithPermissions};
