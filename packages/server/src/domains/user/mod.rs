// User domain: registration, profile CRUD, login

pub mod data;
pub mod models;
pub mod validation;

pub use models::{User, UserWithRoles};
