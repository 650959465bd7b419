// Internship Hub - API Core
//
// This crate provides the backend API for managing users, roles,
// permissions, and internship records, exposed over REST and GraphQL
// with JWT-based authentication and role/permission authorization.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;
pub mod store;

pub use config::*;
