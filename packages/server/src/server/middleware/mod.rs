// HTTP middleware
pub mod jwt_auth;
pub mod require;

pub use jwt_auth::*;
pub use require::*;
