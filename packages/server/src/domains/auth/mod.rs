//! Auth domain - token issuance/verification and RBAC resolution
//!
//! Request flow: the bearer token is verified first (stage 1), then a
//! per-route role or permission gate re-resolves the user's grants
//! from the store (stage 2) before the handler runs.

pub mod error;
pub mod jwt;
pub mod rbac;

pub use error::AuthError;
pub use jwt::{Claims, JwtService};
pub use rbac::{RbacResolver, DEFAULT_ROLE};
