// HTTP routes
pub mod graphql;
pub mod health;
pub mod internships;
pub mod permissions;
pub mod roles;
pub mod users;

pub use graphql::*;
pub use health::*;
pub use internships::*;
pub use permissions::*;
pub use roles::*;
pub use users::*;
