use std::sync::Arc;

use crate::server::middleware::AuthUser;
use crate::store::Store;

/// GraphQL request context
///
/// Contains the store handle shared by all resolvers plus the
/// per-request authenticated user, when one presented a valid token.
#[derive(Clone)]
pub struct GraphQLContext {
    pub store: Arc<dyn Store>,
    pub auth_user: Option<AuthUser>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(store: Arc<dyn Store>, auth_user: Option<AuthUser>) -> Self {
        Self { store, auth_user }
    }
}
