//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, patch, post},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::auth::{JwtService, RbacResolver};
use crate::server::graphql::{create_schema, GraphQLContext};
use crate::server::middleware::{
    auth_middleware, optional_auth_middleware, require_permission, require_role, AuthUser,
};
use crate::server::routes::{
    add_permissions_to_role, create_internship, create_permission, create_role, create_user,
    delete_user, get_user, graphql_batch_handler, graphql_handler, health_handler,
    list_internships, list_users, login, update_user,
};
use crate::store::Store;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt_service: Arc<JwtService>,
    pub rbac: Arc<RbacResolver>,
}

/// Middleware to create GraphQLContext per-request
async fn create_graphql_context(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Auth user is present when the optional auth middleware verified
    // a bearer token for this request
    let auth_user = request.extensions().get::<AuthUser>().cloned();

    let context = GraphQLContext::new(state.store.clone(), auth_user);
    request.extensions_mut().insert(context);

    next.run(request).await
}

/// Build the Axum application router
///
/// REST routes are grouped by authorization policy: public, permission
/// gated, and role gated. Token verification (stage 1) is layered
/// outside the per-route gates (stage 2), so a gate only ever sees a
/// request with a verified token.
pub fn build_app(store: Arc<dyn Store>, jwt_service: Arc<JwtService>) -> Router {
    // Create GraphQL schema (singleton)
    let schema = Arc::new(create_schema());

    let rbac = Arc::new(RbacResolver::new(store.clone()));

    // Create shared app state
    let app_state = AppState {
        store,
        jwt_service: jwt_service.clone(),
        rbac: rbac.clone(),
    };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Rate limiting for the GraphQL endpoints (10/sec with burst of 20)
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers() // Extract IP from X-Forwarded-For header
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );

    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    // Public REST routes
    let public = Router::new()
        .route("/users", post(create_user))
        .route("/users/login", post(login));

    // Permission-gated reads
    let reads = {
        let rbac = rbac.clone();
        Router::new()
            .route("/users", get(list_users))
            .route("/users/:id", get(get_user))
            .route("/users/:id/internships", get(list_internships))
            .route_layer(middleware::from_fn(move |req, next| {
                require_permission(rbac.clone(), "get_users", req, next)
            }))
    };

    // Permission-gated updates
    let updates = {
        let rbac = rbac.clone();
        Router::new()
            .route("/users/:id", patch(update_user))
            .route_layer(middleware::from_fn(move |req, next| {
                require_permission(rbac.clone(), "update_users", req, next)
            }))
    };

    // Role-gated admin operations
    let admin = {
        let rbac = rbac.clone();
        let required = Arc::new(vec!["Admin".to_string()]);
        Router::new()
            .route("/users/:id", delete(delete_user))
            .route("/users/:id/internships", post(create_internship))
            .route("/roles", post(create_role))
            .route("/roles/:id/permissions", post(add_permissions_to_role))
            .route("/permissions", post(create_permission))
            .route_layer(middleware::from_fn(move |req, next| {
                require_role(rbac.clone(), required.clone(), req, next)
            }))
    };

    // Token verification always runs before the per-route gates
    let protected = {
        let jwt_service = jwt_service.clone();
        reads
            .merge(updates)
            .merge(admin)
            .route_layer(middleware::from_fn(move |req, next| {
                auth_middleware(jwt_service.clone(), req, next)
            }))
    };

    // GraphQL endpoints with rate limiting. The schema is read-only and
    // public; a valid bearer token still gets attached to the context.
    let mut graphql_routes = Router::new()
        .route("/graphql", post(graphql_handler))
        .route("/graphql/batch", post(graphql_batch_handler));

    // GraphQL playground only in debug builds (development)
    #[cfg(debug_assertions)]
    {
        use crate::server::routes::graphql_playground;
        graphql_routes = graphql_routes.route("/graphql", get(graphql_playground));
    }

    let graphql_routes = {
        let jwt_service = jwt_service.clone();
        graphql_routes
            // Middleware layers (applied in reverse order - last added runs first)
            .layer(middleware::from_fn(create_graphql_context)) // Create GraphQL context
            .layer(middleware::from_fn(move |req, next| {
                optional_auth_middleware(jwt_service.clone(), req, next)
            })) // JWT authentication (lenient)
            .layer(rate_limit_layer)
            .with_state(schema)
    };

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(graphql_routes)
        // Health check (no rate limit)
        .route("/health", get(health_handler))
        .layer(Extension(app_state)) // Add shared state (must be outside middlewares that need it)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
