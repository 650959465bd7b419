//! GraphQL schema definition.

use super::context::GraphQLContext;
use juniper::{EmptyMutation, EmptySubscription, FieldError, FieldResult, RootNode};
use tracing::error;

use crate::common::pagination::{Cursor, PageInfo, PaginationArgs};
use crate::domains::user::data::{UserConnection, UserData, UserEdge};

/// Convert anyhow::Error to juniper FieldError for thin resolvers
fn to_field_error(e: anyhow::Error) -> FieldError {
    FieldError::new(e.to_string(), juniper::Value::null())
}

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    /// Get a user by id
    async fn user(ctx: &GraphQLContext, id: juniper::ID) -> FieldResult<UserData> {
        let not_found = || FieldError::new("User not found", juniper::Value::null());

        let id: i64 = id.parse().map_err(|_| not_found())?;

        let user = ctx.store.find_user_by_id(id).await.map_err(|e| {
            error!("Failed to get user: {}", e);
            to_field_error(e)
        })?;

        user.map(Into::into).ok_or_else(not_found)
    }

    /// Get paginated users with an optional substring search over
    /// first name, last name, and email
    ///
    /// Arguments:
    /// - search: Case-insensitive substring filter
    /// - first: Return first N items (default 10, max 100)
    /// - after: Return items after this cursor
    async fn users(
        ctx: &GraphQLContext,
        search: Option<String>,
        first: Option<i32>,
        after: Option<String>,
    ) -> FieldResult<UserConnection> {
        let args = PaginationArgs { first, after };
        let validated = args
            .validate()
            .map_err(|e| FieldError::new(e, juniper::Value::null()))?;

        let (users, has_more) = ctx
            .store
            .search_users(search.as_deref().unwrap_or(""), &validated)
            .await
            .map_err(|e| {
                error!("Failed to get users: {}", e);
                to_field_error(e)
            })?;

        let edges: Vec<UserEdge> = users
            .into_iter()
            .map(|user| UserEdge {
                cursor: Cursor::encode_id(user.id),
                node: user.into(),
            })
            .collect();

        let page_info = PageInfo {
            end_cursor: edges.last().map(|edge| edge.cursor.clone()),
            has_next_page: has_more,
        };

        Ok(UserConnection { edges, page_info })
    }
}

pub type Schema = RootNode<'static, Query, EmptyMutation<GraphQLContext>, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, EmptyMutation::new(), EmptySubscription::new())
}
