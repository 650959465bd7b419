//! Cursor-based pagination types for the user connection.
//!
//! Forward-only pagination in the Relay connection shape: the client
//! passes `first`/`after`, the store fetches one row beyond the page to
//! detect whether more remain.
//!
//! # Usage
//!
//! ```rust,ignore
//! // In GraphQL query resolver
//! let args = PaginationArgs { first: Some(10), after: None };
//! let validated = args.validate()?;
//!
//! // In store
//! let (users, has_more) = store.search_users(search, &validated).await?;
//! ```

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use juniper::GraphQLObject;

// ============================================================================
// Cursor
// ============================================================================

/// Opaque cursor for pagination (base64-encoded record id).
///
/// Ids are monotonically assigned, so the id alone provides stable
/// ordering.
#[derive(Debug, Clone, Copy)]
pub struct Cursor(i64);

impl Cursor {
    /// Create a cursor from a record id.
    pub fn new(id: i64) -> Self {
        Cursor(id)
    }

    /// Encode the cursor as a base64 string.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0.to_be_bytes())
    }

    /// Encode a record id directly to a cursor string.
    pub fn encode_id(id: i64) -> String {
        Cursor::new(id).encode()
    }

    /// Decode a cursor string back to a Cursor.
    pub fn decode(s: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .context("Invalid cursor: not valid base64")?;
        let bytes: [u8; 8] = bytes
            .try_into()
            .map_err(|_| anyhow::anyhow!("Invalid cursor: not a valid id"))?;
        Ok(Cursor(i64::from_be_bytes(bytes)))
    }

    /// Get the underlying record id.
    pub fn into_id(self) -> i64 {
        self.0
    }
}

// ============================================================================
// PageInfo
// ============================================================================

/// Page information for cursor-based pagination.
#[derive(Debug, Clone, GraphQLObject)]
#[graphql(description = "Information about pagination in a connection")]
pub struct PageInfo {
    /// Cursor of the last edge in the page.
    pub end_cursor: Option<String>,
    /// When paginating forwards, are there more items?
    pub has_next_page: bool,
}

impl PageInfo {
    /// Create empty page info (no items).
    pub fn empty() -> Self {
        PageInfo {
            end_cursor: None,
            has_next_page: false,
        }
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Pagination Arguments
// ============================================================================

/// Input arguments for forward cursor-based pagination.
#[derive(Debug, Clone, Default)]
pub struct PaginationArgs {
    /// Returns the first n elements from the list.
    pub first: Option<i32>,
    /// Returns elements that come after the specified cursor.
    pub after: Option<String>,
}

impl PaginationArgs {
    /// Validate pagination arguments.
    ///
    /// Returns validated args with defaults applied and cursor decoded.
    pub fn validate(&self) -> Result<ValidatedPaginationArgs, &'static str> {
        // Get limit with default (10) and bounds (1-100)
        let limit = self.first.unwrap_or(10);
        let limit = limit.clamp(1, 100);

        // Decode cursor if present
        let after = self
            .after
            .as_ref()
            .map(|c| Cursor::decode(c))
            .transpose()
            .map_err(|_| "Invalid cursor")?
            .map(|c| c.into_id());

        Ok(ValidatedPaginationArgs { limit, after })
    }
}

/// Validated and normalized pagination arguments.
#[derive(Debug, Clone)]
pub struct ValidatedPaginationArgs {
    /// Number of items to fetch (1-100, default 10).
    pub limit: i32,
    /// Record id decoded from the `after` cursor (if provided).
    pub after: Option<i64>,
}

impl ValidatedPaginationArgs {
    /// Get the SQL LIMIT value (limit + 1 to detect has_more).
    pub fn fetch_limit(&self) -> i64 {
        (self.limit + 1) as i64
    }
}
