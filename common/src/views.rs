//! Output views for paginated list operations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Pagination metadata accompanying one page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct PageInfo {
    /// Token for the page after this one, if any.
    pub next_cursor: Option<String>,

    /// Token for the page before this one, if any.
    pub prev_cursor: Option<String>,

    /// Whether a further page exists in the traversal direction.
    pub has_more: bool,

    /// Whether this page was reached via a cursor, i.e. is not the first.
    pub has_prev: bool,

    /// Number of items in this page.
    pub count: u64,

    /// Total rows in the scoped collection. Only populated on request;
    /// counting is expensive on large collections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

/// One page of records plus the metadata needed to continue traversal. The
/// `items` sequence always reads in forward logical order, regardless of the
/// direction that produced the page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> PaginatedList<T> {
    /// The shape returned for an empty collection: no items, no cursors.
    pub fn empty() -> Self {
        Self {
            items: vec![],
            pagination: PageInfo::default(),
        }
    }
}
