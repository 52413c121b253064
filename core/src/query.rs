//! The query-handle contract the engine paginates against.

use async_trait::async_trait;
use turnstile_common::params::SortOrder;

use crate::condition::CursorBound;

/// A row the engine can mint cursors for.
pub trait Record {
    /// The row's unique identifier, used as the deterministic tie-break.
    fn record_id(&self) -> u64;
}

/// An already-filtered, orderable, limitable query handle.
///
/// The engine never builds the base query: callers apply their own filters
/// (status, date ranges, ownership) and hand the handle over. The engine
/// then only adds the cursor condition, the two-column ordering, and the
/// limit. Cancellation and timeouts belong to the implementation; store
/// failures are propagated to the caller unchanged.
#[async_trait]
pub trait PageQuery: Send + Sized {
    type Item: Send;
    type Error: Send;

    /// Restrict the query to rows admitted by the boundary condition.
    fn with_condition(self, bound: CursorBound) -> Self;

    /// Order by `sort_by` and then by the id column, both in `order`.
    fn order_by(self, sort_by: &str, order: SortOrder) -> Self;

    /// Cap the number of rows fetched.
    fn limit(self, limit: u64) -> Self;

    /// Execute the query and materialize the rows.
    async fn fetch(self) -> Result<Vec<Self::Item>, Self::Error>;

    /// Count every row the query currently matches, ignoring any limit.
    /// Decoupled from the page fetch; counting is expensive on large
    /// collections and most callers skip it.
    async fn total(self) -> Result<u64, Self::Error>;
}
