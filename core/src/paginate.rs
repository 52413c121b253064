//! Single-collection page fetch.

use turnstile_common::{
    cursor::{CursorData, SortValue},
    params::{Direction, NormalizedParams, PaginationParams},
    views::{PageInfo, PaginatedList},
};

use crate::{
    condition::CursorBound,
    query::{PageQuery, Record},
};

/// Fetch one page from an already-filtered query handle.
///
/// The cursor (if present and decodable) anchors the page boundary to a
/// specific (sort value, id) pair, so concurrent inserts and deletes
/// elsewhere in the collection never shift, duplicate, or skip rows. An
/// undecodable cursor falls back to the first page; store failures are
/// propagated unchanged.
pub async fn paginate<Q, F>(
    query: Q,
    params: &PaginationParams,
    get_sort_value: F,
) -> Result<PaginatedList<Q::Item>, Q::Error>
where
    Q: PageQuery,
    Q::Item: Record,
    F: Fn(&Q::Item) -> SortValue,
{
    paginate_normalized(query, &params.normalize(), &get_sort_value).await
}

/// Like [`paginate`], but also runs the decoupled count query and populates
/// `total_count`. Requires a cloneable handle since the count and the page
/// fetch are separate executions.
pub async fn paginate_with_total<Q, F>(
    query: Q,
    params: &PaginationParams,
    get_sort_value: F,
) -> Result<PaginatedList<Q::Item>, Q::Error>
where
    Q: PageQuery + Clone,
    Q::Item: Record,
    F: Fn(&Q::Item) -> SortValue,
{
    let total = query.clone().total().await?;

    let mut page = paginate_normalized(query, &params.normalize(), &get_sort_value).await?;
    page.pagination.total_count = Some(total);

    Ok(page)
}

/// [`paginate`] over parameters the caller has already normalized, e.g.
/// against a collection-specific sort-field allow-list.
pub async fn paginate_normalized<Q, F>(
    query: Q,
    params: &NormalizedParams,
    get_sort_value: &F,
) -> Result<PaginatedList<Q::Item>, Q::Error>
where
    Q: PageQuery,
    Q::Item: Record,
    F: Fn(&Q::Item) -> SortValue,
{
    let cursor = params.cursor.as_deref().and_then(CursorData::decode_opt);
    let has_prev = cursor.is_some();

    let mut query = query;
    if let Some(data) = &cursor {
        query = query.with_condition(CursorBound::for_cursor(data, params.direction));
    }

    // Traversal direction only flips the fetch order so the boundary
    // comparison walks the right way; which rows are "biggest" in absolute
    // terms is decided by the sort order alone.
    let effective_order = match params.direction {
        Direction::Next => params.sort_order,
        Direction::Prev => params.sort_order.reversed(),
    };

    let mut rows = query
        .order_by(&params.sort_by, effective_order)
        .limit(params.limit + 1)
        .fetch()
        .await?;

    // The limit+1-th row is a sentinel: it only signals that a further page
    // exists in the traversal direction.
    let has_more = rows.len() as u64 > params.limit;
    if has_more {
        rows.truncate(params.limit as usize);
    }

    tracing::debug!(
        limit = params.limit,
        returned = rows.len(),
        has_more,
        "fetched page"
    );

    // A backward fetch arrives in reverse logical order; restore forward
    // reading order so pages look the same from either direction.
    if params.direction == Direction::Prev {
        rows.reverse();
    }

    let mint = |row: &Q::Item| {
        CursorData {
            sort_value: get_sort_value(row),
            id: row.record_id(),
            sort_by: params.sort_by.clone(),
            sort_order: params.sort_order,
        }
        .encode()
    };

    let (next_cursor, prev_cursor) = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => {
            let next = match params.direction {
                Direction::Next => has_more.then(|| mint(last)),
                Direction::Prev => Some(mint(last)),
            };
            let prev = match params.direction {
                Direction::Next => has_prev.then(|| mint(first)),
                Direction::Prev => has_more.then(|| mint(first)),
            };
            (next, prev)
        }
        _ => (None, None),
    };

    let count = rows.len() as u64;

    Ok(PaginatedList {
        items: rows,
        pagination: PageInfo {
            next_cursor,
            prev_cursor,
            has_more,
            has_prev,
            count,
            total_count: None,
        },
    })
}
