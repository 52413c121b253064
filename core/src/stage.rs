//! Per-stage fan-out: one independent page per partition key.

use std::collections::HashMap;
use std::hash::Hash;

use futures::future::try_join_all;
use turnstile_common::{cursor::SortValue, params::PaginationParams, views::PaginatedList};

use crate::{
    paginate::paginate_normalized,
    query::{PageQuery, Record},
};

/// Paginate each partition of a collection independently and concurrently.
///
/// For every key in `stages`, `build_query` produces a query handle scoped
/// to that partition (e.g. one pipeline stage of a kanban board). Each
/// partition gets its own cursor from `cursors` and the full page-size
/// budget, and is fetched concurrently with the others; there is no
/// cross-partition ordering or shared cursor, so partitions cannot block or
/// interfere with one another. The first store failure aborts the batch.
pub async fn paginate_by_stage<K, Q, B, F>(
    build_query: B,
    stages: &[K],
    params: &PaginationParams,
    cursors: &HashMap<K, String>,
    get_sort_value: F,
) -> Result<HashMap<K, PaginatedList<Q::Item>>, Q::Error>
where
    K: Eq + Hash + Clone,
    Q: PageQuery,
    Q::Item: Record,
    B: Fn(&K) -> Q,
    F: Fn(&Q::Item) -> SortValue,
{
    let normalized = params.normalize();

    let fetches = stages.iter().map(|stage| {
        let mut stage_params = normalized.clone();
        stage_params.cursor = cursors.get(stage).cloned();

        let query = build_query(stage);
        let get_sort_value = &get_sort_value;

        async move {
            let page = paginate_normalized(query, &stage_params, get_sort_value).await?;

            Ok::<_, Q::Error>(((*stage).clone(), page))
        }
    });

    Ok(try_join_all(fetches).await?.into_iter().collect())
}
