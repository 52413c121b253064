//! Input parameters for paginated list operations.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Hard ceiling on the number of rows a single page may request.
pub const MAX_LIMIT: u64 = 100;

/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: u64 = 20;

/// Sort field used when the caller does not supply one, or supplies one
/// outside the collection's allow-list.
pub const DEFAULT_SORT_FIELD: &str = "created_at";

/// Traversal direction relative to the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Next,
    Prev,
}

/// Order applied to the sort column and to the id tie-break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// The opposite order. Backward traversal fetches under the reversed
    /// order and restores forward reading order in memory afterwards.
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Parameters for paginating through a list of records. This is used by the
/// various list endpoints to allow clients to page through large sets of
/// records without the drift problems of offset paging.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
pub struct PaginationParams {
    /// The maximum number of results to return. Clamped to [1, 100];
    /// defaults to 20.
    pub limit: Option<u64>,

    /// A cursor token from a previous page's `next_cursor` or `prev_cursor`
    /// field, if any. An undecodable token is treated as absent.
    pub cursor: Option<String>,

    /// Which side of the cursor to fetch. Defaults to `next`.
    pub direction: Option<Direction>,

    /// The field to sort by. Defaults to `created_at`.
    pub sort_by: Option<String>,

    /// The order to sort in. Defaults to `desc`.
    pub sort_order: Option<SortOrder>,
}

/// Pagination parameters after defaulting and clamping. Every field is
/// concrete; the engine only ever works with this form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedParams {
    pub limit: u64,
    pub cursor: Option<String>,
    pub direction: Direction,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl PaginationParams {
    /// Apply defaults and bounds. Out-of-range values are clamped or
    /// defaulted, never rejected.
    pub fn normalize(&self) -> NormalizedParams {
        self.normalize_with_allowed(&[])
    }

    /// Like [`normalize`](Self::normalize), but a `sort_by` outside
    /// `allowed` is silently replaced with the default field. An empty
    /// allow-list permits any field.
    pub fn normalize_with_allowed(&self, allowed: &[&str]) -> NormalizedParams {
        let limit = match self.limit {
            Some(requested) => {
                let clamped = requested.clamp(1, MAX_LIMIT);
                if clamped != requested {
                    tracing::debug!(requested, clamped, "clamped out-of-range page limit");
                }
                clamped
            }
            None => DEFAULT_LIMIT,
        };

        let sort_by = match self.sort_by.as_deref() {
            Some(field) if allowed.is_empty() || allowed.contains(&field) => field.to_string(),
            Some(field) => {
                tracing::debug!(field, "sort field not in allow-list, using default");
                DEFAULT_SORT_FIELD.to_string()
            }
            None => DEFAULT_SORT_FIELD.to_string(),
        };

        NormalizedParams {
            limit,
            cursor: self.cursor.clone().filter(|cursor| !cursor.is_empty()),
            direction: self.direction.unwrap_or_default(),
            sort_by,
            sort_order: self.sort_order.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_applies_defaults() {
        let normalized = PaginationParams::default().normalize();

        assert_eq!(normalized.limit, DEFAULT_LIMIT);
        assert_eq!(normalized.cursor, None);
        assert_eq!(normalized.direction, Direction::Next);
        assert_eq!(normalized.sort_by, DEFAULT_SORT_FIELD);
        assert_eq!(normalized.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_normalize_clamps_limit() {
        let low = PaginationParams {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(low.normalize().limit, 1);

        let high = PaginationParams {
            limit: Some(1000),
            ..Default::default()
        };
        assert_eq!(high.normalize().limit, MAX_LIMIT);

        let in_range = PaginationParams {
            limit: Some(55),
            ..Default::default()
        };
        assert_eq!(in_range.normalize().limit, 55);
    }

    #[test]
    fn test_normalize_drops_empty_cursor() {
        let params = PaginationParams {
            cursor: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(params.normalize().cursor, None);
    }

    #[test]
    fn test_normalize_with_allowed_replaces_unknown_sort_field() {
        let params = PaginationParams {
            sort_by: Some("password_hash".to_string()),
            ..Default::default()
        };

        let normalized = params.normalize_with_allowed(&["created_at", "amount"]);
        assert_eq!(normalized.sort_by, DEFAULT_SORT_FIELD);
    }

    #[test]
    fn test_normalize_with_allowed_keeps_listed_sort_field() {
        let params = PaginationParams {
            sort_by: Some("amount".to_string()),
            ..Default::default()
        };

        let normalized = params.normalize_with_allowed(&["created_at", "amount"]);
        assert_eq!(normalized.sort_by, "amount");
    }

    #[test]
    fn test_normalize_empty_allow_list_permits_any_field() {
        let params = PaginationParams {
            sort_by: Some("updated_at".to_string()),
            ..Default::default()
        };

        assert_eq!(params.normalize().sort_by, "updated_at");
    }

    #[test]
    fn test_sort_order_reversed() {
        assert_eq!(SortOrder::Asc.reversed(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.reversed(), SortOrder::Asc);
    }
}
