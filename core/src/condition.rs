//! Boundary predicates derived from a decoded cursor.

use turnstile_common::{
    cursor::{CursorData, SortValue},
    params::{Direction, SortOrder},
};

/// Strict comparison applied to the sort column at the page boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Lt,
    Gt,
}

/// The boundary comparator depends on the combination of sort order and
/// traversal direction, not on either alone.
pub fn boundary_comparator(order: SortOrder, direction: Direction) -> Comparator {
    match (order, direction) {
        (SortOrder::Desc, Direction::Next) | (SortOrder::Asc, Direction::Prev) => Comparator::Lt,
        (SortOrder::Desc, Direction::Prev) | (SortOrder::Asc, Direction::Next) => Comparator::Gt,
    }
}

/// The boundary predicate for one page fetch:
///
/// `(sort OP value) OR (sort == value AND id OP cursor.id)`
///
/// The second disjunct breaks ties between rows sharing a sort value using
/// the unique id, so no two rows ever compare as equal and the traversal
/// order is total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorBound {
    pub sort_by: String,
    pub comparator: Comparator,
    pub sort_value: SortValue,
    pub id: u64,
}

impl CursorBound {
    /// Derive the bound for a decoded cursor and a traversal direction.
    pub fn for_cursor(cursor: &CursorData, direction: Direction) -> Self {
        Self {
            sort_by: cursor.sort_by.clone(),
            comparator: boundary_comparator(cursor.sort_order, direction),
            sort_value: cursor.sort_value.clone(),
            id: cursor.id,
        }
    }

    /// Whether a row with this sort value and id lies past the boundary.
    ///
    /// Reference semantics for query implementations: a store-backed handle
    /// must translate the bound into an equivalent predicate.
    pub fn admits(&self, sort_value: &SortValue, id: u64) -> bool {
        let strict = match self.comparator {
            Comparator::Lt => sort_value < &self.sort_value,
            Comparator::Gt => sort_value > &self.sort_value,
        };

        let tie = sort_value == &self.sort_value
            && match self.comparator {
                Comparator::Lt => id < self.id,
                Comparator::Gt => id > self.id,
            };

        strict || tie
    }
}
