//! An in-memory query handle.
//!
//! Implements [`PageQuery`] over a plain vector with the same contract a
//! store-backed handle must honor: the boundary condition uses
//! [`CursorBound::admits`], ordering is by sort column then id, and the
//! limit truncates. Used by the engine's own tests and by downstream crates
//! to test pagination without a database.

use async_trait::async_trait;
use thiserror::Error;
use turnstile_common::{cursor::SortValue, params::SortOrder};

use crate::{
    condition::CursorBound,
    query::{PageQuery, Record},
};

/// Error surfaced by [`MemQuery`]. Only produced when a failure is injected
/// with [`MemQuery::failing`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("in-memory query failed: {0}")]
pub struct MemError(pub String);

/// In-memory [`PageQuery`] over a vector of rows.
///
/// `sort_value` resolves a sort field name to a row's value, standing in
/// for the column resolution a real data layer performs.
#[derive(Debug, Clone)]
pub struct MemQuery<T> {
    rows: Vec<T>,
    sort_value: fn(&T, &str) -> SortValue,
    bound: Option<CursorBound>,
    order: Option<(String, SortOrder)>,
    limit: Option<u64>,
    fail: Option<String>,
}

impl<T: Record> MemQuery<T> {
    pub fn new(rows: Vec<T>, sort_value: fn(&T, &str) -> SortValue) -> Self {
        Self {
            rows,
            sort_value,
            bound: None,
            order: None,
            limit: None,
            fail: None,
        }
    }

    /// A handle whose fetch and count fail with the given reason, for
    /// exercising error propagation.
    pub fn failing(reason: &str) -> Self {
        Self {
            rows: vec![],
            sort_value: |_, _| SortValue::Number(0.0),
            bound: None,
            order: None,
            limit: None,
            fail: Some(reason.to_string()),
        }
    }

    fn materialize(self) -> Result<Vec<T>, MemError> {
        if let Some(reason) = self.fail {
            return Err(MemError(reason));
        }

        let sort_value = self.sort_value;
        let mut rows = self.rows;

        if let Some(bound) = &self.bound {
            rows.retain(|row| bound.admits(&sort_value(row, &bound.sort_by), row.record_id()));
        }

        if let Some((field, order)) = &self.order {
            rows.sort_by(|a, b| {
                let forward = sort_value(a, field)
                    .cmp(&sort_value(b, field))
                    .then_with(|| a.record_id().cmp(&b.record_id()));

                match order {
                    SortOrder::Asc => forward,
                    SortOrder::Desc => forward.reverse(),
                }
            });
        }

        if let Some(limit) = self.limit {
            rows.truncate(limit as usize);
        }

        Ok(rows)
    }
}

#[async_trait]
impl<T> PageQuery for MemQuery<T>
where
    T: Record + Send,
{
    type Item = T;
    type Error = MemError;

    fn with_condition(mut self, bound: CursorBound) -> Self {
        self.bound = Some(bound);
        self
    }

    fn order_by(mut self, sort_by: &str, order: SortOrder) -> Self {
        self.order = Some((sort_by.to_string(), order));
        self
    }

    fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    async fn fetch(self) -> Result<Vec<T>, MemError> {
        self.materialize()
    }

    async fn total(mut self) -> Result<u64, MemError> {
        self.limit = None;
        Ok(self.materialize()?.len() as u64)
    }
}
