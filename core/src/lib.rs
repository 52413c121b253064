//! Cursor-based pagination engine.
//!
//! Paginates large, concurrently-mutated collections without the drift
//! problems of offset paging: the page boundary is anchored to a specific
//! (sort value, id) pair, so rows inserted or deleted elsewhere in the
//! collection can never shift, duplicate, or skip rows already seen.
//!
//! The engine consumes an already-filtered query handle (see
//! [`query::PageQuery`]) and only adds the boundary condition, the
//! two-column ordering, and the limit. It is request-scoped, stateless, and
//! read-only; the client is the sole owner of cursor tokens between calls.

pub mod condition;
pub mod memory;
pub mod paginate;
pub mod query;
pub mod stage;

pub use paginate::{paginate, paginate_normalized, paginate_with_total};
pub use stage::paginate_by_stage;
