//! Shared request and response types for the Turnstile pagination engine.
//!
//! This crate owns everything that crosses the wire: the caller-supplied
//! pagination parameters, the opaque cursor token format, and the paginated
//! response views. The engine itself lives in `turnstile-core`.

pub mod cursor;
pub mod params;
pub mod views;
