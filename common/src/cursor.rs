//! Opaque cursor tokens.
//!
//! A cursor pins the boundary row of a previously returned page: the row's
//! value for the active sort column, its unique id as the tie-break, and the
//! sort configuration that minted it. Carrying the configuration means a
//! token can never be silently reinterpreted under a different sort.
//!
//! Tokens are URL-safe unpadded base64 over a compact JSON object with four
//! short keys (`v`, `i`, `f`, `o`), so they stay short enough for query
//! strings and cookies. They are opaque to clients but not signed or
//! encrypted: a token is a convenience encoding, not a security boundary.

use std::cmp::Ordering;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::SortOrder;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorDecodeError {
    #[error("cursor token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("cursor payload is not a valid cursor object: {0}")]
    Payload(String),
}

/// A sort-column value as carried in a cursor.
///
/// The wire form is always a comparable scalar (JSON string or number); the
/// typed form is fixed once at decode time so comparisons never fall back to
/// runtime type sniffing. ISO-date-shaped strings become timestamps, since
/// lexical and temporal ordering can disagree across formats.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortValue {
    Number(f64),
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl SortValue {
    /// Classify a raw string: ISO-date-shaped input becomes a timestamp,
    /// anything else stays text.
    pub fn from_text(raw: &str) -> Self {
        match parse_temporal(raw) {
            Some(timestamp) => Self::Timestamp(timestamp),
            None => Self::Text(raw.to_string()),
        }
    }

    fn coerced(self) -> Self {
        match self {
            Self::Text(raw) => Self::from_text(&raw),
            other => other,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Timestamp(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // Mixed types in one collection would mean the caller changed
            // the column's representation mid-traversal; keep the order
            // total anyway.
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortValue {}

fn parse_temporal(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    None
}

/// The decoded payload of a cursor token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorData {
    /// The boundary row's value for the sort column.
    pub sort_value: SortValue,

    /// The boundary row's unique id, the deterministic tie-break.
    pub id: u64,

    /// The sort field active when the cursor was minted.
    pub sort_by: String,

    /// The sort order active when the cursor was minted.
    pub sort_order: SortOrder,
}

/// On-the-wire shape of a cursor payload. Keys are short to keep tokens
/// URL-sized; this layout is a compatibility contract for existing
/// bookmarked cursors and must not change.
#[derive(Debug, Serialize, Deserialize)]
struct WireCursor {
    v: SortValue,
    i: u64,
    f: String,
    o: SortOrder,
}

impl CursorData {
    /// Encode this payload as an opaque, URL-safe token. Deterministic:
    /// equal payloads always produce equal tokens.
    pub fn encode(&self) -> String {
        let wire = WireCursor {
            v: self.sort_value.clone(),
            i: self.id,
            f: self.sort_by.clone(),
            o: self.sort_order,
        };

        // A fixed shape of scalars and strings cannot fail to serialize.
        let body = serde_json::to_vec(&wire).unwrap_or_default();

        URL_SAFE_NO_PAD.encode(body)
    }

    /// Decode a token. Any malformed input is an error; the paginator uses
    /// the fail-soft [`decode_opt`](Self::decode_opt) form instead.
    pub fn decode(token: &str) -> Result<Self, CursorDecodeError> {
        let body = URL_SAFE_NO_PAD.decode(token.trim())?;

        let wire: WireCursor = serde_json::from_slice(&body)
            .map_err(|err| CursorDecodeError::Payload(err.to_string()))?;

        Ok(Self {
            sort_value: wire.v.coerced(),
            id: wire.i,
            sort_by: wire.f,
            sort_order: wire.o,
        })
    }

    /// Fail-soft decode: a corrupted or tampered token degrades to "no
    /// cursor", so the caller falls back to the first page instead of
    /// surfacing an error.
    pub fn decode_opt(token: &str) -> Option<Self> {
        match Self::decode(token) {
            Ok(data) => Some(data),
            Err(err) => {
                tracing::debug!(%err, "undecodable cursor token, treating as first page");
                None
            }
        }
    }
}
