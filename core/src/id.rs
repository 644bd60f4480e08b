//! Post identifier validation.
//!
//! # Design
//! Identifiers end up interpolated into a URL path segment, so this module is
//! the only place a caller-supplied value can influence the request path.
//! Validation runs two ordered guards over the same input:
//!
//! 1. a lenient base-10 parse that must yield a positive integer, and
//! 2. a scan of the raw textual form for `..`, `/` and `\`.
//!
//! The second guard runs even when the first one succeeds, because text such
//! as `"1/../2"` parses to a leading `1` while still carrying a traversal
//! payload. The first failing guard decides the reported reason.

use std::fmt;
use std::str::FromStr;

use crate::error::{InvalidIdError, InvalidIdReason};

/// Substrings that must never reach a path segment.
const TRAVERSAL_PATTERNS: [&str; 3] = ["..", "/", "\\"];

/// A caller-supplied identifier before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawId {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Any other value, carried as its textual form (e.g. `true`, `null`).
    Other(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Integer(n) => write!(f, "{n}"),
            RawId::Float(n) => write!(f, "{n}"),
            RawId::Text(s) | RawId::Other(s) => f.write_str(s),
        }
    }
}

macro_rules! raw_id_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for RawId {
            fn from(n: $t) -> Self {
                RawId::Integer(i64::from(n))
            }
        })*
    };
}

raw_id_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for RawId {
    fn from(n: u64) -> Self {
        i64::try_from(n)
            .map(RawId::Integer)
            .unwrap_or_else(|_| RawId::Text(n.to_string()))
    }
}

impl From<f64> for RawId {
    fn from(n: f64) -> Self {
        RawId::Float(n)
    }
}

impl From<&str> for RawId {
    fn from(s: &str) -> Self {
        RawId::Text(s.to_string())
    }
}

impl From<String> for RawId {
    fn from(s: String) -> Self {
        RawId::Text(s)
    }
}

impl From<&String> for RawId {
    fn from(s: &String) -> Self {
        RawId::Text(s.clone())
    }
}

impl From<PostId> for RawId {
    fn from(id: PostId) -> Self {
        RawId::from(id.get())
    }
}

impl From<serde_json::Value> for RawId {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawId::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    RawId::from(u)
                } else {
                    RawId::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => RawId::Text(s),
            other => RawId::Other(other.to_string()),
        }
    }
}

/// A validated post identifier: a positive integer that is safe to place in a
/// path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(u64);

impl PostId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<RawId> for PostId {
    type Error = InvalidIdError;

    fn try_from(raw: RawId) -> Result<Self, Self::Error> {
        validate(raw)
    }
}

impl FromStr for PostId {
    type Err = InvalidIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

/// Turn an arbitrary identifier into a [`PostId`], or reject it.
pub fn validate(raw: impl Into<RawId>) -> Result<PostId, InvalidIdError> {
    let raw = raw.into();
    let received = raw.to_string();

    let Some(value) = positive_integer(&raw) else {
        return Err(InvalidIdError::new(
            InvalidIdReason::NotAPositiveInteger,
            received,
        ));
    };

    if TRAVERSAL_PATTERNS.iter().any(|p| received.contains(p)) {
        return Err(InvalidIdError::new(InvalidIdReason::PathTraversal, received));
    }

    Ok(PostId(value))
}

fn positive_integer(raw: &RawId) -> Option<u64> {
    match raw {
        RawId::Integer(n) => u64::try_from(*n).ok().filter(|n| *n > 0),
        RawId::Float(n) => {
            // 2^64 is exactly representable; anything at or above it overflows.
            if n.is_finite()
                && n.fract() == 0.0
                && *n >= 1.0
                && *n < 18_446_744_073_709_551_616.0
            {
                Some(*n as u64)
            } else {
                None
            }
        }
        RawId::Text(s) => parse_leading_integer(s),
        RawId::Other(_) => None,
    }
}

/// Lenient base-10 parse: leading whitespace and one sign are accepted, the
/// longest run of ASCII digits is consumed and everything after it ignored.
fn parse_leading_integer(text: &str) -> Option<u64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    let value: u64 = digits.parse().ok()?;
    if negative || value == 0 {
        return None;
    }
    Some(value)
}
