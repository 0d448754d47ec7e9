//! Dot/bracket path expressions over JSON payloads.
//!
//! A path is a list of `.`-separated segments. Each segment is a key, a key
//! followed by one or more `[n]` indices, or indices alone:
//!
//! - `keyword`
//! - `data.keyword`
//! - `serp[0].url`
//! - `matrix[1][0]`
//! - `[2].name` (index into a top-level array)
//!
//! Empty segments are skipped and the empty path selects the whole payload.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::PathError;

static SEGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\[\]]*)((?:\[[^\[\]]*\])*)$").unwrap());

static INDEX_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    key: Option<String>,
    indices: Vec<usize>,
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    raw: String,
    segments: Vec<Segment>,
}

impl PathExpr {
    /// Parses `raw` into segments.
    ///
    /// # Errors
    /// Returns an error for unbalanced brackets or non-numeric indices.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let mut segments = Vec::new();
        for part in raw.split('.').filter(|p| !p.is_empty()) {
            let caps = SEGMENT_REGEX.captures(part).ok_or_else(|| PathError::InvalidSegment {
                path: raw.to_owned(),
                segment: part.to_owned(),
            })?;
            let key = caps.get(1).map(|m| m.as_str()).filter(|k| !k.is_empty()).map(str::to_owned);
            let mut indices = Vec::new();
            if let Some(brackets) = caps.get(2) {
                for index in INDEX_REGEX.captures_iter(brackets.as_str()) {
                    let text = index.get(1).map_or("", |m| m.as_str());
                    let parsed = parse_index(text).ok_or_else(|| PathError::InvalidIndex {
                        path: raw.to_owned(),
                        index: text.to_owned(),
                    })?;
                    indices.push(parsed);
                }
            }
            segments.push(Segment { key, indices });
        }
        Ok(Self { raw: raw.to_owned(), segments })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Selects the whole payload.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walks `payload` and borrows the terminal value.
    ///
    /// Returns `None` when a key is absent, an index is out of range, or the
    /// current value has the wrong shape for the next step.
    #[must_use]
    pub fn lookup<'a>(&self, payload: &'a Value) -> Option<&'a Value> {
        let mut current = payload;
        for segment in &self.segments {
            if let Some(key) = &segment.key {
                current = current.as_object()?.get(key)?;
            }
            for &index in &segment.indices {
                current = current.as_array()?.get(index)?;
            }
        }
        Some(current)
    }
}

/// Digits only. Values past `usize::MAX` saturate, so they stay valid and
/// simply never resolve.
fn parse_index(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(text.parse::<usize>().unwrap_or(usize::MAX))
}

impl FromStr for PathExpr {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
