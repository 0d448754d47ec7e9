//! Shaping helpers for values pulled out of API responses.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::constants::{COMPETITION_LOW_THRESHOLD, COMPETITION_MEDIUM_THRESHOLD};

const URL_KEYS: [&str; 4] = ["url", "link", "href", "domain"];

/// URLs from a SERP list. Objects contribute their first non-empty `url`,
/// `link`, `href` or `domain`; strings are taken as-is. Anything that is not
/// an array yields nothing.
#[must_use]
pub fn normalize_urls(value: Option<&Value>, limit: Option<usize>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    let urls = items.iter().filter_map(|item| match item {
        Value::Object(map) => URL_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(|v| v.as_str().filter(|s| !s.is_empty()))
            .map(str::to_owned),
        Value::String(url) => Some(url.clone()),
        _ => None,
    });
    match limit {
        Some(limit) => urls.take(limit).collect(),
        None => urls.collect(),
    }
}

/// Competition bucket for a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Competition {
    Low,
    Medium,
    High,
    Unknown,
    Other(String),
}

impl Competition {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unknown => "unknown",
            Self::Other(label) => label,
        }
    }
}

impl Serialize for Competition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn bucket(score: f64) -> Competition {
    if score <= COMPETITION_LOW_THRESHOLD {
        Competition::Low
    } else if score <= COMPETITION_MEDIUM_THRESHOLD {
        Competition::Medium
    } else {
        Competition::High
    }
}

/// Buckets a numeric score (≤0.33 low, ≤0.66 medium, else high). Booleans
/// count as 1 or 0. Strings pass through; missing or `null` is unknown.
#[must_use]
pub fn normalize_competition(value: Option<&Value>) -> Competition {
    match value {
        None | Some(Value::Null) => Competition::Unknown,
        Some(Value::Number(n)) => n.as_f64().map_or(Competition::Unknown, bucket),
        Some(Value::Bool(flag)) => bucket(if *flag { 1.0 } else { 0.0 }),
        Some(Value::String(label)) => Competition::Other(label.clone()),
        Some(other) => Competition::Other(other.to_string()),
    }
}

/// Renders a scalar for text output; `null` and missing become `fallback`.
#[must_use]
pub fn display_value(value: Option<&Value>, fallback: &str) -> String {
    match value {
        None | Some(Value::Null) => fallback.to_owned(),
        Some(Value::String(s)) if s.is_empty() => fallback.to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// First present field among `keys` of a list item.
#[must_use]
pub fn first_field<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|key| item.get(*key)).find(|v| !v.is_null())
}
