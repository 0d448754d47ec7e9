//! `{placeholder}` templates used in endpoint paths, query values and headers.

use regex::Regex;
use std::sync::LazyLock;

use crate::bindings::{Binding, Bindings};

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_-]+)\}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Placeholder(String),
}

/// A template string split into literal text and placeholder keys.
///
/// Braces that do not enclose a valid key (`{}`, `{a b}`, a lone `{`) are kept
/// as literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    raw: String,
    parts: Vec<Part>,
}

/// Result of rendering a template against a set of bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Text(String),
    /// An optional placeholder had no value; the caller drops the template's slot.
    Omitted { key: String },
}

impl Template {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut parts = Vec::new();
        let mut last = 0;
        for caps in PLACEHOLDER_REGEX.captures_iter(raw) {
            let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > last {
                parts.push(Part::Literal(raw[last..whole.start()].to_owned()));
            }
            parts.push(Part::Placeholder(key.as_str().to_owned()));
            last = whole.end();
        }
        if last < raw.len() {
            parts.push(Part::Literal(raw[last..].to_owned()));
        }
        Self { raw: raw.to_owned(), parts }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder keys in order of appearance, repeats included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            Part::Placeholder(key) => Some(key.as_str()),
            Part::Literal(_) => None,
        })
    }

    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.placeholders().next().is_none()
    }

    /// Substitutes every placeholder in a single pass; substituted text is not rescanned.
    ///
    /// # Errors
    /// Returns the first key that has no binding at all.
    pub fn render(&self, bindings: &Bindings) -> Result<Rendered, String> {
        let mut out = String::with_capacity(self.raw.len());
        let mut omitted: Option<&str> = None;
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Placeholder(key) => match bindings.lookup(key) {
                    Binding::Value(value) => out.push_str(value),
                    Binding::Absent => {
                        omitted.get_or_insert(key.as_str());
                    },
                    Binding::Unbound => return Err(key.clone()),
                },
            }
        }
        match omitted {
            Some(key) => Ok(Rendered::Omitted { key: key.to_owned() }),
            None => Ok(Rendered::Text(out)),
        }
    }
}
