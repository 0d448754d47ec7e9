//! Declarative endpoint definitions.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::PathError;
use crate::path::PathExpr;
use crate::template::Template;

/// Output-field name to path expression, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMap {
    fields: IndexMap<String, PathExpr>,
}

impl ResponseMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `(field, path)` pairs, keeping their order.
    ///
    /// # Errors
    /// Returns the field name together with the path syntax error.
    pub fn parse_pairs<I, K, P>(pairs: I) -> Result<Self, (String, PathError)>
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: AsRef<str>,
    {
        let mut map = Self::new();
        for (field, raw) in pairs {
            let field = field.into();
            match PathExpr::parse(raw.as_ref()) {
                Ok(path) => map.insert(field, path),
                Err(e) => return Err((field, e)),
            }
        }
        Ok(map)
    }

    pub fn insert(&mut self, field: impl Into<String>, path: PathExpr) {
        self.fields.insert(field.into(), path);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&PathExpr> {
        self.fields.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathExpr)> {
        self.fields.iter().map(|(field, path)| (field.as_str(), path))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One named remote operation: method, templated path/query/headers/body and
/// the response fields to extract.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDefinition {
    pub name: String,
    pub method: String,
    pub path: Template,
    pub query: IndexMap<String, Template>,
    pub headers: IndexMap<String, Template>,
    pub body: Option<Value>,
    pub response: ResponseMap,
}

impl EndpointDefinition {
    /// Builds a `GET` definition with an empty query and response map.
    #[must_use]
    pub fn get(name: impl Into<String>, path: &str) -> Self {
        Self {
            name: name.into(),
            method: "GET".to_owned(),
            path: Template::parse(path),
            query: IndexMap::new(),
            headers: IndexMap::new(),
            body: None,
            response: ResponseMap::new(),
        }
    }

    #[must_use]
    pub fn with_query(mut self, param: impl Into<String>, template: &str) -> Self {
        self.query.insert(param.into(), Template::parse(template));
        self
    }

    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>, template: &str) -> Self {
        self.headers.insert(header.into(), Template::parse(template));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_response(mut self, response: ResponseMap) -> Self {
        self.response = response;
        self
    }

    /// Every placeholder key referenced anywhere in the definition, deduplicated.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        let templates = std::iter::once(&self.path)
            .chain(self.query.values())
            .chain(self.headers.values());
        for key in templates.flat_map(|template| template.placeholders()) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}
