//! Endpoint table loading.
//!
//! The table is a JSON document keyed by endpoint name. It is parsed once at
//! startup and treated as read-only afterwards.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

use crate::endpoint::{EndpointDefinition, ResponseMap};
use crate::error::ConfigError;
use crate::template::Template;

/// Endpoint table shipped with the crate, used when no config path is given.
pub const BUILTIN_ENDPOINTS: &str = include_str!("../config/pagerangers-api.json");

/// Map entries in document order, duplicates preserved so the loader can
/// report them instead of letting the last one win.
struct Entries<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of endpoint definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    constants: IndexMap<String, String>,
    endpoints: Entries<RawEndpoint>,
}

#[derive(Deserialize)]
struct RawEndpoint {
    method: Option<String>,
    path: Option<String>,
    query: Option<IndexMap<String, String>>,
    #[serde(default)]
    response: IndexMap<String, String>,
    #[serde(default)]
    headers: IndexMap<String, String>,
    #[serde(default)]
    body: Option<Value>,
}

impl RawEndpoint {
    fn into_definition(self, name: String) -> Result<EndpointDefinition, ConfigError> {
        let missing = |field: &'static str| ConfigError::MissingField { endpoint: name.clone(), field };
        let method = self.method.ok_or_else(|| missing("method"))?;
        let path = self.path.ok_or_else(|| missing("path"))?;
        let query = self.query.ok_or_else(|| missing("query"))?;

        let method = method.trim().to_ascii_uppercase();
        if method.is_empty() || !method.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidMethod { endpoint: name, method });
        }

        let response = ResponseMap::parse_pairs(&self.response).map_err(|(field, source)| {
            ConfigError::InvalidPath { endpoint: name.clone(), field, source }
        })?;

        Ok(EndpointDefinition {
            method,
            path: Template::parse(&path),
            query: templates(&query),
            headers: templates(&self.headers),
            body: self.body,
            response,
            name,
        })
    }
}

fn templates(raw: &IndexMap<String, String>) -> IndexMap<String, Template> {
    raw.iter().map(|(k, v)| (k.clone(), Template::parse(v))).collect()
}

/// The loaded endpoint table plus document-level settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointTable {
    pub base_url: Option<String>,
    pub constants: IndexMap<String, String>,
    endpoints: IndexMap<String, EndpointDefinition>,
}

impl EndpointTable {
    /// Parses a JSON endpoint document.
    ///
    /// # Errors
    /// Returns [`ConfigError`] for malformed JSON, missing `method`/`path`/`query`,
    /// duplicate endpoint names, invalid methods or malformed response paths.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let raw: RawDocument = serde_json::from_str(document)?;
        let mut table = Self { base_url: raw.base_url, constants: raw.constants, ..Self::default() };
        for (name, endpoint) in raw.endpoints.0 {
            if table.endpoints.contains_key(&name) {
                return Err(ConfigError::DuplicateEndpoint(name));
            }
            let definition = endpoint.into_definition(name.clone())?;
            table.endpoints.insert(name, definition);
        }
        tracing::debug!(endpoints = table.endpoints.len(), "loaded endpoint table");
        Ok(table)
    }

    /// Reads and parses an endpoint document from disk.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`EndpointTable::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let document = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&document)
    }

    /// The table compiled into the crate.
    ///
    /// # Errors
    /// Only if the bundled document is itself invalid.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json_str(BUILTIN_ENDPOINTS)
    }

    /// Builds a table from definitions, rejecting duplicate names.
    ///
    /// # Errors
    /// Returns [`ConfigError::DuplicateEndpoint`] on the first repeated name.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = EndpointDefinition>,
    {
        let mut table = Self::default();
        for definition in definitions {
            if table.endpoints.contains_key(&definition.name) {
                return Err(ConfigError::DuplicateEndpoint(definition.name));
            }
            table.endpoints.insert(definition.name.clone(), definition);
        }
        Ok(table)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EndpointDefinition> {
        self.endpoints.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
