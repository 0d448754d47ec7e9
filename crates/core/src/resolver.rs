//! Turns an endpoint definition plus bindings into a concrete request.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::bindings::Bindings;
use crate::endpoint::EndpointDefinition;
use crate::error::ResolutionError;
use crate::template::{Rendered, Template};

/// A fully substituted request, consumed once by the transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    pub endpoint: String,
    pub method: String,
    pub url: String,
    pub query: IndexMap<String, String>,
    pub headers: IndexMap<String, String>,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// The URL with its query string, for logging. Every occurrence of
    /// `secret`, in the path or the query, is replaced by `***`.
    #[must_use]
    pub fn redacted_url(&self, secret: Option<&str>) -> String {
        let mut url = self.url.clone();
        for (i, (key, value)) in self.query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }
        match secret {
            Some(secret) if !secret.is_empty() => url.replace(secret, "***"),
            _ => url,
        }
    }
}

/// Joins `base` and `path` with exactly one slash between them.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Resolves `definition` against `bindings`.
///
/// Query parameters and headers whose template uses an optional binding
/// without a value are left out. Binding values are inserted verbatim;
/// encoding is the transport's job.
///
/// # Errors
/// - [`ResolutionError::UnboundPlaceholder`] when a placeholder has no binding.
/// - [`ResolutionError::OptionalInPath`] when the path uses an absent optional binding.
pub fn resolve(
    definition: &EndpointDefinition,
    bindings: &Bindings,
    base_url: &str,
) -> Result<RequestDescriptor, ResolutionError> {
    let name = &definition.name;
    let unbound = |location: String, key: String| ResolutionError::UnboundPlaceholder {
        endpoint: name.clone(),
        location,
        key,
    };

    let path = match definition.path.render(bindings) {
        Ok(Rendered::Text(path)) => path,
        Ok(Rendered::Omitted { key }) => {
            return Err(ResolutionError::OptionalInPath { endpoint: name.clone(), key });
        },
        Err(key) => return Err(unbound("path".to_owned(), key)),
    };

    let query = render_section(&definition.query, bindings, "query parameter", &unbound)?;
    let headers = render_section(&definition.headers, bindings, "header", &unbound)?;

    let body = match &definition.body {
        Some(body) => Some(render_body(body, bindings).map_err(|key| unbound("body".to_owned(), key))?),
        None => None,
    };

    Ok(RequestDescriptor {
        endpoint: name.clone(),
        method: definition.method.clone(),
        url: join_url(base_url, &path),
        query,
        headers,
        body,
    })
}

fn render_section<F>(
    templates: &IndexMap<String, Template>,
    bindings: &Bindings,
    kind: &str,
    unbound: &F,
) -> Result<IndexMap<String, String>, ResolutionError>
where
    F: Fn(String, String) -> ResolutionError,
{
    let mut out = IndexMap::with_capacity(templates.len());
    for (name, template) in templates {
        match template.render(bindings) {
            Ok(Rendered::Text(value)) => {
                out.insert(name.clone(), value);
            },
            Ok(Rendered::Omitted { key }) => {
                tracing::trace!(%name, %key, "omitting {kind} with absent optional binding");
            },
            Err(key) => return Err(unbound(format!("{kind} '{name}'"), key)),
        }
    }
    Ok(out)
}

/// Renders every string leaf of a JSON body. Object members whose value is an
/// absent optional placeholder are dropped; absent entries in arrays become `null`.
fn render_body(value: &Value, bindings: &Bindings) -> Result<Value, String> {
    Ok(match value {
        Value::String(raw) => match Template::parse(raw).render(bindings)? {
            Rendered::Text(text) => Value::String(text),
            Rendered::Omitted { .. } => Value::Null,
        },
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| render_body(item, bindings)).collect::<Result<_, _>>()?)
        },
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, item) in map {
                if let Value::String(raw) = item {
                    if let Rendered::Omitted { .. } = Template::parse(raw).render(bindings)? {
                        continue;
                    }
                }
                out.insert(key.clone(), render_body(item, bindings)?);
            }
            Value::Object(out)
        },
        other => other.clone(),
    })
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
