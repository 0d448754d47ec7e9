//! Read-only process context shared by resolution and extraction.

use serde_json::Value;

use crate::bindings::Bindings;
use crate::config::EndpointTable;
use crate::constants::DEFAULT_BASE_URL;
use crate::endpoint::EndpointDefinition;
use crate::error::ResolutionError;
use crate::extractor::{ExtractedResult, extract};
use crate::resolver::{RequestDescriptor, resolve};

/// The endpoint table and base URL, fixed once at startup.
///
/// Holds no mutable state, so one instance can serve any number of
/// resolutions from any thread.
#[derive(Debug, Clone)]
pub struct ApiContext {
    endpoints: EndpointTable,
    base_url: String,
}

impl ApiContext {
    /// Builds a context. `base_url_override` (usually `PAGERANGERS_BASE_URL`)
    /// wins over the table's `base_url`, which wins over [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn new(endpoints: EndpointTable, base_url_override: Option<String>) -> Self {
        let base_url = base_url_override
            .filter(|url| !url.trim().is_empty())
            .or_else(|| endpoints.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self { endpoints, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// # Errors
    /// Returns [`ResolutionError::UnknownEndpoint`] if no endpoint has that name.
    pub fn endpoint(&self, name: &str) -> Result<&EndpointDefinition, ResolutionError> {
        self.endpoints.get(name).ok_or_else(|| ResolutionError::UnknownEndpoint(name.to_owned()))
    }

    /// Resolves endpoint `name`. The table's `constants` fill in any key the
    /// caller did not bind.
    ///
    /// # Errors
    /// Returns [`ResolutionError`] for an unknown endpoint or a missing binding.
    pub fn resolve(&self, name: &str, bindings: &Bindings) -> Result<RequestDescriptor, ResolutionError> {
        let definition = self.endpoint(name)?;
        let request = if self.endpoints.constants.is_empty() {
            resolve(definition, bindings, &self.base_url)?
        } else {
            let mut merged = bindings.clone();
            merged.fill_defaults(&self.endpoints.constants);
            resolve(definition, &merged, &self.base_url)?
        };
        tracing::debug!(endpoint = name, method = %request.method, "resolved request");
        Ok(request)
    }

    /// Extracts the response fields configured for endpoint `name`.
    ///
    /// # Errors
    /// Returns [`ResolutionError::UnknownEndpoint`] if no endpoint has that
    /// name. Unresolvable paths are never errors.
    pub fn extract(&self, payload: &Value, name: &str) -> Result<ExtractedResult, ResolutionError> {
        Ok(extract(payload, &self.endpoint(name)?.response))
    }
}
