use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the endpoint table. Always fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read endpoint config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed endpoint config: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Endpoint '{endpoint}' is missing required field '{field}'")]
    MissingField { endpoint: String, field: &'static str },

    #[error("Duplicate endpoint name: {0}")]
    DuplicateEndpoint(String),

    #[error("Endpoint '{endpoint}' has invalid HTTP method '{method}'")]
    InvalidMethod { endpoint: String, method: String },

    #[error("Endpoint '{endpoint}' field '{field}': {source}")]
    InvalidPath {
        endpoint: String,
        field: String,
        #[source]
        source: PathError,
    },
}

/// Errors raised while building a request for a single command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Endpoint '{endpoint}': no value bound for placeholder '{{{key}}}' in {location}")]
    UnboundPlaceholder {
        endpoint: String,
        location: String,
        key: String,
    },

    #[error("Endpoint '{endpoint}': optional placeholder '{{{key}}}' has no value but is part of the path")]
    OptionalInPath { endpoint: String, key: String },
}

/// Syntax errors in a response path expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid path segment '{segment}' in '{path}'")]
    InvalidSegment { path: String, segment: String },

    #[error("index '{index}' in '{path}' is not a non-negative integer")]
    InvalidIndex { path: String, index: String },
}

/// Errors raised while assembling runtime settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Missing credentials: {}", missing.join(", "))]
    MissingCredentials { missing: Vec<&'static str> },

    #[error("Cannot read credentials file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
