//! HTTP transport for resolved PageRangers requests.
//!
//! Sends a [`pagerangers_core::RequestDescriptor`], returns the JSON payload
//! and classifies failures into [`ErrorCategory`] values for the CLI.

pub mod client;
pub mod error;

pub use client::{ApiClient, Transport, USER_AGENT};
pub use error::{ErrorCategory, GUIDANCE, TransportError};
