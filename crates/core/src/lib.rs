//! Core engine for the PageRangers skill.
//!
//! Loads the declarative endpoint table, resolves endpoint templates into
//! concrete requests and extracts named fields from JSON responses. Nothing
//! here performs I/O beyond reading config and credential files.

mod bindings;
mod config;
mod context;
mod endpoint;
mod env_config;
mod error;
mod extractor;
mod normalize;
mod path;
mod prompt_filter;
mod resolver;
mod settings;
mod template;

pub mod constants;

pub use bindings::*;
pub use config::*;
pub use context::*;
pub use endpoint::*;
pub use env_config::*;
pub use error::*;
pub use extractor::*;
pub use normalize::*;
pub use path::*;
pub use prompt_filter::*;
pub use resolver::*;
pub use settings::*;
pub use template::*;
