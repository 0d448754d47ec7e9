//! Shared constants for the PageRangers skill.

/// Base URL used when neither the environment nor the endpoint table sets one.
pub const DEFAULT_BASE_URL: &str = "https://api.pagerangers.com";

/// Request timeout in seconds when `PAGERANGERS_TIMEOUT` is unset or invalid.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Number of SERP URLs shown by the `keyword` command by default.
pub const DEFAULT_TOP_URLS: usize = 5;

/// Default result count for list commands.
pub const DEFAULT_LIMIT: usize = 20;

/// Related keywords shown in text output.
pub const MAX_RELATED_KEYWORDS: usize = 10;

/// Competition scores at or below this are "low".
pub const COMPETITION_LOW_THRESHOLD: f64 = 0.33;

/// Competition scores at or below this (and above low) are "medium".
pub const COMPETITION_MEDIUM_THRESHOLD: f64 = 0.66;

/// Credentials file name, relative to the home directory.
pub const CREDENTIALS_FILE: &str = ".env.pagerangers";

pub const ENV_API_TOKEN: &str = "PAGERANGERS_API_TOKEN";
pub const ENV_PROJECT_HASH: &str = "PAGERANGERS_PROJECT_HASH";
pub const ENV_BASE_URL: &str = "PAGERANGERS_BASE_URL";
pub const ENV_TIMEOUT: &str = "PAGERANGERS_TIMEOUT";
pub const ENV_CONFIG: &str = "PAGERANGERS_CONFIG";

/// Variables that must be present for any API call.
pub const REQUIRED_VARS: [&str; 2] = [ENV_API_TOKEN, ENV_PROJECT_HASH];

/// Binding keys under which credentials are exposed to endpoint templates.
pub const BINDING_API_TOKEN: &str = "api_token";
pub const BINDING_PROJECT_HASH: &str = "project_hash";
