//! Runtime settings and credentials.

use std::fmt;
use std::path::PathBuf;

use crate::bindings::Bindings;
use crate::constants::{
    BINDING_API_TOKEN, BINDING_PROJECT_HASH, DEFAULT_TIMEOUT_SECS, ENV_API_TOKEN, ENV_BASE_URL,
    ENV_CONFIG, ENV_PROJECT_HASH, ENV_TIMEOUT, REQUIRED_VARS,
};
use crate::env_config::{EnvFile, EnvLookup};
use crate::error::SettingsError;

/// Non-secret settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub config_path: Option<PathBuf>,
}

impl Settings {
    #[must_use]
    pub fn from_lookup(lookup: &EnvLookup) -> Self {
        Self {
            base_url: lookup.get_non_empty(ENV_BASE_URL),
            timeout_secs: lookup.parse_with_default(ENV_TIMEOUT, DEFAULT_TIMEOUT_SECS),
            config_path: lookup.get_non_empty(ENV_CONFIG).map(PathBuf::from),
        }
    }
}

/// API token and project hash.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_token: String,
    pub project_hash: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"***")
            .field("project_hash", &self.project_hash)
            .finish()
    }
}

impl Credentials {
    /// # Errors
    /// Returns [`SettingsError::MissingCredentials`] naming every unset or blank variable.
    pub fn from_lookup(lookup: &EnvLookup) -> Result<Self, SettingsError> {
        let api_token = lookup.get_non_empty(ENV_API_TOKEN);
        let project_hash = lookup.get_non_empty(ENV_PROJECT_HASH);
        match (api_token, project_hash) {
            (Some(api_token), Some(project_hash)) => Ok(Self { api_token, project_hash }),
            (api_token, project_hash) => {
                let mut missing = Vec::new();
                if api_token.is_none() {
                    missing.push(ENV_API_TOKEN);
                }
                if project_hash.is_none() {
                    missing.push(ENV_PROJECT_HASH);
                }
                Err(SettingsError::MissingCredentials { missing })
            },
        }
    }

    /// Bindings exposing the credentials as `{api_token}` and `{project_hash}`.
    #[must_use]
    pub fn bindings(&self) -> Bindings {
        Bindings::new()
            .with(BINDING_API_TOKEN, self.api_token.clone())
            .with(BINDING_PROJECT_HASH, self.project_hash.clone())
    }
}

/// State of the credentials file as seen by the prompt hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    Valid,
    FileMissing,
    MissingVars(Vec<&'static str>),
    EmptyValue(&'static str),
}

impl CredentialStatus {
    /// Inspects the parsed file, or its absence.
    #[must_use]
    pub fn check(file: Option<&EnvFile>) -> Self {
        let Some(file) = file else {
            return Self::FileMissing;
        };
        let missing: Vec<&'static str> =
            REQUIRED_VARS.iter().copied().filter(|var| !file.contains(var)).collect();
        if !missing.is_empty() {
            return Self::MissingVars(missing);
        }
        REQUIRED_VARS
            .iter()
            .copied()
            .find(|var| file.get(var).is_some_and(|v| v.trim().is_empty()))
            .map_or(Self::Valid, Self::EmptyValue)
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "Credentials valid"),
            Self::FileMissing => {
                write!(f, "Credentials file not found: ~/{}", crate::constants::CREDENTIALS_FILE)
            },
            Self::MissingVars(vars) => write!(f, "Missing required variables: {}", vars.join(", ")),
            Self::EmptyValue(var) => write!(f, "Empty value for {var}"),
        }
    }
}
