//! Environment variables layered over the `~/.env.pagerangers` file.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::constants::CREDENTIALS_FILE;
use crate::error::SettingsError;

/// `KEY=value` entries from a dotenv-style file.
///
/// Blank lines, `#` comments and lines without `=` are skipped. Keys and
/// values are trimmed and one layer of surrounding quotes is stripped from
/// values. The first occurrence of a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    entries: IndexMap<String, String>,
}

impl EnvFile {
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut entries = IndexMap::new();
        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            entries.entry(key.to_owned()).or_insert_with(|| strip_quotes(value.trim()).to_owned());
        }
        Self { entries }
    }

    /// Reads `path`; a missing file is `Ok(None)`.
    ///
    /// # Errors
    /// Returns [`SettingsError::Io`] if the file exists but cannot be read.
    pub fn load(path: &Path) -> Result<Option<Self>, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(Self::parse(&content))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SettingsError::Io { path: path.to_path_buf(), source }),
        }
    }

    /// `~/.env.pagerangers`, if a home directory is known.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CREDENTIALS_FILE))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    value.trim_matches(['"', '\''])
}

/// Variable lookup: process environment first, then the env file.
#[derive(Debug, Clone, Default)]
pub struct EnvLookup {
    overrides: IndexMap<String, String>,
    file: EnvFile,
    use_process_env: bool,
}

impl EnvLookup {
    /// Process environment layered over `file`.
    #[must_use]
    pub fn with_process_env(file: EnvFile) -> Self {
        Self { overrides: IndexMap::new(), file, use_process_env: true }
    }

    /// Only `file`, with no process environment. Used by tests.
    #[must_use]
    pub fn from_file(file: EnvFile) -> Self {
        Self { overrides: IndexMap::new(), file, use_process_env: false }
    }

    /// Sets a value that wins over both the environment and the file.
    #[must_use]
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.overrides.get(key) {
            return Some(value.clone());
        }
        if self.use_process_env {
            if let Ok(value) = std::env::var(key) {
                return Some(value);
            }
        }
        self.file.get(key).map(str::to_owned)
    }

    /// Like [`EnvLookup::get`], treating blank values as unset.
    #[must_use]
    pub fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    /// Parses a variable with a default fallback.
    ///
    /// - Unset: returns `default` silently.
    /// - Set but unparsable: logs a warning and returns `default`.
    pub fn parse_with_default<T: std::str::FromStr + std::fmt::Display>(&self, var: &str, default: T) -> T {
        match self.get(var) {
            Some(v) => match v.trim().parse() {
                Ok(n) => n,
                Err(_) => {
                    tracing::warn!(
                        var,
                        value = %v,
                        default = %default,
                        "invalid env var value, using default"
                    );
                    default
                },
            },
            None => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_file() {
        let file = EnvFile::parse(
            "# PageRangers\n\
             PAGERANGERS_API_TOKEN=\"secret\"\n\
             \n\
             PAGERANGERS_PROJECT_HASH = 'ABC1234'\n\
             not a pair\n\
             PAGERANGERS_TIMEOUT=45\n",
        );
        assert_eq!(file.get("PAGERANGERS_API_TOKEN"), Some("secret"));
        assert_eq!(file.get("PAGERANGERS_PROJECT_HASH"), Some("ABC1234"));
        assert_eq!(file.get("PAGERANGERS_TIMEOUT"), Some("45"));
        assert!(!file.contains("not a pair"));
    }

    #[test]
    fn test_parse_keeps_equals_in_value() {
        let file = EnvFile::parse("PAGERANGERS_API_TOKEN=abc=def==");
        assert_eq!(file.get("PAGERANGERS_API_TOKEN"), Some("abc=def=="));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let file = EnvFile::parse("KEY=first\nKEY=second");
        assert_eq!(file.get("KEY"), Some("first"));
    }

    #[test]
    fn test_empty_value_kept() {
        let file = EnvFile::parse("PAGERANGERS_API_TOKEN=\n");
        assert!(file.contains("PAGERANGERS_API_TOKEN"));
        assert_eq!(file.get("PAGERANGERS_API_TOKEN"), Some(""));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(EnvFile::load(&dir.path().join("absent")).unwrap(), None);
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env.pagerangers");
        std::fs::write(&path, "PAGERANGERS_PROJECT_HASH=XYZ\n").unwrap();
        let file = EnvFile::load(&path).unwrap().unwrap();
        assert_eq!(file.get("PAGERANGERS_PROJECT_HASH"), Some("XYZ"));
    }

    #[test]
    fn test_lookup_override_wins() {
        let lookup = EnvLookup::from_file(EnvFile::parse("KEY=file")).with_override("KEY", "override");
        assert_eq!(lookup.get("KEY").as_deref(), Some("override"));
    }

    #[test]
    fn test_process_env_wins_over_file() {
        let lookup = EnvLookup::with_process_env(EnvFile::parse("PATH=from-file"));
        assert_ne!(lookup.get("PATH").as_deref(), Some("from-file"));
    }

    #[test]
    fn test_parse_with_default() {
        let lookup = EnvLookup::from_file(EnvFile::parse("VALID=42\nINVALID=banana\nEMPTY="));
        assert_eq!(lookup.parse_with_default::<u64>("VALID", 10), 42);
        assert_eq!(lookup.parse_with_default::<u64>("INVALID", 10), 10);
        assert_eq!(lookup.parse_with_default::<u64>("EMPTY", 10), 10);
        assert_eq!(lookup.parse_with_default::<u64>("MISSING", 10), 10);
    }

    #[test]
    fn test_get_non_empty() {
        let lookup = EnvLookup::from_file(EnvFile::parse("BLANK=  \nSET=x"));
        assert_eq!(lookup.get_non_empty("BLANK"), None);
        assert_eq!(lookup.get_non_empty("SET").as_deref(), Some("x"));
    }
}
