//! Named substitution values for endpoint templates.

use std::collections::HashMap;

/// Outcome of looking up a placeholder key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding<'a> {
    /// A value was supplied.
    Value(&'a str),
    /// The key was declared optional and no value was supplied.
    Absent,
    /// The key was never declared.
    Unbound,
}

/// Placeholder values for a single resolution: command arguments, credentials
/// and fixed constants.
///
/// A key can be bound to a value, or declared optional without one. Optional
/// keys without a value cause the query parameter or header that uses them to
/// be dropped instead of being sent empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: HashMap<String, Option<String>>,
}

impl Bindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to `value`, replacing any previous binding.
    pub fn bind(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), Some(value.into()));
    }

    /// Declares `key` optional; `None` marks it absent.
    pub fn bind_optional<V: Into<String>>(&mut self, key: impl Into<String>, value: Option<V>) {
        self.values.insert(key.into(), value.map(Into::into));
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.bind(key, value);
        self
    }

    #[must_use]
    pub fn with_optional<V: Into<String>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.bind_optional(key, value);
        self
    }

    /// Adds `defaults` for keys that have no binding yet.
    pub fn fill_defaults<'a, I>(&mut self, defaults: I)
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (key, value) in defaults {
            self.values.entry(key.clone()).or_insert_with(|| Some(value.clone()));
        }
    }

    #[must_use]
    pub fn lookup(&self, key: &str) -> Binding<'_> {
        match self.values.get(key) {
            Some(Some(value)) => Binding::Value(value),
            Some(None) => Binding::Absent,
            None => Binding::Unbound,
        }
    }

    /// Value bound to `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.lookup(key) {
            Binding::Value(value) => Some(value),
            Binding::Absent | Binding::Unbound => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_states() {
        let bindings = Bindings::new()
            .with("keyword", "seo tools")
            .with_optional("offset", None::<String>);

        assert_eq!(bindings.lookup("keyword"), Binding::Value("seo tools"));
        assert_eq!(bindings.lookup("offset"), Binding::Absent);
        assert_eq!(bindings.lookup("limit"), Binding::Unbound);
        assert_eq!(bindings.get("offset"), None);
    }

    #[test]
    fn test_fill_defaults_keeps_existing() {
        let mut bindings = Bindings::new().with("device", "mobile");
        let defaults: Vec<(String, String)> = vec![
            ("device".to_owned(), "desktop".to_owned()),
            ("country".to_owned(), "de".to_owned()),
        ];
        bindings.fill_defaults(defaults.iter().map(|(k, v)| (k, v)));

        assert_eq!(bindings.get("device"), Some("mobile"));
        assert_eq!(bindings.get("country"), Some("de"));
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn test_fill_defaults_does_not_override_absent_optional() {
        let mut bindings = Bindings::new().with_optional("offset", None::<&str>);
        let defaults = [("offset".to_owned(), "0".to_owned())];
        bindings.fill_defaults(defaults.iter().map(|(k, v)| (k, v)));

        assert_eq!(bindings.lookup("offset"), Binding::Absent);
    }
}
