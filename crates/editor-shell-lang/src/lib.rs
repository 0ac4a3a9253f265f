#![warn(missing_docs)]
//! `editor-shell-lang` - data-driven language configuration helpers for `editor-shell`.
//!
//! This crate intentionally stays lightweight and does **not** depend on any parsing or
//! highlighting system. It provides the small structs a host uses to describe which languages
//! exist, which file extensions map to them, and which grammar scope each language carries.
//! The actual grammar engine (TextMate, tree-sitter, ...) lives behind the host's display
//! layer; this crate only names things.

use std::collections::HashMap;

/// Opaque identifier for a registered language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LanguageId(u32);

impl LanguageId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u32 {
        self.0
    }

    fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A grammar scope name (e.g. `source.rust`, `text.plain`).
///
/// Scopes are opaque to this crate; the display layer resolves them against its own grammar
/// registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope(String);

impl Scope {
    /// Create a scope from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The scope name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Scope {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Scope {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Configuration for a single language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Language name (e.g. `rust`).
    pub name: String,
    /// File extensions, without the leading dot (e.g. `rs`).
    pub extensions: Vec<String>,
    /// Grammar scope for the display layer.
    pub scope: Scope,
}

impl LanguageConfig {
    /// Create a config with no extensions registered yet.
    pub fn new(name: impl Into<String>, scope: impl Into<Scope>) -> Self {
        Self {
            name: name.into(),
            extensions: Vec::new(),
            scope: scope.into(),
        }
    }

    /// Add a file extension (leading dot optional).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extensions.push(extension.into());
        self
    }

    /// A plain-text config (`txt`), the conventional fallback language.
    pub fn plain_text() -> Self {
        Self::new("plaintext", "text.plain").with_extension("txt")
    }
}

/// Holds registered language configurations and provides lookups.
///
/// Extension lookup is case-insensitive; extensions are normalized to lowercase on
/// registration and on query.
#[derive(Debug, Default)]
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
    by_extension: HashMap<String, LanguageId>,
}

impl LanguageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Returns `true` if no language has been registered.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Register a language configuration.
    ///
    /// Later registrations win on extension conflicts.
    pub fn register(&mut self, config: LanguageConfig) -> LanguageId {
        let id = LanguageId(self.languages.len() as u32);

        for ext in &config.extensions {
            self.by_extension.insert(normalize_extension(ext), id);
        }

        self.languages.push(config);
        id
    }

    /// Get a language configuration by id.
    pub fn get(&self, id: LanguageId) -> Option<&LanguageConfig> {
        self.languages.get(id.idx())
    }

    /// Find a language by file extension (leading dot optional, case-insensitive).
    pub fn language_for_extension(&self, extension: &str) -> Option<LanguageId> {
        self.by_extension.get(&normalize_extension(extension)).copied()
    }

    /// The first registered language, used as the fallback when an extension is unknown.
    pub fn first_language(&self) -> Option<LanguageId> {
        if self.languages.is_empty() {
            None
        } else {
            Some(LanguageId(0))
        }
    }

    /// Get the grammar scope for a language.
    pub fn scope(&self, id: LanguageId) -> Option<&Scope> {
        self.languages.get(id.idx()).map(|config| &config.scope)
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> LanguageRegistry {
        let mut registry = LanguageRegistry::new();
        registry.register(LanguageConfig::plain_text());
        registry.register(LanguageConfig::new("rust", "source.rust").with_extension("rs"));
        registry
    }

    #[test]
    fn test_extension_lookup_is_case_insensitive_and_dot_agnostic() {
        let registry = registry();
        let rust = registry.language_for_extension("rs").unwrap();
        assert_eq!(registry.language_for_extension("RS"), Some(rust));
        assert_eq!(registry.language_for_extension(".rs"), Some(rust));
        assert_eq!(registry.get(rust).unwrap().name, "rust");
    }

    #[test]
    fn test_first_language_is_registration_order() {
        let registry = registry();
        let first = registry.first_language().unwrap();
        assert_eq!(registry.get(first).unwrap().name, "plaintext");
        assert!(LanguageRegistry::new().first_language().is_none());
    }

    #[test]
    fn test_scope_resolution() {
        let registry = registry();
        let rust = registry.language_for_extension("rs").unwrap();
        assert_eq!(registry.scope(rust).unwrap().as_str(), "source.rust");
    }
}
