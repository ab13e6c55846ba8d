//! Immutable bilingual vocabulary catalog.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::CatalogError;

/// Read-only mapping from vocabulary keys to their native- and
/// target-language strings. Built once at startup by the collaborator.
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    native: HashMap<String, String>,
    target: HashMap<String, String>,
}

impl TranslationCatalog {
    pub fn new(native: HashMap<String, String>, target: HashMap<String, String>) -> Self {
        Self { native, target }
    }

    /// Load both language maps from JSON files of the form
    /// `{"key": "text", ...}`.
    ///
    /// A file that cannot be read or parsed degrades to an empty map for
    /// that language (logged); lookups then fall back to echoing the key.
    pub fn load_from_files(native_path: &Path, target_path: &Path) -> Self {
        let native = load_language_map(native_path).unwrap_or_else(|err| {
            tracing::error!("{err}; using empty native map");
            HashMap::new()
        });
        let target = load_language_map(target_path).unwrap_or_else(|err| {
            tracing::error!("{err}; using empty target map");
            HashMap::new()
        });
        tracing::info!(
            native = native.len(),
            target = target.len(),
            "loaded translation catalog"
        );
        Self { native, target }
    }

    /// Whether the key names a vocabulary entry in either language.
    pub fn contains(&self, key: &str) -> bool {
        self.native.contains_key(key) || self.target.contains_key(key)
    }

    pub fn native(&self, key: &str) -> Option<&str> {
        self.native.get(key).map(String::as_str)
    }

    pub fn target(&self, key: &str) -> Option<&str> {
        self.target.get(key).map(String::as_str)
    }

    /// Native-language text, falling back to the key itself when missing.
    pub fn native_or_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.native(key).unwrap_or(key)
    }

    /// Target-language text, falling back to the key itself when missing.
    pub fn target_or_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.target(key).unwrap_or(key)
    }

    /// Number of distinct vocabulary keys across both languages.
    pub fn key_count(&self) -> usize {
        self.native
            .keys()
            .chain(self.target.keys())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.native.is_empty() && self.target.is_empty()
    }
}

fn load_language_map(path: &Path) -> Result<HashMap<String, String>, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TranslationCatalog {
        let native = HashMap::from([
            ("item.x".to_string(), "Stone".to_string()),
            ("biome.plains".to_string(), "Plains".to_string()),
        ]);
        let target = HashMap::from([
            ("item.x".to_string(), "Piedra".to_string()),
            ("biome.plains".to_string(), "Llanura".to_string()),
        ]);
        TranslationCatalog::new(native, target)
    }

    #[test]
    fn lookups_return_both_languages() {
        let catalog = catalog();
        assert_eq!(catalog.native("item.x"), Some("Stone"));
        assert_eq!(catalog.target("item.x"), Some("Piedra"));
        assert!(catalog.contains("biome.plains"));
        assert!(!catalog.contains("item.unknown"));
    }

    #[test]
    fn missing_keys_echo_back() {
        let catalog = catalog();
        assert_eq!(catalog.native_or_key("item.unknown"), "item.unknown");
        assert_eq!(catalog.target_or_key("item.unknown"), "item.unknown");
    }

    #[test]
    fn key_count_unions_both_maps() {
        let native = HashMap::from([("a".to_string(), "A".to_string())]);
        let target = HashMap::from([
            ("a".to_string(), "Ah".to_string()),
            ("b".to_string(), "Beh".to_string()),
        ]);
        let catalog = TranslationCatalog::new(native, target);
        assert_eq!(catalog.key_count(), 2);
    }

    #[test]
    fn unreadable_files_degrade_to_empty() {
        let catalog = TranslationCatalog::load_from_files(
            Path::new("/nonexistent/en.json"),
            Path::new("/nonexistent/es.json"),
        );
        assert!(catalog.is_empty());
        assert_eq!(catalog.native_or_key("item.x"), "item.x");
    }
}
