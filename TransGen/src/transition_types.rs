//! Transition-type registry
//!
//! Maps each transition type name (case preserved, used verbatim as a join
//! key) to its ordered list of hashkey patterns.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;

use crate::diagnostics::Diagnostics;
use crate::error::{Result, SourceKind};
use crate::formats::{TransitionTypesXml, attr_value, read_xml};
use crate::resolve::substitute;

/// Well-known location of the transition-type registry, relative to the
/// working directory.
pub const DEFAULT_TRANSITION_TYPES_PATH: &str = "data/transition_types.xml";

/// A hex-character hashkey pattern. `A` and `B` (either case) stand for the
/// hex IDs of Terrain A and Terrain B.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashkeyPattern(String);

impl HashkeyPattern {
    /// Validate a pattern. Returns `None` unless the value is non-empty and
    /// consists only of `[A-Fa-f0-9]`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_hexdigit()) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    /// The pattern as written in the registry.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute the terrain placeholders with the given hex IDs.
    #[must_use]
    pub fn resolve(&self, terrain_a_hex: &str, terrain_b_hex: &str) -> String {
        substitute(&self.0, terrain_a_hex, terrain_b_hex)
    }
}

impl fmt::Display for HashkeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transition type name → hashkey patterns, in registration order.
#[derive(Debug, Clone, Default)]
pub struct TransitionTypeRegistry {
    types: IndexMap<String, Vec<HashkeyPattern>>,
    diagnostics: Diagnostics,
}

impl TransitionTypeRegistry {
    /// Load the registry from [`DEFAULT_TRANSITION_TYPES_PATH`].
    ///
    /// # Errors
    /// Returns an error if the file is missing or is not well-formed XML.
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_TRANSITION_TYPES_PATH)
    }

    /// Load the registry from a transition-types XML file.
    ///
    /// # Errors
    /// Returns an error if the file is missing or is not well-formed XML.
    /// Invalid hashkeys and unnamed types are skipped and recorded in
    /// [`diagnostics`](Self::diagnostics).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc: TransitionTypesXml = read_xml(path, SourceKind::TransitionTypes)?;
        Ok(Self::from_document(&doc))
    }

    /// Build the registry from an already-parsed document.
    #[must_use]
    pub fn from_document(doc: &TransitionTypesXml) -> Self {
        let mut registry = Self::default();

        for entry in &doc.transition_types {
            let name = attr_value(entry.name.as_deref());
            if name.is_empty() {
                registry
                    .diagnostics
                    .warn("TransitionType element missing 'name' attribute.");
                continue;
            }

            let Some(hash_keys) = entry.hash_keys.first() else {
                registry
                    .diagnostics
                    .warn(format!("No HashKeys found for TransitionType '{name}'."));
                continue;
            };

            let mut patterns = Vec::new();
            for hash_key in &hash_keys.hash_keys {
                let value = attr_value(hash_key.value.as_deref());
                if value.is_empty() {
                    continue;
                }
                match HashkeyPattern::parse(value) {
                    Some(pattern) => patterns.push(pattern),
                    None => registry.diagnostics.warn(format!(
                        "Invalid HashKey format: '{value}' in TransitionType '{name}'"
                    )),
                }
            }

            if patterns.is_empty() {
                tracing::debug!("TransitionType '{}' has no usable hashkeys", name);
            } else {
                registry.types.insert(name.to_string(), patterns);
            }
        }

        tracing::debug!("Loaded {} transition types", registry.types.len());
        registry
    }

    /// Register (or replace) a transition type. Empty pattern lists are
    /// ignored so every registered type has at least one hashkey.
    pub fn insert(&mut self, name: impl Into<String>, patterns: Vec<HashkeyPattern>) {
        if !patterns.is_empty() {
            self.types.insert(name.into(), patterns);
        }
    }

    /// All registered type names, in registration order.
    pub fn transition_type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Hashkey patterns for a type name (exact, case-sensitive). Empty if
    /// the name is not registered.
    #[must_use]
    pub fn hashkeys_for(&self, name: &str) -> &[HashkeyPattern] {
        self.types.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no type was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Entries skipped while loading.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}
