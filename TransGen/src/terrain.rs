//! Terrain registry
//!
//! Loads `terrain.xml` and indexes every terrain three ways: by lowercase
//! name, by two-digit uppercase hex ID and by decimal ID string. User
//! selectors (`Grass`, `0x03`, `3`) resolve through those indices.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use indexmap::IndexMap;

use crate::diagnostics::Diagnostics;
use crate::error::{Result, SourceKind};
use crate::formats::{TerrainsXml, attr_value, read_xml};

/// A terrain type as registered in `terrain.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainRecord {
    name: String,
    id: u32,
    id_hex: String,
}

impl TerrainRecord {
    /// Create a record, deriving the hex form of the ID.
    ///
    /// Returns `None` if the name is blank.
    #[must_use]
    pub fn new(name: impl Into<String>, id: u32) -> Option<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            id,
            id_hex: format!("{id:02X}"),
        })
    }

    /// Display name with its original casing.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Numeric ID.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// ID as a decimal string (`"5"`).
    #[must_use]
    pub fn id_dec(&self) -> String {
        self.id.to_string()
    }

    /// ID as zero-padded uppercase hex (`"05"`). IDs above 255 produce more
    /// than two digits.
    #[must_use]
    pub fn id_hex(&self) -> &str {
        &self.id_hex
    }
}

impl fmt::Display for TerrainRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, 0x{})", self.name, self.id, self.id_hex)
    }
}

/// Terrain records indexed by name, hex ID and decimal ID.
#[derive(Debug, Clone, Default)]
pub struct TerrainRegistry {
    by_name: IndexMap<String, TerrainRecord>,
    by_hex: HashMap<String, TerrainRecord>,
    by_dec: HashMap<String, TerrainRecord>,
    diagnostics: Diagnostics,
}

impl TerrainRegistry {
    /// Load the registry from a terrain XML file.
    ///
    /// # Errors
    /// Returns an error if the file is missing or is not well-formed XML.
    /// Individual bad entries are skipped and recorded in
    /// [`diagnostics`](Self::diagnostics).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc: TerrainsXml = read_xml(path, SourceKind::Terrain)?;
        Ok(Self::from_document(&doc))
    }

    /// Build the registry from an already-parsed document.
    #[must_use]
    pub fn from_document(doc: &TerrainsXml) -> Self {
        let mut registry = Self::default();

        for entry in &doc.terrains {
            let name = attr_value(entry.name.as_deref());
            let id_string = attr_value(entry.id.as_deref());

            if name.is_empty() || id_string.is_empty() {
                registry.diagnostics.warn(format!(
                    "Terrain with missing Name or ID: Name='{name}', ID='{id_string}'"
                ));
                continue;
            }

            let Ok(id) = id_string.parse::<u32>() else {
                registry.diagnostics.error(format!(
                    "Invalid ID format for terrain '{name}': '{id_string}'"
                ));
                continue;
            };

            if let Some(record) = TerrainRecord::new(name, id) {
                registry.insert(record);
            }
        }

        tracing::debug!("Loaded {} terrains", registry.len());
        registry
    }

    /// Register a terrain. A record whose name or IDs collide with an
    /// existing one replaces it in the colliding index.
    pub fn insert(&mut self, record: TerrainRecord) {
        self.by_hex.insert(record.id_hex.clone(), record.clone());
        self.by_dec.insert(record.id_dec(), record.clone());
        self.by_name.insert(record.name.to_lowercase(), record);
    }

    /// Resolve a user selector to a terrain.
    ///
    /// The selector is trimmed and compared case-insensitively, in order:
    /// 1. terrain name
    /// 2. `0x`-prefixed hex ID
    /// 3. all-digit decimal ID
    #[must_use]
    pub fn resolve(&self, input: &str) -> Option<&TerrainRecord> {
        let input_lower = input.trim().to_lowercase();

        if let Some(terrain) = self.by_name.get(&input_lower) {
            return Some(terrain);
        }

        if let Some(hex) = input_lower.strip_prefix("0x") {
            if is_hex_digits(hex) {
                return self.by_hex.get(&hex.to_uppercase());
            }
        }

        if is_decimal_digits(&input_lower) {
            return self.by_dec.get(&input_lower);
        }

        tracing::error!(
            "Invalid terrain. Please enter a valid Terrain Name, Hex ID (e.g., 0x29 or AB), or Decimal ID."
        );
        None
    }

    /// All registered terrains in first-seen order.
    pub fn terrains(&self) -> impl Iterator<Item = &TerrainRecord> {
        self.by_name.values()
    }

    /// Number of registered terrain names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no terrain was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Entries skipped while loading.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

fn is_hex_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_decimal_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::formats::parse_xml;

    fn registry(xml: &str) -> TerrainRegistry {
        let doc: TerrainsXml = parse_xml(xml, SourceKind::Terrain).unwrap();
        TerrainRegistry::from_document(&doc)
    }

    const TERRAINS: &str = r#"<Terrains>
        <Terrain Name="Grass" ID="5" />
        <Terrain Name="Dark Dirt" ID="171" />
        <Terrain Name="Sand" ID="16" />
    </Terrains>"#;

    #[test]
    fn test_hex_rendering() {
        assert_eq!(TerrainRecord::new("Grass", 5).unwrap().id_hex(), "05");
        assert_eq!(TerrainRecord::new("Dirt", 171).unwrap().id_hex(), "AB");
        assert_eq!(TerrainRecord::new("Zero", 0).unwrap().id_hex(), "00");
        assert_eq!(TerrainRecord::new("Big", 300).unwrap().id_hex(), "12C");
        assert!(TerrainRecord::new("  ", 1).is_none());
    }

    #[test]
    fn test_resolve_by_name_hex_and_decimal() {
        let reg = registry(TERRAINS);
        assert_eq!(reg.len(), 3);

        for selector in ["dark dirt", "DARK DIRT", " Dark Dirt ", "0xAB", "0Xab", "171"] {
            let terrain = reg.resolve(selector).unwrap();
            assert_eq!(terrain.name(), "Dark Dirt", "selector {selector:?}");
            assert_eq!(terrain.id(), 171);
        }

        let grass = reg.resolve("0x05").unwrap();
        assert_eq!(grass.name(), "Grass");
        assert_eq!(reg.resolve("5"), Some(grass));
    }

    #[test]
    fn test_resolve_not_found() {
        let reg = registry(TERRAINS);
        assert!(reg.resolve("lava").is_none());
        assert!(reg.resolve("0x99").is_none());
        assert!(reg.resolve("0x").is_none());
        assert!(reg.resolve("0xZZ").is_none());
        assert!(reg.resolve("999").is_none());
        assert!(reg.resolve("").is_none());
        // unpadded hex does not match the two-digit index
        assert!(reg.resolve("0x5").is_none());
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let reg = registry(
            r#"<Terrains>
                <Terrain Name="Grass" ID="3" />
                <Terrain ID="4" />
                <Terrain Name="Water" />
                <Terrain Name="Lava" ID="hot" />
                <Terrain Name="Ice" ID="-2" />
                <Terrain Name="Snow" ID=" 7 " />
            </Terrains>"#,
        );
        assert_eq!(reg.len(), 2);
        assert!(reg.resolve("snow").is_some());
        assert!(reg.resolve("lava").is_none());

        let diags = reg.diagnostics();
        assert_eq!(diags.count(Severity::Warning), 2);
        assert_eq!(diags.count(Severity::Error), 2);
        assert!(diags.iter().any(|d| d.message.contains("'hot'")));
    }

    #[test]
    fn test_enumeration_order_and_duplicates() {
        let reg = registry(
            r#"<Terrains>
                <Terrain Name="Grass" ID="3" />
                <Terrain Name="Sand" ID="4" />
                <Terrain Name="grass" ID="9" />
            </Terrains>"#,
        );
        let names: Vec<_> = reg.terrains().map(TerrainRecord::name).collect();
        assert_eq!(names, ["grass", "Sand"]);
        assert_eq!(reg.resolve("Grass").unwrap().id(), 9);
        // the earlier ID index entry is still reachable
        assert_eq!(reg.resolve("3").unwrap().name(), "Grass");
    }
}
