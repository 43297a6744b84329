//! Input transition parsing
//!
//! Reads the per-run transitions file: a list of transition occurrences, each
//! with a description (the join key into the transition-type registry) and
//! its map and static tiles.

use std::path::Path;
use std::sync::Arc;

use crate::diagnostics::Diagnostics;
use crate::error::{Result, SourceKind};
use crate::formats::{InputTransitionsXml, TileXml, attr_value, read_xml};

/// A map or static tile reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRecord {
    /// Decimal tile ID (hex input is normalized).
    pub tile_id: String,
    /// Alternate-ID modifier, passed through verbatim.
    pub alt_id_mod: String,
}

impl TileRecord {
    /// Build a tile record. `TileID` values of the form `0x..` are converted
    /// to decimal. Returns `None` if either field ends up empty or the hex
    /// value does not fit in 64 bits.
    #[must_use]
    pub fn new(tile_id: &str, alt_id_mod: &str) -> Option<Self> {
        let tile_id = tile_id.trim();
        let alt_id_mod = alt_id_mod.trim();

        let tile_id = match hex_digits(tile_id) {
            Some(hex) => u64::from_str_radix(hex, 16).ok()?.to_string(),
            None => tile_id.to_string(),
        };

        if tile_id.is_empty() || alt_id_mod.is_empty() {
            return None;
        }

        Some(Self {
            tile_id,
            alt_id_mod: alt_id_mod.to_string(),
        })
    }
}

/// Digits of a `0x`/`0X`-prefixed hex literal, if `s` is one.
fn hex_digits(s: &str) -> Option<&str> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())).then_some(digits)
}

/// A transition occurrence, either as read from the input file (empty
/// hashkey) or resolved for a terrain pair.
///
/// Tile lists are shared between a source record and all records resolved
/// from it; they are never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRecord {
    /// Transition description, case preserved.
    pub description: String,
    /// Resolved hashkey, empty until resolution.
    pub hashkey: String,
    /// Map tiles in document order.
    pub map_tiles: Arc<[TileRecord]>,
    /// Static tiles in document order.
    pub static_tiles: Arc<[TileRecord]>,
}

impl TransitionRecord {
    /// Create an unresolved record.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        map_tiles: Vec<TileRecord>,
        static_tiles: Vec<TileRecord>,
    ) -> Self {
        Self {
            description: description.into(),
            hashkey: String::new(),
            map_tiles: map_tiles.into(),
            static_tiles: static_tiles.into(),
        }
    }

    /// A resolved copy of this record sharing its tile lists.
    #[must_use]
    pub fn with_hashkey(&self, hashkey: String) -> Self {
        Self {
            description: self.description.clone(),
            hashkey,
            map_tiles: Arc::clone(&self.map_tiles),
            static_tiles: Arc::clone(&self.static_tiles),
        }
    }

    /// Whether a hashkey has been assigned.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.hashkey.is_empty()
    }
}

/// The parsed contents of an input transitions file.
#[derive(Debug, Clone, Default)]
pub struct TransitionSet {
    records: Vec<TransitionRecord>,
    diagnostics: Diagnostics,
}

impl TransitionSet {
    /// Load and parse an input transitions file.
    ///
    /// # Errors
    /// Returns an error if the file is missing or is not well-formed XML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc: InputTransitionsXml = read_xml(path, SourceKind::InputTransitions)?;
        Ok(Self::from_document(&doc))
    }

    /// Build the set from an already-parsed document.
    #[must_use]
    pub fn from_document(doc: &InputTransitionsXml) -> Self {
        let mut set = Self::default();

        for entry in &doc.transitions {
            let description = attr_value(entry.description.as_deref());
            if description.is_empty() {
                set.diagnostics
                    .warn("TransitionType element missing 'Description' attribute.");
                continue;
            }

            let map_tiles = entry
                .map_tiles
                .first()
                .map(|m| collect_tiles(&m.tiles))
                .unwrap_or_default();
            let static_tiles = entry
                .static_tiles
                .first()
                .map(|s| collect_tiles(&s.tiles))
                .unwrap_or_default();

            set.records
                .push(TransitionRecord::new(description, map_tiles, static_tiles));
        }

        tracing::debug!("Loaded {} input transitions", set.records.len());
        set
    }

    /// Wrap records that were built in code rather than parsed.
    #[must_use]
    pub fn from_records(records: Vec<TransitionRecord>) -> Self {
        Self {
            records,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Records in document order. Descriptions may repeat.
    #[must_use]
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// Entries skipped while loading.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

fn collect_tiles(tiles: &[TileXml]) -> Vec<TileRecord> {
    tiles
        .iter()
        .filter_map(|tile| {
            let tile_id = attr_value(tile.tile_id.as_deref());
            let alt_id_mod = attr_value(tile.alt_id_mod.as_deref());
            let record = TileRecord::new(tile_id, alt_id_mod);
            if record.is_none() {
                tracing::debug!("Dropping tile TileID='{}' AltIDMod='{}'", tile_id, alt_id_mod);
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::parse_xml;
    use pretty_assertions::assert_eq;

    fn tile(id: &str, alt: &str) -> TileRecord {
        TileRecord {
            tile_id: id.to_string(),
            alt_id_mod: alt.to_string(),
        }
    }

    #[test]
    fn test_tile_normalization() {
        assert_eq!(TileRecord::new("0x2A", "0"), Some(tile("42", "0")));
        assert_eq!(TileRecord::new("0X2a", "1"), Some(tile("42", "1")));
        assert_eq!(TileRecord::new(" 17 ", " 2 "), Some(tile("17", "2")));
        assert_eq!(TileRecord::new("42", ""), None);
        assert_eq!(TileRecord::new("", "0"), None);
        // not a full hex match: passed through
        assert_eq!(TileRecord::new("0x2G", "0"), Some(tile("0x2G", "0")));
        assert_eq!(TileRecord::new("0xFFFFFFFFFFFFFFFFF", "0"), None);
    }

    #[test]
    fn test_parse_document_order_and_repeats() {
        let doc: InputTransitionsXml = parse_xml(
            r#"<Transitions>
                <TransitionType Description="Dirt2Grass">
                    <MapTiles>
                        <MapTile TileID="0x2A" AltIDMod="0" />
                        <MapTile TileID="43" AltIDMod="" />
                        <MapTile TileID="44" AltIDMod="1" />
                    </MapTiles>
                    <StaticTiles>
                        <StaticTile TileID="0x0100" AltIDMod="0" />
                        <StaticTile AltIDMod="0" />
                    </StaticTiles>
                </TransitionType>
                <TransitionType>
                    <MapTiles><MapTile TileID="1" AltIDMod="0" /></MapTiles>
                </TransitionType>
                <TransitionType Description="Dirt2Grass" />
            </Transitions>"#,
            SourceKind::InputTransitions,
        )
        .unwrap();
        let set = TransitionSet::from_document(&doc);

        let records = set.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "Dirt2Grass");
        assert!(!records[0].is_resolved());
        assert_eq!(&*records[0].map_tiles, &[tile("42", "0"), tile("44", "1")]);
        assert_eq!(&*records[0].static_tiles, &[tile("256", "0")]);
        assert_eq!(records[1].description, "Dirt2Grass");
        assert!(records[1].map_tiles.is_empty());
        assert_eq!(set.diagnostics().len(), 1);
    }

    #[test]
    fn test_first_tile_container_wins() {
        let doc: InputTransitionsXml = parse_xml(
            r#"<Transitions>
                <TransitionType Description="Edge">
                    <MapTiles><MapTile TileID="1" AltIDMod="0" /></MapTiles>
                    <MapTiles><MapTile TileID="2" AltIDMod="0" /></MapTiles>
                </TransitionType>
                loose text
                <TransitionType Description="Corner" />
            </Transitions>"#,
            SourceKind::InputTransitions,
        )
        .unwrap();
        let set = TransitionSet::from_document(&doc);

        assert_eq!(set.records().len(), 2);
        assert_eq!(&*set.records()[0].map_tiles, &[tile("1", "0")]);
        assert_eq!(set.records()[1].description, "Corner");
    }

    #[test]
    fn test_with_hashkey_shares_tiles() {
        let record = TransitionRecord::new("Edge", vec![tile("1", "0")], Vec::new());
        let resolved = record.with_hashkey("0510".to_string());
        assert!(resolved.is_resolved());
        assert!(Arc::ptr_eq(&record.map_tiles, &resolved.map_tiles));
        assert!(Arc::ptr_eq(&record.static_tiles, &resolved.static_tiles));
    }
}
