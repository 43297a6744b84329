//! Serde structures for the XML inputs
//!
//! Root element names are not checked by the deserializer, only the child
//! element and attribute names below.

use serde::Deserialize;

// ==================== terrain.xml ====================

/// `terrain.xml` document: a root element with `Terrain` children.
#[derive(Debug, Default, Deserialize)]
pub struct TerrainsXml {
    #[serde(rename = "Terrain", default)]
    pub terrains: Vec<TerrainXml>,
}

/// A single `<Terrain Name=".." ID=".."/>` entry.
#[derive(Debug, Default, Deserialize)]
pub struct TerrainXml {
    #[serde(rename = "@Name", default)]
    pub name: Option<String>,
    #[serde(rename = "@ID", default)]
    pub id: Option<String>,
}

// ==================== data/transition_types.xml ====================

/// Transition-type registry document.
#[derive(Debug, Default, Deserialize)]
pub struct TransitionTypesXml {
    #[serde(rename = "TransitionType", default)]
    pub transition_types: Vec<TransitionTypeXml>,
}

/// A named transition type with its hashkey patterns. Only the first
/// `<HashKeys>` container is used.
#[derive(Debug, Default, Deserialize)]
pub struct TransitionTypeXml {
    #[serde(rename = "@name", default)]
    pub name: Option<String>,
    #[serde(rename = "HashKeys", default)]
    pub hash_keys: Vec<HashKeysXml>,
}

/// `<HashKeys>` container.
#[derive(Debug, Default, Deserialize)]
pub struct HashKeysXml {
    #[serde(rename = "HashKey", default)]
    pub hash_keys: Vec<HashKeyXml>,
}

/// `<HashKey value=".."/>`
#[derive(Debug, Default, Deserialize)]
pub struct HashKeyXml {
    #[serde(rename = "@value", default)]
    pub value: Option<String>,
}

// ==================== input transitions ====================

/// Input transitions document. Shares the `TransitionType` element name with
/// the registry but describes transition occurrences, not types.
#[derive(Debug, Default, Deserialize)]
pub struct InputTransitionsXml {
    #[serde(rename = "TransitionType", default)]
    pub transitions: Vec<InputTransitionXml>,
}

/// One transition occurrence with its tiles. Only the first container of
/// each kind is used; repeats are kept so they do not fail the document.
#[derive(Debug, Default, Deserialize)]
pub struct InputTransitionXml {
    #[serde(rename = "@Description", default)]
    pub description: Option<String>,
    #[serde(rename = "MapTiles", default)]
    pub map_tiles: Vec<MapTilesXml>,
    #[serde(rename = "StaticTiles", default)]
    pub static_tiles: Vec<StaticTilesXml>,
}

/// `<MapTiles>` container.
#[derive(Debug, Default, Deserialize)]
pub struct MapTilesXml {
    #[serde(rename = "MapTile", default)]
    pub tiles: Vec<TileXml>,
}

/// `<StaticTiles>` container.
#[derive(Debug, Default, Deserialize)]
pub struct StaticTilesXml {
    #[serde(rename = "StaticTile", default)]
    pub tiles: Vec<TileXml>,
}

/// `<MapTile>` or `<StaticTile>` entry.
#[derive(Debug, Default, Deserialize)]
pub struct TileXml {
    #[serde(rename = "@TileID", default)]
    pub tile_id: Option<String>,
    #[serde(rename = "@AltIDMod", default)]
    pub alt_id_mod: Option<String>,
}
