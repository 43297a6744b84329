//! XML input formats
//!
//! Serde schemas for the three attribute-based XML inputs and the shared
//! loader that maps filesystem and syntax failures onto [`crate::Error`].
//! The schemas accept every attribute as optional; semantic validation of
//! each entry happens in the registries that consume them.

mod reader;
mod schema;

pub use reader::{parse_xml, read_xml};
pub use schema::{
    HashKeyXml, HashKeysXml, InputTransitionXml, InputTransitionsXml, MapTilesXml,
    StaticTilesXml, TerrainXml, TerrainsXml, TileXml, TransitionTypeXml, TransitionTypesXml,
};

/// Trimmed value of an optional attribute, empty when absent.
pub(crate) fn attr_value(value: Option<&str>) -> &str {
    value.map_or("", str::trim)
}
