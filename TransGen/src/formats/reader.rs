//! Shared XML loading

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result, SourceKind};

/// Read and deserialize an XML input file.
///
/// # Errors
/// Returns [`Error::SourceNotFound`] if the file does not exist,
/// [`Error::XmlParse`] if it is malformed or cannot be decoded with its
/// declared encoding, or [`Error::Io`] for other read failures.
pub fn read_xml<T: DeserializeOwned, P: AsRef<Path>>(path: P, kind: SourceKind) -> Result<T> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::error!("{} file not found: {}", capitalized(kind), path.display());
            return Err(Error::SourceNotFound {
                kind,
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(Error::Io(e)),
    };
    tracing::debug!("Parsing {} XML: {}", kind, path.display());
    let content = decode(&bytes).map_err(|e| parse_error(kind, e))?;
    parse_xml(&content, kind)
}

/// Deserialize an XML input from a string.
///
/// # Errors
/// Returns [`Error::XmlParse`] if the XML is malformed.
pub fn parse_xml<T: DeserializeOwned>(content: &str, kind: SourceKind) -> Result<T> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let markup = strip_character_data(content).map_err(|e| parse_error(kind, e))?;
    quick_xml::de::from_str(&markup).map_err(|source| parse_error(kind, source))
}

/// Decode raw file bytes using the BOM or the `encoding` of the XML
/// declaration, falling back to UTF-8.
fn decode(bytes: &[u8]) -> quick_xml::Result<Cow<'_, str>> {
    let mut reader = Reader::from_reader(bytes);
    // the BOM and the declaration are both seen while reading the first event
    let _ = reader.read_event();
    reader.decoder().decode(bytes)
}

/// Re-emit the document without text, CDATA, comments, processing
/// instructions or declarations. Every value is read from attributes, and
/// text between sibling elements would otherwise end a list early.
fn strip_character_data(content: &str) -> quick_xml::Result<String> {
    let mut reader = Reader::from_str(content);
    let mut writer = Writer::new(Vec::with_capacity(content.len()));
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            event @ (Event::Start(_) | Event::End(_) | Event::Empty(_)) => {
                writer.write_event(event)?;
            }
            _ => {}
        }
    }
    Ok(String::from_utf8(writer.into_inner())?)
}

fn parse_error(kind: SourceKind, source: impl Into<quick_xml::DeError>) -> Error {
    let source = source.into();
    tracing::error!("Failed to parse {kind} XML: {source}");
    Error::XmlParse { kind, source }
}

fn capitalized(kind: SourceKind) -> String {
    let name = kind.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::formats::{InputTransitionsXml, TerrainsXml};

    #[test]
    fn test_missing_file_is_not_found() {
        let err = read_xml::<TerrainsXml, _>("does/not/exist.xml", SourceKind::Terrain)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let err = parse_xml::<TerrainsXml>(
            r#"<Terrains><Terrain Name="Grass" ID="3"></Terrains>"#,
            SourceKind::Terrain,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_bom_and_missing_attributes() {
        let doc: TerrainsXml = parse_xml(
            "\u{feff}<Terrains><Terrain Name=\" Grass \" ID=\"3\"/><Terrain ID=\"4\"/></Terrains>",
            SourceKind::Terrain,
        )
        .unwrap();
        assert_eq!(doc.terrains.len(), 2);
        assert_eq!(doc.terrains[0].name.as_deref(), Some(" Grass "));
        assert!(doc.terrains[1].name.is_none());
    }

    #[test]
    fn test_optional_tile_containers() {
        let doc: InputTransitionsXml = parse_xml(
            r#"<Transitions>
                <TransitionType Description="Dirt2Grass">
                    <MapTiles>
                        <MapTile TileID="0x2A" AltIDMod="0"/>
                    </MapTiles>
                </TransitionType>
                <TransitionType Description="Grass2Dirt"/>
            </Transitions>"#,
            SourceKind::InputTransitions,
        )
        .unwrap();
        assert_eq!(doc.transitions.len(), 2);
        let first = &doc.transitions[0];
        assert_eq!(first.map_tiles.first().map(|m| m.tiles.len()), Some(1));
        assert!(first.static_tiles.is_empty());
        assert!(doc.transitions[1].map_tiles.is_empty());
    }

    #[test]
    fn test_declared_latin1_encoding() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("terrain.xml");
        let mut bytes = br#"<?xml version="1.0" encoding="ISO-8859-1"?>
<Terrains><Terrain Name="Caf"#
            .to_vec();
        bytes.extend_from_slice(b"\xE9\" ID=\"3\"/></Terrains>");
        fs::write(&path, bytes).unwrap();

        let doc: TerrainsXml = read_xml(&path, SourceKind::Terrain).unwrap();
        assert_eq!(doc.terrains[0].name.as_deref(), Some("Caf\u{e9}"));
    }

    #[test]
    fn test_undecodable_bytes_are_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("terrain.xml");
        fs::write(&path, b"<Terrains><Terrain Name=\"Caf\xE9\" ID=\"3\"/></Terrains>").unwrap();

        let err = read_xml::<TerrainsXml, _>(&path, SourceKind::Terrain).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_text_between_entries_is_ignored() {
        let doc: InputTransitionsXml = parse_xml(
            r#"<Transitions>
                <TransitionType Description="X"/>stray text
                <!-- comment --><![CDATA[more]]>
                <TransitionType Description="Y"><MapTiles>text</MapTiles></TransitionType>
            </Transitions>"#,
            SourceKind::InputTransitions,
        )
        .unwrap();
        assert_eq!(doc.transitions.len(), 2);
        assert_eq!(doc.transitions[1].description.as_deref(), Some("Y"));
    }

    #[test]
    fn test_repeated_tile_containers() {
        let doc: InputTransitionsXml = parse_xml(
            r#"<Transitions>
                <TransitionType Description="X">
                    <MapTiles><MapTile TileID="1" AltIDMod="0"/></MapTiles>
                    <StaticTiles/>
                    <MapTiles><MapTile TileID="2" AltIDMod="0"/></MapTiles>
                </TransitionType>
            </Transitions>"#,
            SourceKind::InputTransitions,
        )
        .unwrap();
        let entry = &doc.transitions[0];
        assert_eq!(entry.map_tiles.len(), 2);
        assert_eq!(entry.map_tiles[0].tiles[0].tile_id.as_deref(), Some("1"));
        assert_eq!(entry.static_tiles.len(), 1);
    }

    #[test]
    fn test_capitalized() {
        assert_eq!(capitalized(SourceKind::InputTransitions), "Input transition");
    }
}
