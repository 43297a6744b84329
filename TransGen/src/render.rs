//! Transition XML rendering
//!
//! Serializes resolved transition records into the Landscaper transition
//! document:
//!
//! ```xml
//! <TransInfos>
//!     <TransInfo Description="Dirt2Grass" HashKey="0510">
//!         <MapTiles>
//!             <MapTile TileID="42" AltIDMod="0"/>
//!         </MapTiles>
//!         <StaticTiles/>
//!     </TransInfo>
//! </TransInfos>
//! ```

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::error::{Error, Result};
use crate::transitions::{TileRecord, TransitionRecord};

/// Name of the built-in transition document template.
pub const DEFAULT_TEMPLATE: &str = "template.xml";

/// Data handed to a template.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Resolved records in resolution order.
    pub trans_infos: &'a [TransitionRecord],
}

/// Templates known to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Template {
    Transitions,
}

impl Template {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            DEFAULT_TEMPLATE => Some(Self::Transitions),
            _ => None,
        }
    }
}

/// Renders transition documents by template name.
#[derive(Debug, Clone)]
pub struct XmlRenderer {
    indent_char: u8,
    indent_size: usize,
}

impl Default for XmlRenderer {
    fn default() -> Self {
        Self {
            indent_char: b' ',
            indent_size: 4,
        }
    }
}

impl XmlRenderer {
    /// Renderer with four-space indentation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` refers to a known template.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        Template::from_name(name).is_some()
    }

    /// Render the named template with the given context.
    ///
    /// # Errors
    /// Returns [`Error::TemplateNotFound`] for unknown templates and
    /// [`Error::Render`] if serialization fails.
    pub fn render(&self, template_name: &str, context: &RenderContext<'_>) -> Result<String> {
        let template = Template::from_name(template_name).ok_or_else(|| {
            tracing::error!("Template '{}' not found", template_name);
            Error::TemplateNotFound(template_name.to_string())
        })?;

        let rendered = match template {
            Template::Transitions => self.render_transitions(context.trans_infos),
        };

        rendered.map_err(|e| {
            tracing::error!("Error rendering template '{}': {}", template_name, e);
            Error::Render {
                template: template_name.to_string(),
                message: e.to_string(),
            }
        })
    }

    fn render_transitions(
        &self,
        trans_infos: &[TransitionRecord],
    ) -> std::result::Result<String, RenderFailure> {
        let mut output = Vec::new();
        let mut writer = Writer::new_with_indent(&mut output, self.indent_char, self.indent_size);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("TransInfos")))?;

        for info in trans_infos {
            let mut start = BytesStart::new("TransInfo");
            start.push_attribute(("Description", info.description.as_str()));
            start.push_attribute(("HashKey", info.hashkey.as_str()));
            writer.write_event(Event::Start(start.borrow()))?;

            write_tiles(&mut writer, "MapTiles", "MapTile", &info.map_tiles)?;
            write_tiles(&mut writer, "StaticTiles", "StaticTile", &info.static_tiles)?;

            writer.write_event(Event::End(BytesEnd::new("TransInfo")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("TransInfos")))?;

        let mut xml = String::from_utf8(output)?;
        xml.push('\n');
        Ok(xml)
    }
}

fn write_tiles<W: std::io::Write>(
    writer: &mut Writer<W>,
    container: &str,
    element: &str,
    tiles: &[TileRecord],
) -> std::result::Result<(), RenderFailure> {
    if tiles.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(container)))?;
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new(container)))?;
    for tile in tiles {
        let mut tag = BytesStart::new(element);
        tag.push_attribute(("TileID", tile.tile_id.as_str()));
        tag.push_attribute(("AltIDMod", tile.alt_id_mod.as_str()));
        writer.write_event(Event::Empty(tag))?;
    }
    writer.write_event(Event::End(BytesEnd::new(container)))?;
    Ok(())
}

/// Internal failure while writing a document.
#[derive(Debug, thiserror::Error)]
enum RenderFailure {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}
