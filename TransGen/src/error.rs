//! Error types for `TransGen`

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which input a source-file error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The terrain registry (`terrain.xml`).
    Terrain,
    /// The transition-type/hashkey registry (`data/transition_types.xml`).
    TransitionTypes,
    /// The per-run input transitions file.
    InputTransitions,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Terrain => "terrain",
            Self::TransitionTypes => "transition types",
            Self::InputTransitions => "input transition",
        })
    }
}

/// Which side of a transition pair a terrain selector was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainRole {
    /// The fixed terrain of a run.
    A,
    /// The terrain being blended into.
    B,
}

impl fmt::Display for TerrainRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::A => "A",
            Self::B => "B",
        })
    }
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A source file or terrain could not be found.
    NotFound,
    /// A source file is not well-formed XML.
    Parse,
    /// The inputs are readable but cannot produce a run.
    Validation,
    /// The output renderer failed.
    Render,
    /// Reading or writing the filesystem failed.
    Io,
}

/// The error type for `TransGen` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing a generated output file failed.
    #[error("error writing XML to {path}: {source}")]
    OutputWrite {
        /// The output file that could not be written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    // ==================== Source File Errors ====================
    /// An input file does not exist.
    #[error("{kind} file not found: {path}")]
    SourceNotFound {
        /// Which input was missing.
        kind: SourceKind,
        /// The path that was tried.
        path: PathBuf,
    },

    /// An input file is not well-formed XML.
    #[error("failed to parse {kind} XML: {source}")]
    XmlParse {
        /// Which input failed to parse.
        kind: SourceKind,
        /// The deserializer error.
        #[source]
        source: quick_xml::de::DeError,
    },

    /// The TOML config file is unreadable or invalid.
    #[error("invalid config file {path}: {message}")]
    Config {
        /// The config file path.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    // ==================== Validation Errors ====================
    /// A terrain selector did not resolve to any registered terrain.
    #[error("Terrain {role} '{selector}' not found in terrain registry")]
    TerrainNotFound {
        /// Whether this was Terrain A or Terrain B.
        role: TerrainRole,
        /// The selector as given by the user.
        selector: String,
    },

    /// Terrain B was omitted and the registry has no other terrains.
    #[error("no other terrains available to generate transitions")]
    NoTerrainB,

    /// Every Terrain B resolved to zero transition records.
    #[error("no transitions generated for any Terrain B")]
    NoTransitionsGenerated,

    // ==================== Rendering Errors ====================
    /// The requested template is not known to the renderer.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// The renderer failed while producing a document.
    #[error("error rendering template '{template}': {message}")]
    Render {
        /// The template being rendered.
        template: String,
        /// The writer error message.
        message: String,
    },
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) | Self::OutputWrite { .. } => ErrorKind::Io,
            Self::SourceNotFound { .. } => ErrorKind::NotFound,
            Self::XmlParse { .. } | Self::Config { .. } => ErrorKind::Parse,
            Self::TerrainNotFound { .. } | Self::NoTerrainB | Self::NoTransitionsGenerated => {
                ErrorKind::Validation
            }
            Self::TemplateNotFound(_) | Self::Render { .. } => ErrorKind::Render,
        }
    }
}

/// A specialized Result type for `TransGen` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let missing = Error::SourceNotFound {
            kind: SourceKind::Terrain,
            path: PathBuf::from("terrain.xml"),
        };
        assert_eq!(missing.kind(), ErrorKind::NotFound);
        assert_eq!(missing.to_string(), "terrain file not found: terrain.xml");

        let terrain = Error::TerrainNotFound {
            role: TerrainRole::A,
            selector: "lava".to_string(),
        };
        assert_eq!(terrain.kind(), ErrorKind::Validation);
        assert_eq!(
            terrain.to_string(),
            "Terrain A 'lava' not found in terrain registry"
        );

        assert_eq!(Error::TemplateNotFound("x".into()).kind(), ErrorKind::Render);
    }
}
