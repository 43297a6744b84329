//! Generator configuration
//!
//! Paths default to the layout the tool has always used (`terrain.xml` and
//! `data/transition_types.xml` in the working directory, output under
//! `output/`). An optional `transgen.toml` can override any of them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::{DEFAULT_TEMPLATE, XmlRenderer};
use crate::transition_types::DEFAULT_TRANSITION_TYPES_PATH;

/// Default terrain registry path.
pub const DEFAULT_TERRAIN_PATH: &str = "terrain.xml";
/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";
/// Config file picked up from the working directory when present.
pub const CONFIG_FILE_NAME: &str = "transgen.toml";

/// Where the generator reads its registries and writes its output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Terrain registry XML.
    pub terrain_file: PathBuf,
    /// Transition-type registry XML.
    pub transition_types_file: PathBuf,
    /// Directory receiving one XML file per Terrain B.
    pub output_dir: PathBuf,
    /// Renderer template name.
    pub template: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            terrain_file: PathBuf::from(DEFAULT_TERRAIN_PATH),
            transition_types_file: PathBuf::from(DEFAULT_TRANSITION_TYPES_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load a TOML config file. Keys left out keep their defaults.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Load `transgen.toml` from `dir` if it exists, defaults otherwise.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the file exists but is invalid.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let candidate = dir.as_ref().join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!("Using config file {}", candidate.display());
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn from_toml_str(content: &str) -> std::result::Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.message().to_string())?;
        if !XmlRenderer::new().has_template(&config.template) {
            return Err(format!("unknown template '{}'", config.template));
        }
        Ok(config)
    }
}
