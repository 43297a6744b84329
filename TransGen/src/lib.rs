//! # TransGen
//!
//! Generates UO Landscaper terrain transition XML from three inputs:
//!
//! - **`terrain.xml`** - terrain names and numeric IDs
//! - **`data/transition_types.xml`** - transition types and their hashkey
//!   patterns (`A`/`B` placeholders for the two terrains' hex IDs)
//! - **an input transitions file** - transition descriptions with their map
//!   and static tiles
//!
//! For a fixed Terrain A and one or every other Terrain B, each input
//! transition whose description names a registered transition type is
//! expanded into one record per hashkey pattern, and the result is written
//! as one XML file per Terrain B.
//!
//! ## Quick Start
//!
//! ```no_run
//! use transgen::prelude::*;
//!
//! let terrains = TerrainRegistry::load("terrain.xml")?;
//! let types = TransitionTypeRegistry::load_default()?;
//! let transitions = TransitionSet::load("Dirt2Grass.xml")?;
//!
//! let dirt = terrains.resolve("Dirt").expect("Dirt is registered");
//! let grass = terrains.resolve("0x03").expect("0x03 is registered");
//! let resolved = resolve_pair(dirt, grass, transitions.records(), &types);
//! println!("{} transitions", resolved.len());
//! # Ok::<(), transgen::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `transgen` command-line binary

pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod generator;
pub mod render;
pub mod resolve;
pub mod terrain;
pub mod transition_types;
pub mod transitions;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::diagnostics::{Diagnostic, Diagnostics, Severity};
    pub use crate::error::{Error, ErrorKind, Result, SourceKind, TerrainRole};
    pub use crate::generator::{
        GenerationReport, GeneratorConfig, PairOutcome, TransitionGenerator, output_file_name,
    };
    pub use crate::render::{DEFAULT_TEMPLATE, RenderContext, XmlRenderer};
    pub use crate::resolve::{resolve_pair, substitute};
    pub use crate::terrain::{TerrainRecord, TerrainRegistry};
    pub use crate::transition_types::{HashkeyPattern, TransitionTypeRegistry};
    pub use crate::transitions::{TileRecord, TransitionRecord, TransitionSet};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
