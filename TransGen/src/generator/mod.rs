//! Transition generation
//!
//! Drives a run: resolve Terrain A, pick the Terrain B candidates, resolve
//! the transitions for each pair and write one XML document per Terrain B.
//!
//! # Usage
//!
//! ```no_run
//! use transgen::generator::{GeneratorConfig, TransitionGenerator};
//!
//! let generator = TransitionGenerator::new(GeneratorConfig::default(), "Dirt2Grass.xml")?;
//! let report = generator.run("Dirt", Some("Grass"))?;
//! println!("Wrote {} files", report.written.len());
//! # Ok::<(), transgen::Error>(())
//! ```

mod config;
mod report;

pub use config::{CONFIG_FILE_NAME, DEFAULT_OUTPUT_DIR, DEFAULT_TERRAIN_PATH, GeneratorConfig};
pub use report::{FailedPair, GenerationReport, PairOutcome};

use std::fs;
use std::path::Path;

use crate::error::{Error, Result, TerrainRole};
use crate::render::{RenderContext, XmlRenderer};
use crate::resolve::resolve_pair;
use crate::terrain::{TerrainRecord, TerrainRegistry};
use crate::transition_types::TransitionTypeRegistry;
use crate::transitions::{TransitionRecord, TransitionSet};

/// Output file name for a terrain pair:
/// `{A id}-{A name}_To_{B id}-{B name}.xml`, spaces in names replaced by
/// underscores.
#[must_use]
pub fn output_file_name(terrain_a: &TerrainRecord, terrain_b: &TerrainRecord) -> String {
    format!(
        "{}-{}_To_{}-{}.xml",
        terrain_a.id(),
        terrain_a.name().replace(' ', "_"),
        terrain_b.id(),
        terrain_b.name().replace(' ', "_"),
    )
}

/// Loaded registries plus the settings for writing output.
#[derive(Debug, Clone)]
pub struct TransitionGenerator {
    config: GeneratorConfig,
    terrains: TerrainRegistry,
    transition_types: TransitionTypeRegistry,
    transitions: TransitionSet,
    renderer: XmlRenderer,
}

impl TransitionGenerator {
    /// Load the terrain registry, the transition-type registry and the input
    /// transitions.
    ///
    /// # Errors
    /// Returns an error if any of the three files is missing or malformed.
    pub fn new<P: AsRef<Path>>(config: GeneratorConfig, input_transitions: P) -> Result<Self> {
        let terrains = TerrainRegistry::load(&config.terrain_file)?;
        let transition_types = TransitionTypeRegistry::load(&config.transition_types_file)?;
        let transitions = TransitionSet::load(input_transitions)?;
        Ok(Self::from_parts(
            config,
            terrains,
            transition_types,
            transitions,
        ))
    }

    /// Assemble a generator from already-loaded parts.
    #[must_use]
    pub fn from_parts(
        config: GeneratorConfig,
        terrains: TerrainRegistry,
        transition_types: TransitionTypeRegistry,
        transitions: TransitionSet,
    ) -> Self {
        Self {
            config,
            terrains,
            transition_types,
            transitions,
            renderer: XmlRenderer::new(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The terrain registry.
    #[must_use]
    pub fn terrains(&self) -> &TerrainRegistry {
        &self.terrains
    }

    /// The transition-type registry.
    #[must_use]
    pub fn transition_types(&self) -> &TransitionTypeRegistry {
        &self.transition_types
    }

    /// The parsed input transitions.
    #[must_use]
    pub fn transitions(&self) -> &TransitionSet {
        &self.transitions
    }

    /// Resolve a terrain selector.
    ///
    /// # Errors
    /// Returns [`Error::TerrainNotFound`] if nothing matches.
    pub fn terrain(&self, selector: &str, role: TerrainRole) -> Result<&TerrainRecord> {
        self.terrains.resolve(selector).ok_or_else(|| {
            tracing::error!("Terrain {} '{}' not found in terrain registry.", role, selector);
            Error::TerrainNotFound {
                role,
                selector: selector.to_string(),
            }
        })
    }

    /// Terrain B candidates: the selected terrain, or every terrain whose
    /// name differs from Terrain A's.
    ///
    /// # Errors
    /// Returns [`Error::TerrainNotFound`] for an unknown selector and
    /// [`Error::NoTerrainB`] if no other terrain is registered.
    pub fn terrains_b(
        &self,
        terrain_a: &TerrainRecord,
        terrain_b: Option<&str>,
    ) -> Result<Vec<&TerrainRecord>> {
        if let Some(selector) = terrain_b {
            let terrain = self.terrain(selector, TerrainRole::B)?;
            tracing::info!("--- Generating for Specified Terrain B ---");
            return Ok(vec![terrain]);
        }

        let candidates: Vec<_> = self
            .terrains
            .terrains()
            .filter(|t| t.name() != terrain_a.name())
            .collect();
        if candidates.is_empty() {
            tracing::error!("No other terrains available to generate transitions.");
            return Err(Error::NoTerrainB);
        }
        tracing::info!("--- Generating for All Terrains Except Terrain A ---");
        Ok(candidates)
    }

    /// Resolved transitions for one pair.
    #[must_use]
    pub fn trans_infos_for_pair(
        &self,
        terrain_a: &TerrainRecord,
        terrain_b: &TerrainRecord,
    ) -> Vec<TransitionRecord> {
        resolve_pair(
            terrain_a,
            terrain_b,
            self.transitions.records(),
            &self.transition_types,
        )
    }

    /// Resolve, render and write the document for one pair.
    ///
    /// # Errors
    /// Returns an error if rendering or writing fails.
    pub fn generate_pair(
        &self,
        terrain_a: &TerrainRecord,
        terrain_b: &TerrainRecord,
    ) -> Result<PairOutcome> {
        let trans_infos = self.trans_infos_for_pair(terrain_a, terrain_b);
        if trans_infos.is_empty() {
            tracing::warn!(
                "No transitions generated for Terrain B '{}'.",
                terrain_b.name()
            );
            return Ok(PairOutcome::Skipped);
        }

        let xml = self.renderer.render(
            &self.config.template,
            &RenderContext {
                trans_infos: &trans_infos,
            },
        )?;

        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|source| Error::OutputWrite {
            path: output_dir.clone(),
            source,
        })?;

        let file_name = output_file_name(terrain_a, terrain_b);
        let path = output_dir.join(&file_name);
        fs::write(&path, xml).map_err(|source| {
            tracing::error!("Error writing XML to file: {}", source);
            Error::OutputWrite {
                path: path.clone(),
                source,
            }
        })?;

        tracing::info!("Transition XML generated and saved to {}", file_name);
        Ok(PairOutcome::Written(path))
    }

    /// Generate transitions for Terrain A against one or all Terrain B's.
    ///
    /// A failure for one Terrain B is logged and recorded in the report;
    /// the remaining Terrain B's are still generated.
    ///
    /// # Errors
    /// Returns an error if Terrain A or the given Terrain B does not
    /// resolve, if there is no Terrain B candidate, or if every candidate
    /// resolved zero transitions.
    pub fn run(&self, terrain_a: &str, terrain_b: Option<&str>) -> Result<GenerationReport> {
        let terrain_a = self.terrain(terrain_a, TerrainRole::A)?;
        let candidates = self.terrains_b(terrain_a, terrain_b)?;

        let mut report = GenerationReport::default();
        for terrain_b in candidates {
            match self.generate_pair(terrain_a, terrain_b) {
                Ok(PairOutcome::Written(path)) => report.written.push(path),
                Ok(PairOutcome::Skipped) => report.skipped.push(terrain_b.name().to_string()),
                Err(e) => {
                    tracing::error!(
                        "Failed to generate Transitions XML for Terrain B '{}': {}",
                        terrain_b.name(),
                        e
                    );
                    report.failed.push(FailedPair {
                        terrain: terrain_b.name().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Generated {} file(s), skipped {}, failed {}",
            report.written.len(),
            report.skipped.len(),
            report.failed.len()
        );

        if report.written.is_empty() && report.failed.is_empty() {
            return Err(Error::NoTransitionsGenerated);
        }
        Ok(report)
    }
}
