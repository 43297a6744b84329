//! Per-run generation summary

use std::path::PathBuf;

/// Outcome of generating one Terrain B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairOutcome {
    /// The transition document was written to this path.
    Written(PathBuf),
    /// No transitions resolved for the pair; nothing was written.
    Skipped,
}

/// A Terrain B whose generation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPair {
    /// Terrain B name.
    pub terrain: String,
    /// The error message.
    pub error: String,
}

/// What a run produced, per Terrain B.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Files written, in generation order.
    pub written: Vec<PathBuf>,
    /// Terrain B names that resolved zero transitions.
    pub skipped: Vec<String>,
    /// Terrain B generations that failed.
    pub failed: Vec<FailedPair>,
}

impl GenerationReport {
    /// Number of Terrain B candidates attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.written.len() + self.skipped.len() + self.failed.len()
    }

    /// Whether every Terrain B was generated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}
