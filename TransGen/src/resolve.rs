//! Transition resolution
//!
//! Joins input transition records to the transition-type registry by exact
//! description match and expands each match into one resolved record per
//! hashkey pattern, with the terrain placeholders substituted.
//!
//! Everything here is pure: bad inputs were already filtered out while the
//! registries were loaded.

use crate::terrain::TerrainRecord;
use crate::transition_types::TransitionTypeRegistry;
use crate::transitions::TransitionRecord;

/// Replace hashkey placeholders with terrain hex IDs.
///
/// The pattern is uppercased first; every `A` becomes `terrain_a_hex`, every
/// `B` becomes `terrain_b_hex`, and all other characters are kept.
///
/// ```
/// use transgen::resolve::substitute;
///
/// assert_eq!(substitute("AB12", "1F", "2E"), "1F2E12");
/// assert_eq!(substitute("a0c", "1F", "2E"), "1F0C");
/// ```
#[must_use]
pub fn substitute(pattern: &str, terrain_a_hex: &str, terrain_b_hex: &str) -> String {
    let mut result = String::with_capacity(pattern.len() * 2);
    for ch in pattern.chars().flat_map(char::to_uppercase) {
        match ch {
            'A' => result.push_str(terrain_a_hex),
            'B' => result.push_str(terrain_b_hex),
            other => result.push(other),
        }
    }
    result
}

/// Resolve all transition records for a terrain pair.
///
/// Output order is record-major: each source record in document order,
/// expanded by its type's hashkeys in registration order. Records whose
/// description is not a registered type contribute nothing.
#[must_use]
pub fn resolve_pair(
    terrain_a: &TerrainRecord,
    terrain_b: &TerrainRecord,
    records: &[TransitionRecord],
    registry: &TransitionTypeRegistry,
) -> Vec<TransitionRecord> {
    let mut resolved = Vec::new();

    for record in records {
        let patterns = registry.hashkeys_for(&record.description);
        if patterns.is_empty() {
            tracing::trace!("No transition type for '{}'", record.description);
            continue;
        }
        for pattern in patterns {
            let hashkey = pattern.resolve(terrain_a.id_hex(), terrain_b.id_hex());
            resolved.push(record.with_hashkey(hashkey));
        }
    }

    tracing::debug!(
        "Resolved {} transitions for {} -> {}",
        resolved.len(),
        terrain_a.name(),
        terrain_b.name()
    );
    resolved
}
