//! Persisted-state access for compatibility checks

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::state::error::StateError;

/// Optional version bounds a mod declares against its game.
///
/// A mod with neither bound is compatible with every game version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionBounds {
    /// Oldest game version the mod works with
    pub min_version: Option<String>,
    /// Newest game version the mod works with
    pub max_version: Option<String>,
}

/// Trait for reading and writing the persisted per-game state.
pub trait StateStore: Send + Sync {
    /// Last observed game version, if any
    fn previous_version(&self, game_id: &str) -> Result<Option<String>, StateError>;

    /// Record the version observed by the current run.
    ///
    /// `None` clears the record, so an unknown observation is not shadowed
    /// by a stale version from an earlier run.
    fn record_version(&self, game_id: &str, version: Option<&str>) -> Result<(), StateError>;

    /// Snapshot of installed mods and their bounds, in installation order
    fn managed_mods(&self, game_id: &str) -> Result<IndexMap<String, VersionBounds>, StateError>;

    /// Register an installed mod, replacing the bounds of an existing entry
    /// with the same id
    fn add_mod(
        &self,
        game_id: &str,
        mod_id: &str,
        bounds: &VersionBounds,
    ) -> Result<(), StateError>;
}
