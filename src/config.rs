use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::gamesupport::{GameSupport, UpdateInvalidation, VersionCmp};
use crate::version::compare::{compare_components, compare_semantic};

/// Check configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckConfig {
    pub games: HashMap<String, GamePolicyConfig>,
}

/// Per-game policy entries expressible in configuration.
///
/// Function-valued overrides (custom version sources, arbitrary comparators)
/// are registered through [`GameSupport`] by the embedding host; config can
/// only select among the named comparators.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GamePolicyConfig {
    pub comparator: Option<ComparatorKind>,
    pub invalidation: Option<UpdateInvalidation>,
    pub invalidation_notice: Option<String>,
}

/// Named comparators selectable from configuration
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComparatorKind {
    /// Dot-separated numeric comparison (the default algorithm)
    Numeric,
    /// Strict semver ordering
    Semantic,
}

impl ComparatorKind {
    pub fn as_fn(self) -> VersionCmp {
        match self {
            ComparatorKind::Numeric => Arc::new(compare_components),
            ComparatorKind::Semantic => Arc::new(compare_semantic),
        }
    }
}

impl CheckConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Merge config-declared policies into a support table.
    ///
    /// Only the fields a config entry sets are applied; fields an existing
    /// policy already carries stay untouched.
    pub fn apply(&self, mut support: GameSupport) -> GameSupport {
        for (game_id, entry) in &self.games {
            support = support.update_policy(game_id.clone(), |mut policy| {
                if let Some(kind) = entry.comparator {
                    policy = policy.with_comparator(kind.as_fn());
                }
                if let Some(invalidation) = entry.invalidation {
                    policy = policy.with_invalidation(invalidation);
                }
                if let Some(notice) = &entry.invalidation_notice {
                    policy = policy.with_invalidation_notice(notice.clone());
                }
                policy
            });
        }
        support
    }
}

/// Returns the path to the data directory for modcompat.
/// Uses $XDG_DATA_HOME/modcompat if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/modcompat,
/// or ./modcompat if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the state database file.
pub fn db_path() -> PathBuf {
    data_dir().join("state.db")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("modcompat.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("modcompat")
}
