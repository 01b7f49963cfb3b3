//! Snapshot of discovered game installations
//!
//! Scanning disks for installed games and reading the executable's embedded
//! version resource is the host's job; the snapshot carries what discovery
//! recorded, keyed by game id.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::version::source::InstalledVersions;

/// A single discovered installation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscoveredGame {
    /// Install directory, when known
    pub path: Option<PathBuf>,
    /// Executable version recorded at discovery time
    pub version: Option<String>,
}

/// Every discovered installation, keyed by game id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Discovery {
    pub games: HashMap<String, DiscoveredGame>,
}

impl Discovery {
    /// Load a discovery snapshot from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl InstalledVersions for Discovery {
    fn installed_version(&self, game_id: &str) -> Option<String> {
        self.games.get(game_id).and_then(|game| game.version.clone())
    }
}
