//! Per-game policy overrides

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::version::source::GameVersionSource;

/// Whether an update of the game is expected to invalidate installed mods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateInvalidation {
    /// Updates never break mods
    Never,
    /// Updates usually break some mods but not all
    #[default]
    Some,
    /// Mods have to be updated with every game update
    Always,
}

/// Comparator override: a total order over two version strings.
///
/// Registered comparators must be antisymmetric and transitive; the table
/// cannot enforce this, callers registering overrides are responsible.
pub type VersionCmp = Arc<dyn Fn(&str, &str) -> Ordering + Send + Sync>;

/// Policy overrides for a single game.
///
/// Every field is independent: a game may override only the invalidation
/// class and keep the default comparator. Absent fields fall back to the
/// documented defaults at lookup time, see [`GameSupport`].
///
/// [`GameSupport`]: crate::gamesupport::GameSupport
#[derive(Clone, Default)]
pub struct GamePolicy {
    version_source: Option<Arc<dyn GameVersionSource>>,
    comparator: Option<VersionCmp>,
    invalidation: Option<UpdateInvalidation>,
    invalidation_notice: Option<String>,
}

impl GamePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override how the current version of the game is retrieved
    pub fn with_version_source(mut self, source: Arc<dyn GameVersionSource>) -> Self {
        self.version_source = Some(source);
        self
    }

    /// Override how two versions of the game are ordered
    pub fn with_comparator(mut self, comparator: VersionCmp) -> Self {
        self.comparator = Some(comparator);
        self
    }

    /// Override the update-invalidation class
    pub fn with_invalidation(mut self, invalidation: UpdateInvalidation) -> Self {
        self.invalidation = Some(invalidation);
        self
    }

    /// Set the explanatory text appended to update warnings
    pub fn with_invalidation_notice(mut self, notice: impl Into<String>) -> Self {
        self.invalidation_notice = Some(notice.into());
        self
    }

    pub(crate) fn version_source(&self) -> Option<&dyn GameVersionSource> {
        self.version_source.as_deref()
    }

    pub(crate) fn comparator(&self) -> Option<&(dyn Fn(&str, &str) -> Ordering + Send + Sync)> {
        self.comparator.as_deref()
    }

    pub(crate) fn invalidation(&self) -> Option<UpdateInvalidation> {
        self.invalidation
    }

    pub(crate) fn invalidation_notice(&self) -> Option<&str> {
        self.invalidation_notice.as_deref()
    }
}

impl fmt::Debug for GamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GamePolicy")
            .field("version_source", &self.version_source.is_some())
            .field("comparator", &self.comparator.is_some())
            .field("invalidation", &self.invalidation)
            .field("invalidation_notice", &self.invalidation_notice)
            .finish()
    }
}
