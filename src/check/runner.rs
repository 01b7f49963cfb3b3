//! Check orchestration around persisted state

use std::sync::Arc;

use tracing::debug;

use crate::check::diagnostics::{Diagnostic, diagnostic_for};
use crate::check::evaluator::evaluate;
use crate::gamesupport::GameSupport;
use crate::state::error::StateError;
use crate::state::store::StateStore;
use crate::version::source::{InstalledVersions, resolve_game_version};

/// What caused a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    GameActivated,
    ModInstalled,
}

/// Runs compatibility checks against persisted state.
///
/// Callers serialize triggers per game; the runner holds no mutable state of
/// its own beyond what the store guards internally.
pub struct CompatibilityCheck<S, V> {
    support: Arc<GameSupport>,
    store: Arc<S>,
    installed: V,
}

impl<S: StateStore, V: InstalledVersions> CompatibilityCheck<S, V> {
    pub fn new(support: Arc<GameSupport>, store: Arc<S>, installed: V) -> Self {
        Self {
            support,
            store,
            installed,
        }
    }

    /// Run one check for a game and produce at most one diagnostic.
    ///
    /// The observed version is recorded unconditionally after evaluation, so
    /// the next run compares against this run's observation; an unknown
    /// version clears the record.
    pub async fn run(
        &self,
        game_id: &str,
        trigger: Trigger,
    ) -> Result<Option<Diagnostic>, StateError> {
        debug!(game = game_id, ?trigger, "running compatibility check");

        let current = resolve_game_version(&self.support, &self.installed, game_id).await;
        let previous = self.store.previous_version(game_id)?;
        let mods = self.store.managed_mods(game_id)?;

        let diagnostic = evaluate(
            &self.support,
            game_id,
            current.as_deref(),
            previous.as_deref(),
            &mods,
        )
        .map(|verdict| diagnostic_for(&verdict));

        self.store.record_version(game_id, current.as_deref())?;

        Ok(diagnostic)
    }
}
