//! Current-version retrieval for a managed game

#[cfg(test)]
use mockall::automock;

use tracing::warn;

use crate::gamesupport::GameSupport;

/// Trait for game-specific version retrieval overrides.
///
/// Registered per game through [`GamePolicy::with_version_source`]; may do
/// I/O or call out to an external service, hence async.
///
/// [`GamePolicy::with_version_source`]: crate::gamesupport::GamePolicy::with_version_source
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait GameVersionSource: Send + Sync {
    /// Produce the current version of the game
    async fn game_version(&self, game_id: &str) -> anyhow::Result<String>;
}

/// Trait for the default synchronous retrieval, backed by whatever the host
/// knows about the installed executable.
#[cfg_attr(test, automock)]
pub trait InstalledVersions: Send + Sync {
    /// Version of the installed game, `None` when unknown
    fn installed_version(&self, game_id: &str) -> Option<String>;
}

/// Resolve the current version for a game.
///
/// A registered per-game source takes priority. When it fails, the failure is
/// logged and the installed-executable fallback applies unconditionally;
/// retrieval never errors, it only degrades to an unknown version.
pub async fn resolve_game_version(
    support: &GameSupport,
    installed: &dyn InstalledVersions,
    game_id: &str,
) -> Option<String> {
    if let Some(source) = support.version_source(game_id) {
        match source.game_version(game_id).await {
            Ok(version) => return Some(version),
            Err(err) => {
                warn!(
                    game = game_id,
                    error = %err,
                    "version source failed, falling back to installed version"
                );
            }
        }
    }

    installed.installed_version(game_id)
}
