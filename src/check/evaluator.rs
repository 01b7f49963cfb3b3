//! Compatibility evaluation

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::gamesupport::{GameSupport, UpdateInvalidation};
use crate::state::store::VersionBounds;

/// Outcome of evaluating the installed mods against the current game version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Mods whose version bounds exclude the current game version, in the
    /// order the snapshot listed them
    IncompatibleMods(Vec<String>),
    /// The game version changed since the last observation
    GameUpdated {
        before: String,
        after: String,
        invalidation: UpdateInvalidation,
        notice: Option<String>,
    },
}

/// Evaluate the installed mods against the current game version.
///
/// Returns at most one verdict. A concrete incompatibility list takes
/// precedence over the generic update warning; the two are never reported
/// together. With the current version unknown there is nothing to check and
/// no verdict is produced, regardless of the mods or the previous version.
/// The update warning additionally requires a known previous version that
/// differs from the current one, and an invalidation class other than
/// [`UpdateInvalidation::Never`].
///
/// Evaluation never fails and persists nothing; recording the observed
/// version is the caller's responsibility.
pub fn evaluate(
    support: &GameSupport,
    game_id: &str,
    current: Option<&str>,
    previous: Option<&str>,
    mods: &IndexMap<String, VersionBounds>,
) -> Option<Verdict> {
    let current = current?;

    let incompatible: Vec<String> = mods
        .iter()
        .filter(|(_, bounds)| !is_compatible(support, game_id, bounds, current))
        .map(|(mod_id, _)| mod_id.clone())
        .collect();
    if !incompatible.is_empty() {
        return Some(Verdict::IncompatibleMods(incompatible));
    }

    let previous = previous?;
    if previous == current {
        return None;
    }

    let invalidation = support.invalidation(game_id);
    if invalidation == UpdateInvalidation::Never {
        return None;
    }

    Some(Verdict::GameUpdated {
        before: previous.to_string(),
        after: current.to_string(),
        invalidation,
        notice: support.invalidation_notice(game_id).map(str::to_string),
    })
}

/// A mod with no bounds is compatible with every version.
fn is_compatible(
    support: &GameSupport,
    game_id: &str,
    bounds: &VersionBounds,
    version: &str,
) -> bool {
    if let Some(min) = &bounds.min_version {
        if support.compare(game_id, min, version) == Ordering::Greater {
            return false;
        }
    }
    if let Some(max) = &bounds.max_version {
        if support.compare(game_id, max, version) == Ordering::Less {
            return false;
        }
    }
    true
}
