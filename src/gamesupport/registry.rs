//! Per-game support table

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::gamesupport::policy::{GamePolicy, UpdateInvalidation};
use crate::version::compare::compare_components;
use crate::version::source::GameVersionSource;

/// Invalidation notice shared by the Gamebryo titles, which all depend on a
/// script extender that breaks on every game update.
fn script_extender_notice(se_name: &str) -> String {
    format!(
        "\"{se_name}\" in particular and all plugins for it will need to be updated. \
         If this update was released only recently, you may have to wait for \
         {se_name} to be updated as well."
    )
}

/// Immutable per-game policy table.
///
/// Built once at startup from the builtin entries, configuration, and host
/// registrations; read-only afterwards. Lookups fall back per field, so an
/// unregistered game gets all defaults and a registered one only changes the
/// fields its policy actually set.
pub struct GameSupport {
    policies: HashMap<String, GamePolicy>,
}

impl GameSupport {
    /// Empty table: every game gets the default policy
    pub fn empty() -> Self {
        Self {
            policies: HashMap::new(),
        }
    }

    /// Table pre-populated with the games known to need special handling
    pub fn builtin() -> Self {
        const GAMEBRYO: &[(&str, &str)] = &[
            ("oblivion", "obse"),
            ("skyrim", "skse"),
            ("skyrimse", "skse64"),
            ("fallout3", "fose"),
            ("falloutnv", "nvse"),
            ("fallout4", "f4se"),
        ];

        let mut support = Self::empty();
        for (game_id, se_name) in GAMEBRYO {
            support = support.with_policy(
                *game_id,
                GamePolicy::new().with_invalidation_notice(script_extender_notice(se_name)),
            );
        }
        support
    }

    /// Register a policy, replacing any existing entry for the game
    pub fn with_policy(mut self, game_id: impl Into<String>, policy: GamePolicy) -> Self {
        self.policies.insert(game_id.into(), policy);
        self
    }

    /// Amend the policy registered for a game, keeping fields it already set
    pub fn update_policy(
        mut self,
        game_id: impl Into<String>,
        f: impl FnOnce(GamePolicy) -> GamePolicy,
    ) -> Self {
        let game_id = game_id.into();
        let policy = self.policies.remove(&game_id).unwrap_or_default();
        self.policies.insert(game_id, f(policy));
        self
    }

    fn policy(&self, game_id: &str) -> Option<&GamePolicy> {
        self.policies.get(game_id)
    }

    /// Order two version strings under the game's policy.
    ///
    /// A registered comparator fully replaces the default algorithm; there is
    /// no partial fallback once a game overrides ordering.
    pub fn compare(&self, game_id: &str, lhs: &str, rhs: &str) -> Ordering {
        match self.policy(game_id).and_then(GamePolicy::comparator) {
            Some(comparator) => comparator(lhs, rhs),
            None => compare_components(lhs, rhs),
        }
    }

    /// Whether an update of this game invalidates installed mods.
    ///
    /// Unregistered games default to [`UpdateInvalidation::Some`]: updates
    /// usually break some mods but not all.
    pub fn invalidation(&self, game_id: &str) -> UpdateInvalidation {
        self.policy(game_id)
            .and_then(GamePolicy::invalidation)
            .unwrap_or_default()
    }

    /// Explanatory text appended to update warnings for this game
    pub fn invalidation_notice(&self, game_id: &str) -> Option<&str> {
        self.policy(game_id)
            .and_then(GamePolicy::invalidation_notice)
    }

    /// Game-specific version retrieval override, if registered
    pub fn version_source(&self, game_id: &str) -> Option<&dyn GameVersionSource> {
        self.policy(game_id).and_then(GamePolicy::version_source)
    }
}

impl Default for GameSupport {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn unregistered_game_gets_all_defaults() {
        let support = GameSupport::empty();
        assert_eq!(support.invalidation("morrowind"), UpdateInvalidation::Some);
        assert!(support.invalidation_notice("morrowind").is_none());
        assert!(support.version_source("morrowind").is_none());
        assert_eq!(support.compare("morrowind", "1.0", "2.0"), Ordering::Less);
    }

    #[test]
    fn field_fallbacks_are_independent() {
        let support = GameSupport::empty().with_policy(
            "starfield",
            GamePolicy::new().with_invalidation(UpdateInvalidation::Never),
        );

        assert_eq!(support.invalidation("starfield"), UpdateInvalidation::Never);
        // the other fields still fall back to their defaults
        assert!(support.invalidation_notice("starfield").is_none());
        assert!(support.version_source("starfield").is_none());
        assert_eq!(support.compare("starfield", "1.2", "1.2.0.5"), Ordering::Equal);
    }

    #[test]
    fn builtin_table_carries_script_extender_notices() {
        let support = GameSupport::builtin();
        assert!(support.invalidation_notice("skyrimse").unwrap().contains("skse64"));
        assert!(support.invalidation_notice("fallout4").unwrap().contains("f4se"));
        assert!(support.invalidation_notice("oblivion").unwrap().contains("obse"));
        // the notice does not change the invalidation class
        assert_eq!(support.invalidation("skyrimse"), UpdateInvalidation::Some);
    }

    #[test]
    fn registered_comparator_fully_replaces_default() {
        let support = GameSupport::empty().with_policy(
            "starfield",
            GamePolicy::new().with_comparator(Arc::new(|lhs: &str, rhs: &str| {
                compare_components(lhs, rhs).reverse()
            })),
        );

        assert_eq!(support.compare("starfield", "1.0", "2.0"), Ordering::Greater);
        // other games keep the default ordering
        assert_eq!(support.compare("other", "1.0", "2.0"), Ordering::Less);
    }

    #[test]
    fn update_policy_keeps_existing_fields() {
        let support = GameSupport::builtin().update_policy("skyrimse", |policy| {
            policy.with_invalidation(UpdateInvalidation::Always)
        });

        assert_eq!(support.invalidation("skyrimse"), UpdateInvalidation::Always);
        assert!(support.invalidation_notice("skyrimse").unwrap().contains("skse64"));
    }

    #[test]
    fn update_policy_on_unregistered_game_starts_from_defaults() {
        let support = GameSupport::empty().update_policy("starfield", |policy| {
            policy.with_invalidation_notice("Creations may lag behind game patches.")
        });

        assert!(support.invalidation_notice("starfield").is_some());
        assert_eq!(support.invalidation("starfield"), UpdateInvalidation::Some);
    }
}
