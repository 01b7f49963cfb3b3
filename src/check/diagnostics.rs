//! Diagnostic rendering for check results

use std::fmt;

use serde::Serialize;

use crate::check::evaluator::Verdict;
use crate::gamesupport::UpdateInvalidation;

/// Severity of a diagnostic surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A single user-facing diagnostic; at most one is produced per check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub short_message: String,
    pub long_message: String,
}

/// Render a verdict as the diagnostic reported for this check run.
pub fn diagnostic_for(verdict: &Verdict) -> Diagnostic {
    match verdict {
        Verdict::IncompatibleMods(mods) => {
            let listing = mods
                .iter()
                .map(|mod_id| format!("\"{mod_id}\""))
                .collect::<Vec<_>>()
                .join("\n");
            Diagnostic {
                severity: Severity::Warning,
                short_message: "Incompatible mods".to_string(),
                long_message: format!(
                    "Some mods are incompatible with the current game version, \
                     please check if updates are available:\n\n{listing}"
                ),
            }
        }
        Verdict::GameUpdated {
            before,
            after,
            invalidation,
            notice,
        } => {
            let mut text = format!("The game has been updated from {before} to {after}.");
            match invalidation {
                UpdateInvalidation::Some => {
                    text.push_str("\n\nYou may have to update mods to be compatible.");
                }
                UpdateInvalidation::Always => {
                    text.push_str(
                        "\n\nWith this game mods need to be updated with every game update.",
                    );
                }
                // a never-invalidating game produces no update verdict at all
                UpdateInvalidation::Never => {}
            }
            if let Some(notice) = notice {
                text.push_str("\n\n");
                text.push_str(notice);
            }
            Diagnostic {
                severity: Severity::Warning,
                short_message: "Game updated".to_string(),
                long_message: text,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incompatible_mods_diagnostic_lists_every_mod() {
        let verdict =
            Verdict::IncompatibleMods(vec!["skyui".to_string(), "dragon-souls".to_string()]);

        let diagnostic = diagnostic_for(&verdict);
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.short_message, "Incompatible mods");
        assert!(diagnostic.long_message.contains("\"skyui\""));
        assert!(diagnostic.long_message.contains("\"dragon-souls\""));
    }

    #[test]
    fn update_diagnostic_reports_both_versions() {
        let verdict = Verdict::GameUpdated {
            before: "1.5.97.0".to_string(),
            after: "1.6.640.0".to_string(),
            invalidation: UpdateInvalidation::Some,
            notice: None,
        };

        let diagnostic = diagnostic_for(&verdict);
        assert_eq!(diagnostic.short_message, "Game updated");
        assert!(
            diagnostic
                .long_message
                .contains("updated from 1.5.97.0 to 1.6.640.0")
        );
        assert!(
            diagnostic
                .long_message
                .contains("You may have to update mods")
        );
    }

    #[test]
    fn always_invalidating_update_uses_the_stronger_wording() {
        let verdict = Verdict::GameUpdated {
            before: "1.0".to_string(),
            after: "1.1".to_string(),
            invalidation: UpdateInvalidation::Always,
            notice: None,
        };

        let diagnostic = diagnostic_for(&verdict);
        assert!(
            diagnostic
                .long_message
                .contains("updated with every game update")
        );
    }

    #[test]
    fn policy_notice_is_appended_when_present() {
        let verdict = Verdict::GameUpdated {
            before: "1.0".to_string(),
            after: "1.1".to_string(),
            invalidation: UpdateInvalidation::Some,
            notice: Some("\"skse64\" in particular will need to be updated.".to_string()),
        };

        let diagnostic = diagnostic_for(&verdict);
        assert!(diagnostic.long_message.ends_with("will need to be updated."));
    }

    #[test]
    fn diagnostic_serializes_with_lowercase_severity() {
        let diagnostic = diagnostic_for(&Verdict::IncompatibleMods(vec!["skyui".to_string()]));
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["severity"], "warning");
    }
}
