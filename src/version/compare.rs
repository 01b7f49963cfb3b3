//! Version ordering algorithms

use std::cmp::Ordering;

use semver::Version;

/// Compare two dot-separated numeric version strings.
///
/// This is the default algorithm, matching the four-integer scheme Windows
/// uses for executable versions (`1.5.97.0`) while tolerating the two- or
/// three-component versions mod metadata usually carries. Components are
/// compared pairwise up to the shorter of the two sequences; trailing extra
/// components are never considered, so `"1.2"` and `"1.2.0.5"` are equal.
/// A component that fails to parse counts as `0`.
pub fn compare_components(lhs: &str, rhs: &str) -> Ordering {
    let lhs: Vec<u64> = lhs.split('.').map(|c| c.parse().unwrap_or(0)).collect();
    let rhs: Vec<u64> = rhs.split('.').map(|c| c.parse().unwrap_or(0)).collect();

    for (l, r) in lhs.iter().zip(&rhs) {
        match l.cmp(r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Strict semantic ordering, for games whose versions follow semver.
///
/// Partial versions are zero-padded (`"1.2"` parses as `1.2.0`) and build
/// metadata is ignored per semver precedence rules. When either side does
/// not parse as semver the comparison degrades to [`compare_components`]
/// instead of failing.
pub fn compare_semantic(lhs: &str, rhs: &str) -> Ordering {
    match (parse_version(lhs), parse_version(rhs)) {
        (Some(lhs), Some(rhs)) => lhs.cmp_precedence(&rhs),
        _ => compare_components(lhs, rhs),
    }
}

/// Parse a version string into a semver::Version, normalizing partial
/// versions by padding with zeros ("1.2" -> 1.2.0).
fn parse_version(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}
