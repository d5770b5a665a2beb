//! Game version strings
//!
//! Game versions are compared as dotted integers ("1.9" < "1.10"), not as
//! plain strings.

use std::cmp::Ordering;

use semver::Version;

/// Stable release: starts with "1." and carries no pre-release or snapshot suffix
pub fn is_stable(version: &str) -> bool {
    version.starts_with("1.") && !version.contains('-')
}

/// Parse a game version, padding partial versions with zeros.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.20" -> Version(1, 20, 0)
/// - "1.20.4" -> Version(1, 20, 4)
pub fn parse_game_version(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Total order over game versions.
///
/// Parseable versions compare numerically and sort above unparseable ones;
/// remaining ties ("1.20" vs "1.20.0") fall back to string order.
pub fn compare_game_versions(a: &str, b: &str) -> Ordering {
    match (parse_game_version(a), parse_game_version(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

/// Highest version of the list, if any
pub fn highest<'a, I>(versions: I) -> Option<&'a String>
where
    I: IntoIterator<Item = &'a String>,
{
    versions
        .into_iter()
        .max_by(|a, b| compare_game_versions(a, b))
}
