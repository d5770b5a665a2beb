//! Consensus game version across identified mods

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::UpdateError;
use crate::version::game_version;

/// Game versions one mod supports
pub type VersionSet = BTreeSet<String>;

/// Versions present in every non-empty set.
///
/// Empty sets are ignored, so a mod without versions cannot erase the
/// consensus; no sets at all yields an empty result.
pub fn intersect<'a, I>(sets: I) -> VersionSet
where
    I: IntoIterator<Item = &'a VersionSet>,
{
    let mut sets = sets.into_iter().filter(|set| !set.is_empty());
    let Some(first) = sets.next() else {
        return VersionSet::new();
    };

    sets.fold(first.clone(), |common, set| {
        common.intersection(set).cloned().collect()
    })
}

/// Highest game version supported by every mod.
///
/// # Returns
/// * `Ok(String)` - The consensus target version
/// * `Err(UpdateError::NoCommonVersion)` - If the intersection is empty
pub fn consensus_version<'a, I>(sets: I) -> Result<String, UpdateError>
where
    I: IntoIterator<Item = &'a VersionSet>,
{
    let common = intersect(sets);
    debug!("Common versions: {:?}", common);

    game_version::highest(&common)
        .cloned()
        .ok_or(UpdateError::NoCommonVersion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn set(versions: &[&str]) -> VersionSet {
        versions.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn intersect_keeps_shared_versions() {
        let sets = [
            set(&["1.20.1", "1.20.4", "1.21"]),
            set(&["1.19.4", "1.20.1", "1.20.4"]),
        ];

        assert_eq!(intersect(&sets), set(&["1.20.1", "1.20.4"]));
    }

    #[test]
    fn intersect_is_order_independent() {
        let a = set(&["1.18.2", "1.19.2", "1.20.1"]);
        let b = set(&["1.19.2", "1.20.1", "1.20.4"]);
        let c = set(&["1.16.5", "1.19.2", "1.20.1"]);

        let expected = intersect([&a, &b, &c]);
        assert_eq!(intersect([&c, &b, &a]), expected);
        assert_eq!(intersect([&b, &a, &c]), expected);
        assert_eq!(intersect([&intersect([&a, &b]), &c]), expected);
        assert_eq!(intersect([&a, &intersect([&b, &c])]), expected);
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![vec!["1.20.1", "1.21"]], vec!["1.20.1", "1.21"])]
    #[case(vec![vec![], vec!["1.20.1"]], vec!["1.20.1"])]
    fn intersect_degenerate_inputs(
        #[case] sets: Vec<Vec<&str>>,
        #[case] expected: Vec<&str>,
    ) {
        let sets: Vec<VersionSet> = sets.iter().map(|s| set(s)).collect();
        assert_eq!(intersect(&sets), set(&expected));
    }

    #[test]
    fn consensus_version_is_highest_common_version() {
        let sets = [
            set(&["1.20.1", "1.20.4", "1.21"]),
            set(&["1.19.4", "1.20.1", "1.20.4"]),
        ];

        assert_eq!(consensus_version(&sets).unwrap(), "1.20.4");
    }

    #[test]
    fn consensus_version_compares_numerically() {
        let sets = [set(&["1.8.9", "1.9", "1.10"]), set(&["1.9", "1.10"])];

        assert_eq!(consensus_version(&sets).unwrap(), "1.10");
    }

    #[test]
    fn consensus_version_fails_for_disjoint_sets() {
        let sets = [set(&["1.16.5"]), set(&["1.20.1"])];

        assert!(matches!(
            consensus_version(&sets),
            Err(UpdateError::NoCommonVersion)
        ));
    }

    #[test]
    fn consensus_version_fails_without_sets() {
        let sets: Vec<VersionSet> = vec![];

        assert!(matches!(
            consensus_version(&sets),
            Err(UpdateError::NoCommonVersion)
        ));
    }
}
