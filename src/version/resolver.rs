//! Compatible-version lookup and build selection for identified mods

use tracing::debug;

use crate::config::FileSelection;
use crate::error::UpdateError;
use crate::matcher::IdentifiedMod;
use crate::registry::{ProjectVersion, Registry, VersionFile, VersionQuery};
use crate::version::game_version;
use crate::version::reconcile::VersionSet;

/// Stable game versions a mod supports on its loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibleVersions {
    pub versions: VersionSet,
    pub highest: String,
}

/// Build picked for the consensus game version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChosenVersion {
    pub id: String,
    pub name: String,
    pub version_number: String,
    pub url: String,
}

/// Collects every stable game version listed by the mod's published builds.
///
/// # Returns
/// * `Ok(CompatibleVersions)` - Non-empty set plus its highest member
/// * `Err(UpdateError::NoCompatibleVersion)` - If no stable version is listed
/// * `Err(UpdateError::RequestFailed)` - If the registry request fails
pub async fn list_compatible_versions(
    registry: &dyn Registry,
    identified: &IdentifiedMod,
) -> Result<CompatibleVersions, UpdateError> {
    let query = VersionQuery::for_loader(identified.local.loader);
    let published = registry.project_versions(&identified.slug, &query).await?;

    let versions: VersionSet = published
        .into_iter()
        .flat_map(|version| version.game_versions)
        .filter(|v| game_version::is_stable(v))
        .collect();

    let highest = game_version::highest(&versions)
        .cloned()
        .ok_or_else(|| UpdateError::NoCompatibleVersion {
            slug: identified.slug.clone(),
            game_version: None,
        })?;

    debug!(
        "Highest version for {} is {} ({} compatible)",
        identified.title,
        highest,
        versions.len()
    );

    Ok(CompatibleVersions { versions, highest })
}

/// Picks the registry's first build for `target` and its download link.
///
/// # Returns
/// * `Ok(ChosenVersion)` - The selected build
/// * `Err(UpdateError::NoCompatibleVersion)` - If no build targets `target`
/// * `Err(UpdateError::NoDownloadableFile)` - If the selected build lists no files
/// * `Err(UpdateError::RequestFailed)` - If the registry request fails
pub async fn choose_build(
    registry: &dyn Registry,
    identified: &IdentifiedMod,
    target: &str,
    selection: FileSelection,
) -> Result<ChosenVersion, UpdateError> {
    let query = VersionQuery::for_game_version(identified.local.loader, target);
    let published = registry.project_versions(&identified.slug, &query).await?;

    let Some(version) = published.into_iter().next() else {
        return Err(UpdateError::NoCompatibleVersion {
            slug: identified.slug.clone(),
            game_version: Some(target.to_string()),
        });
    };

    let url = select_file(&version.files, selection)
        .map(|file| file.url.clone())
        .ok_or_else(|| UpdateError::NoDownloadableFile {
            slug: identified.slug.clone(),
            version_id: version.id.clone(),
        })?;

    let ProjectVersion {
        id,
        name,
        version_number,
        ..
    } = version;

    debug!(
        "Chose {} ({}) of {} for {}",
        version_number, id, identified.slug, target
    );

    Ok(ChosenVersion {
        id,
        name,
        version_number,
        url,
    })
}

/// Applies the file selection policy to a build's files
pub fn select_file(files: &[VersionFile], selection: FileSelection) -> Option<&VersionFile> {
    match selection {
        FileSelection::First => files.first(),
        FileSelection::PreferPrimary => files
            .iter()
            .find(|file| file.primary)
            .or_else(|| files.first()),
    }
}
