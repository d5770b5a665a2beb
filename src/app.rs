//! Update pipeline over a directory of local mods
//!
//! Stages run strictly in order, one mod at a time, so diagnostics follow
//! scan order:
//!
//! ```text
//! Scanning → Identifying → Reconciling → Selecting → Reporting → Downloading → Done
//! ```
//!
//! Per-mod failures are logged and the mod is left out of later stages. Only
//! an empty directory or an empty version intersection ends the run early.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::browser::Browser;
use crate::config::Config;
use crate::error::UpdateError;
use crate::local::{LocalMod, ModArchiveReader};
use crate::matcher::{self, Confidence, IdentifiedMod};
use crate::prompt;
use crate::registry::{Registry, SearchQuery};
use crate::version::{
    ChosenVersion, CompatibleVersions, VersionSet, choose_build, consensus_version,
    list_compatible_versions,
};

/// Pipeline stage, logged on every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scanning,
    Identifying,
    Reconciling,
    Selecting,
    Reporting,
    Downloading,
    Done,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The directory held no recognised mods
    NoMods,
    /// The identified mods share no game version
    NoCommonVersion,
    /// Suggestions were printed; `opened` links went to the browser
    Completed { suggested: usize, opened: usize },
}

impl RunOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::NoCommonVersion => 1,
            RunOutcome::NoMods | RunOutcome::Completed { .. } => 0,
        }
    }
}

/// Everything learned about one local mod during a run
#[derive(Debug, Clone, PartialEq)]
pub struct ModEntry {
    pub local: LocalMod,
    pub identified: Option<IdentifiedMod>,
    pub compatible: Option<CompatibleVersions>,
    pub chosen: Option<ChosenVersion>,
}

impl ModEntry {
    fn new(local: LocalMod) -> Self {
        Self {
            local,
            identified: None,
            compatible: None,
            chosen: None,
        }
    }

    /// Registry title when identified, local name otherwise
    pub fn display_name(&self) -> &str {
        self.identified
            .as_ref()
            .map(|identified| identified.title.as_str())
            .unwrap_or(&self.local.name)
    }

    /// True when the chosen build differs from the installed one
    pub fn needs_update(&self) -> bool {
        self.chosen
            .as_ref()
            .is_some_and(|chosen| chosen.version_number != self.local.version)
    }
}

/// Result of [`Updater::run`]
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub target_version: Option<String>,
    pub mods: Vec<ModEntry>,
}

/// Drives the update pipeline against a registry
pub struct Updater<'a> {
    registry: &'a dyn Registry,
    browser: &'a dyn Browser,
    config: &'a Config,
    reader: ModArchiveReader,
}

impl<'a> Updater<'a> {
    pub fn new(registry: &'a dyn Registry, browser: &'a dyn Browser, config: &'a Config) -> Self {
        Self {
            registry,
            browser,
            config,
            reader: ModArchiveReader::default(),
        }
    }

    /// Confirms the registry speaks the API major version this client expects.
    ///
    /// # Returns
    /// * `Ok(String)` - The reported API version
    /// * `Err(UpdateError::ApiIncompatible)` - If the major version differs
    /// * `Err(UpdateError::RequestFailed)` - If the precheck request fails
    pub async fn check_api(&self) -> Result<String, UpdateError> {
        let version = self.registry.api_version().await?;
        let required = &self.config.required_api_version;

        if !version.starts_with(required.as_str()) {
            return Err(UpdateError::ApiIncompatible {
                found: version,
                required: required.clone(),
            });
        }

        debug!("Registry API version {} is compatible", version);
        Ok(version)
    }

    /// Binds a local mod to a registry project.
    ///
    /// Overrides from the config win; otherwise the registry is searched by
    /// name and the best-scoring hit is taken.
    pub async fn identify(&self, local: &LocalMod) -> Result<IdentifiedMod, UpdateError> {
        if let Some(slug) = self.config.matching.overrides.get(&local.name) {
            debug!("Using configured slug {} for {}", slug, local.name);
            return Ok(IdentifiedMod::from_override(local.clone(), slug));
        }

        let query = SearchQuery {
            query: local.name.clone(),
            loader: local.loader,
            limit: self.config.search_limit,
        };
        let hits = self.registry.search(&query).await?;
        let best = matcher::select_best(local, hits, &self.config.matching)
            .ok_or_else(|| UpdateError::ModNotFound(local.name.clone()))?;

        debug!(
            "Selected mod {} ({}) for search {} with affinity {:.3}",
            best.hit.title, best.hit.slug, local.name, best.score
        );

        if best.confidence == Confidence::Uncertain {
            if self.config.matching.reject_uncertain {
                return Err(UpdateError::UncertainMatch {
                    name: local.name.clone(),
                    title: best.hit.title,
                    score: best.score,
                });
            }
            warn!(
                "Uncertain match {} for mod {} (affinity {:.2})",
                best.hit.title, local.name, best.score
            );
        }

        Ok(best.into_identified(local.clone()))
    }

    /// Runs the whole pipeline over `dir`.
    ///
    /// The report goes to `output`; the download confirmation (and the debug
    /// pause) read from `input`.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        dir: &Path,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<RunReport> {
        enter(Stage::Scanning);
        writeln!(output, "\n=== Checking mods folder ===\n")?;
        let mut mods: Vec<ModEntry> = self.scan(dir).into_iter().map(ModEntry::new).collect();

        if mods.is_empty() {
            writeln!(output, "No mods found")?;
            enter(Stage::Done);
            return Ok(RunReport {
                outcome: RunOutcome::NoMods,
                target_version: None,
                mods,
            });
        }

        writeln!(output, "\n=== Mods found ===\n")?;
        for entry in &mods {
            writeln!(output, "{} ({})", entry.local.name, entry.local.version)?;
        }

        enter(Stage::Identifying);
        writeln!(
            output,
            "\n=== Checking compatible versions ===\nNOTE: May take some time, the code is not frozen\n"
        )?;
        for entry in &mut mods {
            self.resolve_entry(entry).await;
        }

        enter(Stage::Reconciling);
        let target = match self.reconcile(&mods) {
            Ok(target) => target,
            Err(e) => {
                warn!("{}", e);
                writeln!(output, "=== Could not find a common version ===")?;
                writeln!(
                    output,
                    "This likely means that the code misidentified at least one of the mods"
                )?;
                writeln!(
                    output,
                    "Please report this, together with the list of mods detected"
                )?;
                enter(Stage::Done);
                return Ok(RunReport {
                    outcome: RunOutcome::NoCommonVersion,
                    target_version: None,
                    mods,
                });
            }
        };
        if self.config.debug && self.config.debug_pause {
            prompt::pause(input, output)?;
        }
        writeln!(output, "\t=> Highest common version: {target}")?;

        enter(Stage::Selecting);
        for entry in &mut mods {
            self.select_entry(entry, &target).await;
        }

        enter(Stage::Reporting);
        writeln!(output, "\n=== Suggested actions ===\n")?;
        let suggested = report_actions(&mods, &target, output)?;

        let mut opened = 0;
        if suggested != 0 {
            writeln!(output, "\n{suggested} suggested updates found")?;
            if prompt::confirm(input, output, "Download suggested versions?")? {
                enter(Stage::Downloading);
                writeln!(output, "Downloading {suggested} mods in browser...")?;
                opened = self.open_downloads(&mods);
            }
        }

        enter(Stage::Done);
        Ok(RunReport {
            outcome: RunOutcome::Completed { suggested, opened },
            target_version: Some(target),
            mods,
        })
    }

    fn scan(&self, dir: &Path) -> Vec<LocalMod> {
        match self.reader.scan_directory(dir) {
            Ok(report) => {
                debug!(
                    "Scanned {:?}: {} mods, {} skipped",
                    dir,
                    report.mods.len(),
                    report.skipped.len()
                );
                report.mods
            }
            Err(e) => {
                warn!("Could not read mod directory {:?}: {}", dir, e);
                Vec::new()
            }
        }
    }

    /// Identifies the mod and lists its compatible versions; failures are logged.
    async fn resolve_entry(&self, entry: &mut ModEntry) {
        let identified = match self.identify(&entry.local).await {
            Ok(identified) => identified,
            Err(e) => {
                warn!(
                    "Failed search for mod {}: {}. Skipping...",
                    entry.local.name, e
                );
                return;
            }
        };

        match list_compatible_versions(self.registry, &identified).await {
            Ok(compatible) => entry.compatible = Some(compatible),
            Err(e) => warn!(
                "Failed to get versions for mod {}: {}. Skipping...",
                identified.title, e
            ),
        }
        entry.identified = Some(identified);
    }

    fn reconcile(&self, mods: &[ModEntry]) -> Result<String, UpdateError> {
        let missing = mods.iter().filter(|m| m.compatible.is_none()).count();
        if missing != 0 {
            warn!("Could not find {} mods", missing);
        }

        // one set per local mod, even when several resolve to the same slug
        let version_sets: Vec<(&str, &VersionSet)> = mods
            .iter()
            .filter_map(|m| {
                let identified = m.identified.as_ref()?;
                let compatible = m.compatible.as_ref()?;
                Some((identified.slug.as_str(), &compatible.versions))
            })
            .collect();
        debug!("Version sets: {:?}", version_sets);

        let target = consensus_version(version_sets.iter().map(|(_, versions)| *versions))?;
        info!("Highest common version: {}", target);
        Ok(target)
    }

    async fn select_entry(&self, entry: &mut ModEntry, target: &str) {
        let Some(identified) = &entry.identified else {
            return;
        };

        match choose_build(self.registry, identified, target, self.config.file_selection).await {
            Ok(chosen) => entry.chosen = Some(chosen),
            Err(e) => warn!(
                "Could not choose version for mod {}: {}. Skipping...",
                identified.title, e
            ),
        }
    }

    /// Opens every chosen download link; returns how many opened.
    fn open_downloads(&self, mods: &[ModEntry]) -> usize {
        let mut opened = 0;
        for chosen in mods.iter().filter_map(|m| m.chosen.as_ref()) {
            match self.browser.open(&chosen.url) {
                Ok(()) => opened += 1,
                Err(e) => warn!("{}", e),
            }
        }
        opened
    }
}

fn enter(stage: Stage) {
    debug!("Stage: {:?}", stage);
}

/// Prints one line per mod and returns the number of suggested updates.
fn report_actions<W: Write>(mods: &[ModEntry], target: &str, output: &mut W) -> io::Result<usize> {
    let mut suggested = 0;
    for entry in mods {
        if entry.identified.is_none() {
            writeln!(output, "Skipping unidentified mod {}", entry.local.name)?;
            continue;
        }
        let Some(chosen) = &entry.chosen else {
            continue;
        };

        if entry.needs_update() {
            writeln!(
                output,
                "Update {} to version {} at {}",
                entry.display_name(),
                chosen.version_number,
                chosen.url
            )?;
            suggested += 1;
        } else {
            writeln!(
                output,
                "No action for mod {} as it is already compatible with {}",
                entry.display_name(),
                target
            )?;
        }
    }
    Ok(suggested)
}
