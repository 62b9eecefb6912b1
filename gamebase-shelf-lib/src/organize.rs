//! The organize run: archives in, sorted game folders (or archives) out.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use gamebase_shelf_core::{
    DEFAULT_TEMPLATE, Destination, DestinationKind, DestinationResolver, GameMetadata,
    ParseError, PathTemplate, canonical_name, rename_disk_images,
};
use serde::Serialize;

use crate::archive::{self, ExtractedGame};
use crate::error::OrganizeError;
use crate::filter::{LanguageFilter, collapse_publisher_in};
use crate::scanner::{self, ARCHIVE_EXTENSION};
use crate::transfer::{self, Transfer};

/// Options controlling an organize run.
#[derive(Debug, Clone)]
pub struct OrganizeOptions {
    /// Destination template, validated before any archive is touched
    pub template: String,
    pub transfer: Transfer,
    pub language: LanguageFilter,
    /// Cut publishers at the first `/` or `\`
    pub collapse_publishers: bool,
    /// Place the original archive instead of its extracted contents
    pub keep_zipped: bool,
    /// Resolve destinations only
    pub dry_run: bool,
    /// Maximum number of archives to process
    pub limit: Option<usize>,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            transfer: Transfer::Copy,
            language: LanguageFilter::default(),
            collapse_publishers: false,
            keep_zipped: false,
            dry_run: false,
            limit: None,
        }
    }
}

/// Why an archive was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoInfoFile,
    Unparseable(ParseError),
    /// Rejected by the language filter
    Language(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoInfoFile => write!(f, "No VERSION.NFO found in archive"),
            Self::Unparseable(e) => write!(f, "Could not parse VERSION.NFO ({e})"),
            Self::Language(lang) => write!(f, "Not English (Language: {lang})"),
        }
    }
}

/// What happened to one archive.
#[derive(Debug)]
pub enum ArchiveOutcome {
    Organized {
        archive: PathBuf,
        destination: Destination,
    },
    Skipped {
        archive: PathBuf,
        reason: SkipReason,
    },
    Failed {
        archive: PathBuf,
        error: OrganizeError,
    },
}

impl ArchiveOutcome {
    pub fn archive(&self) -> &Path {
        match self {
            Self::Organized { archive, .. }
            | Self::Skipped { archive, .. }
            | Self::Failed { archive, .. } => archive,
        }
    }
}

/// Progress updates for callbacks.
#[derive(Debug)]
pub enum OrganizeProgress<'a> {
    /// Archive discovery finished
    Found { total: usize },
    /// About to process an archive
    Processing {
        archive: &'a Path,
        index: usize,
        total: usize,
    },
    /// An archive is done
    Finished(&'a ArchiveOutcome),
}

/// Totals for a run plus every per-archive outcome.
#[derive(Debug, Default)]
pub struct OrganizeSummary {
    pub found: usize,
    pub organized: usize,
    pub skipped: usize,
    pub failed: usize,
    pub details: Vec<ArchiveOutcome>,
}

impl OrganizeSummary {
    fn record(&mut self, outcome: ArchiveOutcome) {
        match outcome {
            ArchiveOutcome::Organized { .. } => self.organized += 1,
            ArchiveOutcome::Skipped { .. } => self.skipped += 1,
            ArchiveOutcome::Failed { .. } => self.failed += 1,
        }
        self.details.push(outcome);
    }

    pub fn errors(&self) -> impl Iterator<Item = &ArchiveOutcome> {
        self.details
            .iter()
            .filter(|o| !matches!(o, ArchiveOutcome::Organized { .. }))
    }
}

/// Organize every archive under `source` into `destination`.
///
/// Archives are processed one at a time in path order. Only a bad template or
/// a missing source aborts the run; per-archive problems are recorded in the
/// summary.
pub fn organize(
    source: &Path,
    destination: &Path,
    options: &OrganizeOptions,
    progress: &dyn Fn(OrganizeProgress),
) -> Result<OrganizeSummary, OrganizeError> {
    let template = PathTemplate::parse(&options.template)?;
    let resolver = DestinationResolver::new(template, destination);

    let mut archives = scanner::find_archives(source)?;
    if let Some(max) = options.limit {
        archives.truncate(max);
    }
    let total = archives.len();
    progress(OrganizeProgress::Found { total });
    log::debug!("Found {} archive(s) under {}", total, source.display());

    let mut summary = OrganizeSummary {
        found: total,
        ..Default::default()
    };
    let mut planned = HashSet::new();

    for (index, archive) in archives.into_iter().enumerate() {
        progress(OrganizeProgress::Processing {
            archive: &archive,
            index,
            total,
        });
        let outcome = process_archive(&archive, &resolver, options, &mut planned);
        progress(OrganizeProgress::Finished(&outcome));
        summary.record(outcome);
    }

    Ok(summary)
}

fn process_archive(
    archive: &Path,
    resolver: &DestinationResolver,
    options: &OrganizeOptions,
    planned: &mut HashSet<PathBuf>,
) -> ArchiveOutcome {
    let skipped = |reason| ArchiveOutcome::Skipped {
        archive: archive.to_path_buf(),
        reason,
    };
    let failed = |error| ArchiveOutcome::Failed {
        archive: archive.to_path_buf(),
        error,
    };

    let mut game = match archive::open_game(archive) {
        Ok(game) => game,
        Err(OrganizeError::NoInfoFile(_)) => return skipped(SkipReason::NoInfoFile),
        Err(OrganizeError::Parse(e)) => return skipped(SkipReason::Unparseable(e)),
        Err(e) => return failed(e),
    };

    if options.collapse_publishers {
        collapse_publisher_in(&mut game.metadata);
    }

    let language = game.metadata.language.value();
    if !options.language.accepts(language) {
        return skipped(SkipReason::Language(language.to_string()));
    }

    match place_game(archive, game, resolver, options, planned) {
        Ok(destination) => ArchiveOutcome::Organized {
            archive: archive.to_path_buf(),
            destination,
        },
        Err(e) => failed(e),
    }
}

fn place_game(
    archive: &Path,
    game: ExtractedGame,
    resolver: &DestinationResolver,
    options: &OrganizeOptions,
    planned: &mut HashSet<PathBuf>,
) -> Result<Destination, OrganizeError> {
    let kind = if options.keep_zipped {
        DestinationKind::Archive {
            extension: ARCHIVE_EXTENSION.to_string(),
        }
    } else {
        DestinationKind::Folder
    };

    let fallback = archive_stem(archive);
    let destination = resolver.resolve_with(&game.metadata, &fallback, &kind, |p| {
        p.exists() || planned.contains(p)
    })?;

    if options.dry_run {
        planned.insert(destination.path.clone());
        log::debug!("Would place {} at {}", archive.display(), destination.path.display());
        return Ok(destination);
    }

    if options.keep_zipped {
        transfer::transfer_file(archive, &destination.path, options.transfer)?;
        return Ok(destination);
    }

    let name = canonical_name(&game.metadata, &fallback);
    let renames = rename_disk_images(&game.working_folder, &name)?;
    for rename in renames.iter().filter(|r| !r.is_noop()) {
        log::debug!(
            "Renamed {} -> {}",
            rename.source.display(),
            rename.target.display()
        );
    }

    transfer::move_dir(&game.working_folder, &destination.path)?;
    if options.transfer == Transfer::Move {
        fs::remove_file(archive)?;
    }
    Ok(destination)
}

fn archive_stem(archive: &Path) -> String {
    archive
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// One archive as seen by [`scan_archives`].
#[derive(Debug, Serialize)]
pub struct ScannedGame {
    pub archive: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GameMetadata>,
    /// Why the archive could not be read, if it could not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Extract and parse every archive under `source` without organizing anything.
///
/// Games rejected by `language` are left out of the listing; unreadable
/// archives are kept with their error.
pub fn scan_archives(
    source: &Path,
    language: LanguageFilter,
    limit: Option<usize>,
    progress: &dyn Fn(OrganizeProgress),
) -> Result<Vec<ScannedGame>, OrganizeError> {
    let mut archives = scanner::find_archives(source)?;
    if let Some(max) = limit {
        archives.truncate(max);
    }
    let total = archives.len();
    progress(OrganizeProgress::Found { total });

    let mut games = Vec::with_capacity(total);
    for (index, archive) in archives.into_iter().enumerate() {
        progress(OrganizeProgress::Processing {
            archive: &archive,
            index,
            total,
        });
        match archive::open_game(&archive) {
            Ok(game) => {
                if language.accepts(game.metadata.language.value()) {
                    games.push(ScannedGame {
                        archive,
                        metadata: Some(game.metadata),
                        error: None,
                    });
                }
            }
            Err(e) => games.push(ScannedGame {
                archive,
                metadata: None,
                error: Some(e.to_string()),
            }),
        }
    }
    Ok(games)
}

#[cfg(test)]
#[path = "tests/organize_tests.rs"]
mod tests;
