//! Destination path resolution.
//!
//! Expands a [`PathTemplate`] against sanitized metadata, joins the result onto
//! the destination root and probes for collisions with `" [vN]"` suffixes.
//!
//! Existence checks are not atomic with the caller's later copy. Callers must
//! run "resolve, then create" for one game at a time per destination root.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ResolveError;
use crate::metadata::{GameMetadata, OTHER, UNKNOWN};
use crate::sanitize::sanitize_segment;
use crate::template::{PathTemplate, TemplateField};

/// Upper bound on `" [vN]"` probes before giving up.
pub const MAX_VERSION_PROBES: u32 = 4096;

/// First suffix number tried after the plain name is taken.
const FIRST_VERSION: u32 = 2;

/// What is being placed at the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationKind {
    /// An extracted game folder
    Folder,
    /// The original archive, copied as `<name>.<extension>` under the expanded path
    Archive { extension: String },
}

/// A collision-free destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub path: PathBuf,
    /// Suffix number used, if the plain name was already taken
    pub version: Option<u32>,
}

/// The sanitized name a game is filed and its disks renamed under.
///
/// Falls back to `fallback_name`, then to `Unknown`, when the parsed name
/// sanitizes to nothing.
pub fn canonical_name(meta: &GameMetadata, fallback_name: &str) -> String {
    [meta.name.as_str(), fallback_name]
        .into_iter()
        .map(sanitize_segment)
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Build the sanitized substitution map for a record.
///
/// Absent optional fields become `Unknown` (secondary genre `Other`) before
/// sanitization. `?` in the year becomes `x` so `198?` survives as `198x`.
/// The name is [`canonical_name`].
pub fn field_values(meta: &GameMetadata, fallback_name: &str) -> HashMap<TemplateField, String> {
    let opt = |v: &Option<String>| sanitize_segment(v.as_deref().unwrap_or(UNKNOWN));
    let non_empty = |v: &str, default: &str| {
        if v.trim().is_empty() {
            default.to_string()
        } else {
            v.to_string()
        }
    };

    HashMap::from([
        (TemplateField::Name, canonical_name(meta, fallback_name)),
        (
            TemplateField::PrimaryGenre,
            sanitize_segment(&non_empty(&meta.primary_genre, UNKNOWN)),
        ),
        (
            TemplateField::SecondaryGenre,
            sanitize_segment(&non_empty(meta.secondary_genre.value(), OTHER)),
        ),
        (TemplateField::Language, sanitize_segment(meta.language.value())),
        (
            TemplateField::PublishedYear,
            sanitize_segment(&meta.published_year.value().replace('?', "x")),
        ),
        (TemplateField::Publisher, sanitize_segment(meta.publisher.value())),
        (TemplateField::Developer, opt(&meta.developer)),
        (TemplateField::Players, sanitize_segment(meta.players.value())),
        (TemplateField::Control, sanitize_segment(meta.control.value())),
        (TemplateField::PalNtsc, sanitize_segment(meta.video_standard.value())),
        (TemplateField::UniqueId, opt(&meta.unique_id)),
        (TemplateField::Coding, opt(&meta.coding)),
        (TemplateField::Graphics, opt(&meta.graphics)),
        (TemplateField::Music, opt(&meta.music)),
        (TemplateField::Comment, opt(&meta.comment)),
    ])
}

/// Expand `template` into a relative path. Empty segments are dropped.
pub fn relative_path(template: &PathTemplate, values: &HashMap<TemplateField, String>) -> PathBuf {
    template
        .expand(values)
        .split(['/', '\\'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Resolves destinations for one template and destination root.
#[derive(Debug, Clone)]
pub struct DestinationResolver {
    template: PathTemplate,
    root: PathBuf,
    max_probes: u32,
}

impl DestinationResolver {
    pub fn new(template: PathTemplate, root: impl Into<PathBuf>) -> Self {
        Self {
            template,
            root: root.into(),
            max_probes: MAX_VERSION_PROBES,
        }
    }

    /// Override the probe limit.
    pub fn with_max_probes(mut self, max_probes: u32) -> Self {
        self.max_probes = max_probes;
        self
    }

    /// Resolve against the real filesystem.
    pub fn resolve(
        &self,
        meta: &GameMetadata,
        fallback_name: &str,
        kind: &DestinationKind,
    ) -> Result<Destination, ResolveError> {
        self.resolve_with(meta, fallback_name, kind, |p| p.exists())
    }

    /// Resolve using `exists` as the collision oracle.
    pub fn resolve_with(
        &self,
        meta: &GameMetadata,
        fallback_name: &str,
        kind: &DestinationKind,
        exists: impl Fn(&Path) -> bool,
    ) -> Result<Destination, ResolveError> {
        let values = field_values(meta, fallback_name);
        let name = values
            .get(&TemplateField::Name)
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string());
        let base = self.root.join(relative_path(&self.template, &values));

        match kind {
            DestinationKind::Folder => {
                let target = if self.template.ends_with_name() {
                    base
                } else {
                    base.join(&name)
                };
                let parent = target.parent().unwrap_or(&self.root).to_path_buf();
                let stem = target
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or(name);
                probe(&parent, &stem, None, self.max_probes, exists)
            }
            DestinationKind::Archive { extension } => {
                probe(&base, &name, Some(extension.as_str()), self.max_probes, exists)
            }
        }
    }
}

/// Find the first free `<stem>[ [vN]][.ext]` under `parent`.
fn probe(
    parent: &Path,
    stem: &str,
    extension: Option<&str>,
    max_probes: u32,
    exists: impl Fn(&Path) -> bool,
) -> Result<Destination, ResolveError> {
    let file_name = |suffix: &str| match extension {
        Some(ext) => format!("{stem}{suffix}.{ext}"),
        None => format!("{stem}{suffix}"),
    };

    let first = parent.join(file_name(""));
    if !exists(&first) {
        return Ok(Destination {
            path: first,
            version: None,
        });
    }

    for version in (FIRST_VERSION..).take(max_probes as usize) {
        let candidate = parent.join(file_name(&format!(" [v{version}]")));
        if !exists(&candidate) {
            return Ok(Destination {
                path: candidate,
                version: Some(version),
            });
        }
    }

    Err(ResolveError::DestinationExhausted {
        path: first,
        attempts: max_probes,
    })
}

/// Resolve a folder destination for `meta` in one call.
///
/// Parses `template` (failing with the unknown-placeholder error), expands
/// it under `root`, appends the game name when the template does not already
/// end in `{name}`, and probes for collisions on disk.
pub fn resolve_destination(
    template: &str,
    meta: &GameMetadata,
    fallback_name: &str,
    root: &Path,
) -> Result<PathBuf, ResolveError> {
    let template = PathTemplate::parse(template)?;
    DestinationResolver::new(template, root)
        .resolve(meta, fallback_name, &DestinationKind::Folder)
        .map(|d| d.path)
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;
